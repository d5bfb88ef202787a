//! Interview scheduling: slot generation, the conferencing client, and the
//! append-only interview ledger.

pub mod handlers;
pub mod ledger;
pub mod slots;
pub mod zoom;
