//! Résumé screening: role catalog, skill matching, and the accept/reject
//! decision engine.

pub mod catalog;
pub mod decision;
pub mod handlers;
pub mod matcher;
