use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;

use crate::config::Config;
use crate::errors::AppError;
use crate::metrics::MetricsAggregator;
use crate::notification::Mailer;
use crate::scheduling::ledger::InterviewLedger;
use crate::scheduling::zoom::MeetingScheduler;
use crate::screening::catalog::RoleCatalog;

/// Shared application state injected into all route handlers via Axum
/// extractors. The ledger and metrics are the only mutable members; one
/// workflow runs at a time, the mutexes make each update atomic regardless.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable after startup.
    pub catalog: Arc<RoleCatalog>,
    /// Pluggable meeting booker. Production: ZoomScheduler.
    pub scheduler: Arc<dyn MeetingScheduler>,
    /// Pluggable mail relay. Production: SmtpMailer.
    pub mailer: Arc<dyn Mailer>,
    pub metrics: Arc<Mutex<MetricsAggregator>>,
    pub ledger: Arc<Mutex<InterviewLedger>>,
}

/// Locks shared state, converting a poisoned mutex into an internal error
/// instead of panicking in a handler.
pub fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::Internal(anyhow!("shared state lock poisoned")))
}
