//! Process-lifetime outcome counters, keyed by role and outcome.
//!
//! `record` runs exactly once per completed résumé evaluation: the upload
//! counters move on every outcome, the selection counter only on acceptance,
//! and the interview counter only on a confirmed booking — acceptance alone
//! never counts as a scheduled interview.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::{lock, AppState};

#[derive(Debug, Default, Clone, Serialize)]
pub struct RoleCounters {
    pub applications: u64,
    pub selected: u64,
    pub interviewed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_uploaded: u64,
    pub total_selected: u64,
    pub total_interviews_scheduled: u64,
    pub per_role: BTreeMap<String, RoleCounters>,
    /// selected / uploaded, absent until the first upload.
    pub selection_rate: Option<f64>,
}

#[derive(Debug, Default)]
pub struct MetricsAggregator {
    total_uploaded: u64,
    total_selected: u64,
    total_interviews_scheduled: u64,
    per_role: BTreeMap<String, RoleCounters>,
}

impl MetricsAggregator {
    /// Records one completed evaluation. Call exactly once per candidate.
    pub fn record(&mut self, role_id: &str, accepted: bool, interview_confirmed: bool) {
        self.total_uploaded += 1;
        let counters = self.per_role.entry(role_id.to_string()).or_default();
        counters.applications += 1;
        if accepted {
            self.total_selected += 1;
            counters.selected += 1;
            if interview_confirmed {
                self.total_interviews_scheduled += 1;
                counters.interviewed += 1;
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let selection_rate = if self.total_uploaded > 0 {
            Some(self.total_selected as f64 / self.total_uploaded as f64)
        } else {
            None
        };
        MetricsSnapshot {
            total_uploaded: self.total_uploaded,
            total_selected: self.total_selected,
            total_interviews_scheduled: self.total_interviews_scheduled,
            per_role: self.per_role.clone(),
            selection_rate,
        }
    }

    /// Zeroes every counter and the per-role map together.
    pub fn reset(&mut self) {
        *self = MetricsAggregator::default();
    }
}

/// GET /api/v1/metrics
pub async fn handle_get_metrics(
    State(state): State<AppState>,
) -> Result<Json<MetricsSnapshot>, AppError> {
    let metrics = lock(&state.metrics)?;
    Ok(Json(metrics.snapshot()))
}

/// POST /api/v1/metrics/reset
pub async fn handle_reset_metrics(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut metrics = lock(&state.metrics)?;
    metrics.reset();
    info!("metrics reset by operator");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applications_count_every_outcome_once() {
        let mut m = MetricsAggregator::default();
        for _ in 0..3 {
            m.record("backend_engineer", false, false);
        }
        m.record("backend_engineer", true, true);
        let snap = m.snapshot();
        assert_eq!(snap.per_role["backend_engineer"].applications, 4);
        assert_eq!(snap.total_uploaded, 4);
    }

    #[test]
    fn test_uploaded_equals_sum_of_per_role_applications() {
        let mut m = MetricsAggregator::default();
        m.record("backend_engineer", true, true);
        m.record("frontend_engineer", false, false);
        m.record("ai_ml_engineer", true, false);
        let snap = m.snapshot();
        let sum: u64 = snap.per_role.values().map(|c| c.applications).sum();
        assert_eq!(snap.total_uploaded, sum);
    }

    #[test]
    fn test_acceptance_without_booking_does_not_count_interview() {
        let mut m = MetricsAggregator::default();
        m.record("backend_engineer", true, false);
        let snap = m.snapshot();
        assert_eq!(snap.total_selected, 1);
        assert_eq!(snap.total_interviews_scheduled, 0);
        assert_eq!(snap.per_role["backend_engineer"].interviewed, 0);
    }

    #[test]
    fn test_selected_never_exceeds_uploaded() {
        let mut m = MetricsAggregator::default();
        m.record("backend_engineer", true, true);
        m.record("backend_engineer", true, true);
        m.record("backend_engineer", false, false);
        let snap = m.snapshot();
        assert!(snap.total_selected <= snap.total_uploaded);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut m = MetricsAggregator::default();
        m.record("backend_engineer", true, true);
        m.reset();
        let snap = m.snapshot();
        assert_eq!(snap.total_uploaded, 0);
        assert_eq!(snap.total_selected, 0);
        assert_eq!(snap.total_interviews_scheduled, 0);
        assert!(snap.per_role.is_empty());
        assert_eq!(snap.selection_rate, None);
    }

    #[test]
    fn test_selection_rate() {
        let mut m = MetricsAggregator::default();
        assert_eq!(m.snapshot().selection_rate, None);
        m.record("backend_engineer", true, true);
        m.record("backend_engineer", false, false);
        assert_eq!(m.snapshot().selection_rate, Some(0.5));
    }
}
