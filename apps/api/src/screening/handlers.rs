//! Screening endpoints: résumé upload/evaluation and the role catalog view.

use std::sync::Mutex;

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract;
use crate::metrics::MetricsAggregator;
use crate::notification::{
    dispatch_logged, Mailer, NotificationContext, NotificationKind, NotificationStatus,
};
use crate::scheduling::slots::earliest_interview_date;
use crate::screening::catalog::{RoleCatalog, RoleProfile};
use crate::screening::decision::{decide, Decision, DecisionPolicy};
use crate::state::{lock, AppState};

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub decision: Decision,
    /// Present only on rejection; reports whether the rejection email went out.
    pub rejection_email: Option<NotificationStatus>,
    /// Present only on acceptance: the first date slots may be requested for.
    pub earliest_interview_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct RoleListEntry {
    pub role_id: String,
    pub required_skills: Vec<String>,
    pub experience_keywords: Vec<String>,
    pub description: String,
}

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<Vec<RoleListEntry>> {
    let roles = state
        .catalog
        .profiles()
        .map(|p| RoleListEntry {
            role_id: p.role_id.clone(),
            required_skills: p.required_skills.iter().cloned().collect(),
            experience_keywords: p.experience_keywords.iter().cloned().collect(),
            description: p.description.clone(),
        })
        .collect();
    Json(roles)
}

/// POST /api/v1/screenings
///
/// Multipart form: `role`, `candidate_email`, and either `resume` (a PDF)
/// or `resume_text` (already-extracted plain text).
pub async fn handle_screening(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let upload = read_screening_form(multipart).await?;

    let resume_text = match (upload.resume_pdf, upload.resume_text) {
        (Some(bytes), _) => extract::text_from_pdf(&bytes)?,
        (None, Some(text)) if !text.trim().is_empty() => text,
        _ => {
            return Err(AppError::Validation(
                "either a 'resume' PDF or non-empty 'resume_text' is required".to_string(),
            ))
        }
    };

    let outcome = run_screening(
        &state.catalog,
        state.config.decision_policy,
        state.mailer.as_ref(),
        &state.metrics,
        &state.config.company_name,
        &upload.role,
        &upload.candidate_email,
        &resume_text,
    )
    .await?;

    let earliest = if outcome.decision.accepted {
        let today = Utc::now()
            .with_timezone(&state.config.interview_tz_offset)
            .date_naive();
        Some(earliest_interview_date(today))
    } else {
        None
    };

    Ok(Json(ScreeningResponse {
        decision: outcome.decision,
        rejection_email: outcome.rejection_email,
        earliest_interview_date: earliest,
    }))
}

pub struct ScreeningOutcome {
    pub decision: Decision,
    pub rejection_email: Option<NotificationStatus>,
}

/// The evaluation workflow: score, decide, and on rejection notify the
/// candidate and record the outcome. Acceptance is recorded later, when the
/// scheduling stage completes — recording here too would double-count.
#[allow(clippy::too_many_arguments)]
pub async fn run_screening(
    catalog: &RoleCatalog,
    policy: DecisionPolicy,
    mailer: &dyn Mailer,
    metrics: &Mutex<MetricsAggregator>,
    company_name: &str,
    role_id: &str,
    candidate_email: &str,
    resume_text: &str,
) -> Result<ScreeningOutcome, AppError> {
    let profile: &RoleProfile = catalog.get(role_id)?;
    let decision = decide(resume_text, profile, policy, candidate_email)?;

    info!(
        role = role_id,
        accepted = decision.accepted,
        total_score = decision.score.total_score,
        "resume evaluated"
    );

    let rejection_email = if decision.accepted {
        None
    } else {
        let ctx = NotificationContext {
            role_id,
            company_name,
            interview: None,
        };
        let status =
            dispatch_logged(mailer, NotificationKind::Rejection, candidate_email, &ctx).await;
        lock(metrics)?.record(role_id, false, false);
        Some(status)
    };

    Ok(ScreeningOutcome {
        decision,
        rejection_email,
    })
}

struct ScreeningUpload {
    role: String,
    candidate_email: String,
    resume_pdf: Option<Vec<u8>>,
    resume_text: Option<String>,
}

async fn read_screening_form(mut multipart: Multipart) -> Result<ScreeningUpload, AppError> {
    let mut role = None;
    let mut candidate_email = None;
    let mut resume_pdf = None;
    let mut resume_text = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("role") => role = Some(read_text(field).await?),
            Some("candidate_email") => candidate_email = Some(read_text(field).await?),
            Some("resume_text") => resume_text = Some(read_text(field).await?),
            Some("resume") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read resume: {e}")))?;
                resume_pdf = Some(bytes.to_vec());
            }
            _ => {} // unknown fields are ignored
        }
    }

    let role = role.ok_or_else(|| AppError::Validation("'role' field is required".to_string()))?;
    let candidate_email = candidate_email
        .ok_or_else(|| AppError::Validation("'candidate_email' field is required".to_string()))?;
    if !candidate_email.contains('@') {
        return Err(AppError::Validation(format!(
            "'{candidate_email}' is not a valid email address"
        )));
    }

    Ok(ScreeningUpload {
        role,
        candidate_email,
        resume_pdf,
        resume_text,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("could not read form field: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::notification::NotificationError;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, _to: &str, subject: &str, _body: &str) -> Result<(), NotificationError> {
            if self.fail {
                return Err(NotificationError::Delivery("relay unavailable".to_string()));
            }
            self.sent.lock().unwrap().push(subject.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_rejection_sends_email_and_records_once() {
        let catalog = RoleCatalog::builtin();
        let mailer = RecordingMailer::default();
        let metrics = Mutex::new(MetricsAggregator::default());

        let outcome = run_screening(
            &catalog,
            DecisionPolicy::Score { threshold: 0.5 },
            &mailer,
            &metrics,
            "Acme",
            "frontend_engineer",
            "candidate@example.com",
            "I know react and redux.",
        )
        .await
        .unwrap();

        assert!(!outcome.decision.accepted);
        let status = outcome.rejection_email.unwrap();
        assert!(status.delivered);
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);

        let snap = metrics.lock().unwrap().snapshot();
        assert_eq!(snap.total_uploaded, 1);
        assert_eq!(snap.total_selected, 0);
        assert_eq!(snap.per_role["frontend_engineer"].applications, 1);
    }

    #[tokio::test]
    async fn test_rejection_email_failure_is_non_fatal() {
        let catalog = RoleCatalog::builtin();
        let mailer = RecordingMailer {
            fail: true,
            ..Default::default()
        };
        let metrics = Mutex::new(MetricsAggregator::default());

        let outcome = run_screening(
            &catalog,
            DecisionPolicy::Score { threshold: 0.5 },
            &mailer,
            &metrics,
            "Acme",
            "frontend_engineer",
            "candidate@example.com",
            "nothing relevant",
        )
        .await
        .unwrap();

        let status = outcome.rejection_email.unwrap();
        assert!(!status.delivered);
        assert!(status.detail.is_some());
        // Metrics still recorded despite the mail failure.
        assert_eq!(metrics.lock().unwrap().snapshot().total_uploaded, 1);
    }

    #[tokio::test]
    async fn test_acceptance_sends_nothing_and_records_nothing_yet() {
        let catalog = RoleCatalog::builtin();
        let mailer = RecordingMailer::default();
        let metrics = Mutex::new(MetricsAggregator::default());

        let outcome = run_screening(
            &catalog,
            DecisionPolicy::Membership,
            &mailer,
            &metrics,
            "Acme",
            "backend_engineer",
            "candidate@example.com",
            "Applying for the backend_engineer opening.",
        )
        .await
        .unwrap();

        assert!(outcome.decision.accepted);
        assert!(outcome.rejection_email.is_none());
        assert!(mailer.sent.lock().unwrap().is_empty());
        assert_eq!(metrics.lock().unwrap().snapshot().total_uploaded, 0);
    }

    #[tokio::test]
    async fn test_unknown_role_is_configuration_error() {
        let catalog = RoleCatalog::builtin();
        let mailer = RecordingMailer::default();
        let metrics = Mutex::new(MetricsAggregator::default());

        let result = run_screening(
            &catalog,
            DecisionPolicy::Membership,
            &mailer,
            &metrics,
            "Acme",
            "chief_vibes_officer",
            "candidate@example.com",
            "text",
        )
        .await;

        assert!(matches!(result, Err(AppError::Configuration(_))));
        assert_eq!(metrics.lock().unwrap().snapshot().total_uploaded, 0);
    }
}
