//! Notification dispatch — renders one of the three fixed templates and
//! hands it to the mail relay.

pub mod mailer;
pub mod templates;

pub use mailer::{Mailer, NotificationError, SmtpMailer};
pub use templates::NotificationKind;

use serde::Serialize;
use tracing::warn;

use crate::scheduling::slots::InterviewSlot;

/// Everything the templates can interpolate. `interview` is required for
/// `InterviewDetails` and ignored otherwise.
#[derive(Debug, Clone)]
pub struct NotificationContext<'a> {
    pub role_id: &'a str,
    pub company_name: &'a str,
    pub interview: Option<(&'a InterviewSlot, &'a str)>,
}

/// Renders and sends one notification. Delivery failures come back as
/// `NotificationError`; whether that is fatal is the caller's call.
pub async fn dispatch(
    mailer: &dyn Mailer,
    kind: NotificationKind,
    candidate_email: &str,
    ctx: &NotificationContext<'_>,
) -> Result<(), NotificationError> {
    let content = match kind {
        NotificationKind::Selection => templates::selection(ctx.role_id, ctx.company_name),
        NotificationKind::Rejection => templates::rejection(ctx.role_id, ctx.company_name),
        NotificationKind::InterviewDetails => {
            let (slot, link) = ctx.interview.ok_or_else(|| {
                NotificationError::Delivery(
                    "interview details requested without a booked slot".to_string(),
                )
            })?;
            templates::interview_details(ctx.role_id, ctx.company_name, slot, link)
        }
    };

    mailer
        .send(candidate_email, &content.subject, &content.body)
        .await
}

/// Per-notification delivery outcome reported back to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationStatus {
    pub kind: NotificationKind,
    pub delivered: bool,
    pub detail: Option<String>,
}

/// Dispatches one notification, logging and absorbing delivery failures.
/// The workflow treats mail failures as non-fatal; the status makes them
/// visible instead of silently swallowed.
pub async fn dispatch_logged(
    mailer: &dyn Mailer,
    kind: NotificationKind,
    candidate_email: &str,
    ctx: &NotificationContext<'_>,
) -> NotificationStatus {
    match dispatch(mailer, kind, candidate_email, ctx).await {
        Ok(()) => NotificationStatus {
            kind,
            delivered: true,
            detail: None,
        },
        Err(e) => {
            warn!("notification {kind:?} to candidate failed: {e}");
            NotificationStatus {
                kind,
                delivered: false,
                detail: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), NotificationError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_selection_sends_one_email() {
        let mailer = RecordingMailer::default();
        let ctx = NotificationContext {
            role_id: "backend_engineer",
            company_name: "Acme",
            interview: None,
        };
        dispatch(&mailer, NotificationKind::Selection, "c@example.com", &ctx)
            .await
            .unwrap();
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "c@example.com");
    }

    #[tokio::test]
    async fn test_interview_details_without_slot_fails() {
        let mailer = RecordingMailer::default();
        let ctx = NotificationContext {
            role_id: "backend_engineer",
            company_name: "Acme",
            interview: None,
        };
        let result = dispatch(
            &mailer,
            NotificationKind::InterviewDetails,
            "c@example.com",
            &ctx,
        )
        .await;
        assert!(result.is_err());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }
}
