//! Mail relay client. One synchronous submission per notification; no queue,
//! no retry. A failure is reported as text and the caller decides what it
//! means for the flow.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid email address: {0}")]
    Address(String),

    /// Transport-level delivery failure. The message carries the relay's
    /// error text only — credentials never appear here.
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

/// Seam for mail delivery. Production uses `SmtpMailer`; tests substitute
/// a recording fake through `Arc<dyn Mailer>` in `AppState`.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError>;
}

/// SMTP submission over STARTTLS with operator-supplied credentials.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    pub fn new(host: &str, sender_email: &str, app_password: &str) -> Result<Self, NotificationError> {
        let sender = sender_email
            .parse::<Mailbox>()
            .map_err(|e| NotificationError::Address(format!("sender '{sender_email}': {e}")))?;

        // STARTTLS upgrades the session before AUTH is attempted.
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| NotificationError::Delivery(format!("relay '{host}': {e}")))?
            .credentials(Credentials::new(
                sender_email.to_string(),
                app_password.to_string(),
            ))
            .build();

        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|e| NotificationError::Address(format!("recipient '{to}': {e}")))?;

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| NotificationError::Delivery(format!("message build: {e}")))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| NotificationError::Delivery(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_sender_address_is_rejected() {
        let result = SmtpMailer::new("smtp.example.com", "not-an-address", "pw");
        assert!(matches!(result, Err(NotificationError::Address(_))));
    }

    #[test]
    fn test_construction_error_does_not_leak_password() {
        let err = SmtpMailer::new("smtp.example.com", "not-an-address", "hunter2").unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
    }
}
