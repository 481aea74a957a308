//! Console mail transport - writes messages to the log instead of sending them.

use async_trait::async_trait;

use inkwell_core::domain::OutgoingMail;
use inkwell_core::ports::{MailError, Mailer};
use inkwell_core::validation::mask_email;

/// Logs every message at `info` with recipients masked.
///
/// The fallback when no SMTP relay is wired in, the same way a console
/// email backend behaves during development.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        if mail.to.is_empty() {
            return Err(MailError::Rejected("no recipients".to_string()));
        }

        let recipients: Vec<String> = mail.to.iter().map(|r| mask_email(r)).collect();
        tracing::info!(
            from = %mail.from,
            to = ?recipients,
            subject = %mail.subject,
            body_len = mail.body.len(),
            "Mail delivered to log"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_mail_without_recipients() {
        let mail = OutgoingMail {
            from: "admin@myblog.com".into(),
            to: vec![],
            subject: "s".into(),
            body: "b".into(),
        };
        assert!(LogMailer::new().send(&mail).await.is_err());
    }
}
