//! Outbox mail transport - keeps every message in memory for inspection.

use async_trait::async_trait;
use tokio::sync::Mutex;

use inkwell_core::domain::OutgoingMail;
use inkwell_core::ports::{MailError, Mailer};

#[derive(Debug, Default)]
pub struct OutboxMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub async fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().await.push(mail.clone());
        Ok(())
    }
}
