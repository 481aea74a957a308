//! Outbound mail port.

use async_trait::async_trait;

use crate::domain::OutgoingMail;

/// Mail transport trait - abstraction over SMTP relays, log sinks, test outboxes.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand a message to the transport.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Transport unavailable: {0}")]
    Transport(String),

    #[error("Rejected recipient: {0}")]
    Rejected(String),
}
