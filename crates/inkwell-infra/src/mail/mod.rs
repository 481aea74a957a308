//! Mail transports.

mod log;
mod outbox;

pub use self::log::LogMailer;
pub use outbox::OutboxMailer;
