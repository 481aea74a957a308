//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`:
//! the PostgreSQL store, an in-memory store and the mail transports.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;
pub mod mail;
pub mod memory;

pub use database::{DatabaseConfig, DatabaseConnections};
pub use mail::{LogMailer, OutboxMailer};
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::{PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository};
