//! # Inkwell Core
//!
//! The domain layer of the Inkwell blog.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, ports, the post query description, and the ranking policies
//! (tag overlap, comment count, weighted text relevance).

pub mod domain;
pub mod error;
pub mod markup;
pub mod pagination;
pub mod ports;
pub mod query;
pub mod ranking;
pub mod service;
pub mod settings;
pub mod syndication;
pub mod validation;

pub use error::{DomainError, DomainResult, RepoError};
pub use service::BlogService;
