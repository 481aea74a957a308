//! # Inkwell Shared
//!
//! Request and response types of the blog HTTP API.
//! Kept free of domain logic so clients can depend on it directly.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
