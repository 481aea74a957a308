//! SeaORM entities mirroring the schema created by the `migration` crate.

pub mod comment;
pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
