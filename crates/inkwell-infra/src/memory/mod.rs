//! In-memory content store.

mod store;

pub use store::InMemoryStore;
