//! Ranking policies - pure functions over posts already fetched from the store.

pub mod commented;
pub mod relevance;
pub mod similar;

pub use commented::rank_by_comment_count;
pub use relevance::{
    LexicalVector, ParsedQuery, ScoredPost, SearchPolicy, Threshold, order_by_rank,
    rank_by_relevance,
};
pub use similar::{rank_by_shared_tags, shared_tag_count};
