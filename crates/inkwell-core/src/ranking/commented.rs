//! Comment-count ranking.

use std::cmp::Reverse;
use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::Post;

/// Order posts by active comment count, most first, keeping at most `limit`.
///
/// `counts` holds active comments per post id; missing entries count as
/// zero. The sort is stable, so equal counts keep the incoming order (the
/// store's default newest-first ordering).
pub fn rank_by_comment_count(
    posts: Vec<Post>,
    counts: &HashMap<Uuid, u64>,
    limit: usize,
) -> Vec<Post> {
    let mut posts = posts;
    posts.sort_by_key(|p| Reverse(counts.get(&p.id).copied().unwrap_or(0)));
    posts.truncate(limit);
    posts
}
