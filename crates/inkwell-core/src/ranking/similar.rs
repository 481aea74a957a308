//! Tag-overlap ranking.

use std::cmp::Reverse;

use crate::domain::Post;

/// Number of tags `candidate` shares with `post`.
pub fn shared_tag_count(post: &Post, candidate: &Post) -> usize {
    post.tags.intersection(&candidate.tags).count()
}

/// Order `candidates` by shared tags (most first), then by publication
/// (newest first), and keep at most `limit`.
///
/// `post` itself and candidates sharing no tag are dropped, so callers may
/// pass an over-broad candidate list.
pub fn rank_by_shared_tags(post: &Post, candidates: Vec<Post>, limit: usize) -> Vec<Post> {
    if post.tags.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, Post)> = candidates
        .into_iter()
        .filter(|c| c.id != post.id)
        .map(|c| (shared_tag_count(post, &c), c))
        .filter(|(same_tags, _)| *same_tags > 0)
        .collect();

    scored.sort_by_key(|(same_tags, c)| (Reverse(*same_tags), Reverse(c.publish)));
    scored.truncate(limit);
    scored.into_iter().map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostStatus;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn post(title: &str, days_ago: i64, tags: &[&str]) -> Post {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        Post::new(Uuid::new_v4(), title.into(), String::new())
            .with_status(PostStatus::Published)
            .with_publish(base - Duration::days(days_ago))
            .with_tags(tags.iter().copied())
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_more_shared_tags_rank_first() {
        let target = post("target", 0, &["python", "web"]);
        let candidates = vec![
            post("python only", 1, &["python"]),
            post("python and web", 5, &["python", "web"]),
            post("untagged", 2, &[]),
        ];

        let ranked = rank_by_shared_tags(&target, candidates, 4);
        assert_eq!(titles(&ranked), vec!["python and web", "python only"]);
    }

    #[test]
    fn test_ties_break_on_newest_publish() {
        let target = post("target", 0, &["rust"]);
        let candidates = vec![
            post("older", 10, &["rust"]),
            post("newer", 1, &["rust"]),
            post("middle", 4, &["rust"]),
        ];

        let ranked = rank_by_shared_tags(&target, candidates, 2);
        assert_eq!(titles(&ranked), vec!["newer", "middle"]);
    }

    #[test]
    fn test_untagged_post_has_no_similar_posts() {
        let target = post("target", 0, &[]);
        let candidates = vec![post("a", 1, &["rust"]), post("b", 2, &[])];
        assert!(rank_by_shared_tags(&target, candidates, 10).is_empty());
    }

    #[test]
    fn test_tags_with_equal_slugs_do_not_overlap() {
        let target = post("target", 0, &["C"]);
        let candidates = vec![post("cpp", 1, &["C++"]), post("c", 2, &["c"])];

        let ranked = rank_by_shared_tags(&target, candidates, 10);
        assert_eq!(titles(&ranked), vec!["c"]);
    }

    #[test]
    fn test_post_never_similar_to_itself() {
        let target = post("target", 0, &["rust", "web"]);
        let candidates = vec![target.clone(), post("other", 1, &["web"])];

        let ranked = rank_by_shared_tags(&target, candidates, 10);
        assert_eq!(titles(&ranked), vec!["other"]);
    }
}
