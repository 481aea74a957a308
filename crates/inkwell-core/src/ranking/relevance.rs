//! Weighted full-text relevance.
//!
//! Weights follow the PostgreSQL text-search classes: `A = 1.0`, `B = 0.4`,
//! `C = 0.2`, `D = 0.1` (the default for unweighted vectors).

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::Post;

pub const WEIGHT_A: f32 = 1.0;
pub const WEIGHT_B: f32 = 0.4;
pub const WEIGHT_C: f32 = 0.2;
pub const WEIGHT_D: f32 = 0.1;

/// Minimum rank a title-prioritized search result must reach.
pub const TITLE_PRIORITY_MIN_RANK: f32 = 0.3;

/// Which results survive a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Threshold {
    /// Keep results whose rank is at least this value.
    MinRank(f32),
    /// Keep results whose document contains every query lexeme.
    AnyMatch,
}

/// Field weights and cut-off used for one search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchPolicy {
    pub title_weight: f32,
    pub body_weight: f32,
    pub threshold: Threshold,
}

impl SearchPolicy {
    pub fn for_mode(prioritize_title: bool) -> Self {
        if prioritize_title {
            Self {
                title_weight: WEIGHT_A,
                body_weight: WEIGHT_B,
                threshold: Threshold::MinRank(TITLE_PRIORITY_MIN_RANK),
            }
        } else {
            Self {
                title_weight: WEIGHT_D,
                body_weight: WEIGHT_D,
                threshold: Threshold::AnyMatch,
            }
        }
    }

    /// Whether a document with `rank` (and full-match flag) is kept.
    pub fn admits(&self, rank: f32, matches_all: bool) -> bool {
        match self.threshold {
            Threshold::MinRank(min) => rank >= min,
            Threshold::AnyMatch => matches_all,
        }
    }
}

/// A post together with its relevance rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPost {
    pub post: Post,
    pub rank: f32,
}

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "he",
    "her", "his", "i", "if", "in", "into", "is", "it", "its", "me", "my", "no", "not", "of", "on",
    "or", "our", "she", "so", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "to", "was", "we", "were", "what", "when", "which", "who", "will", "with",
    "you", "your",
];

/// Split text into normalized lexemes: lowercase alphanumeric runs with
/// common English stop words removed.
pub fn lexemes(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
}

/// Lexeme occurrences of a document, each tagged with its field weight.
#[derive(Debug, Clone, Default)]
pub struct LexicalVector {
    occurrences: HashMap<String, Vec<f32>>,
}

impl LexicalVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every lexeme of `text` with the given weight.
    pub fn add_field(mut self, text: &str, weight: f32) -> Self {
        for lexeme in lexemes(text) {
            self.occurrences.entry(lexeme).or_default().push(weight);
        }
        self
    }

    /// Vector over a post's title and body under `policy`.
    pub fn for_post(post: &Post, policy: &SearchPolicy) -> Self {
        Self::new()
            .add_field(&post.title, policy.title_weight)
            .add_field(&post.body, policy.body_weight)
    }

    /// Whether every lexeme of the query occurs in the document.
    pub fn matches(&self, query: &ParsedQuery) -> bool {
        !query.is_empty() && query.terms.iter().all(|t| self.occurrences.contains_key(t))
    }

    /// Rank in `[0, 1]`.
    ///
    /// Each query lexeme scores `1 - Π(1 - w)` over its occurrences, so
    /// repeated hits saturate rather than add up; the rank is the mean over
    /// distinct query lexemes.
    pub fn rank(&self, query: &ParsedQuery) -> f32 {
        if query.is_empty() {
            return 0.0;
        }
        let total: f32 = query
            .terms
            .iter()
            .map(|term| match self.occurrences.get(term) {
                Some(weights) => 1.0 - weights.iter().map(|w| 1.0 - w.clamp(0.0, 1.0)).product::<f32>(),
                None => 0.0,
            })
            .sum();
        total / query.terms.len() as f32
    }
}

/// Distinct lexemes of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    terms: BTreeSet<String>,
}

impl ParsedQuery {
    pub fn parse(query: &str) -> Self {
        Self {
            terms: lexemes(query).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Score `posts` against `query`, keep those the policy admits, and order
/// them by rank (highest first), then publication (newest first).
pub fn rank_by_relevance(posts: Vec<Post>, query: &str, policy: &SearchPolicy) -> Vec<ScoredPost> {
    let parsed = ParsedQuery::parse(query);
    let scored = posts
        .into_iter()
        .filter_map(|post| {
            let vector = LexicalVector::for_post(&post, policy);
            let rank = vector.rank(&parsed);
            policy
                .admits(rank, vector.matches(&parsed))
                .then_some(ScoredPost { post, rank })
        })
        .collect();
    order_by_rank(scored)
}

/// Rank descending, then publication descending.
pub fn order_by_rank(mut results: Vec<ScoredPost>) -> Vec<ScoredPost> {
    results.sort_by(|a, b| {
        b.rank
            .total_cmp(&a.rank)
            .then_with(|| b.post.publish.cmp(&a.post.publish))
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostStatus;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn post(title: &str, body: &str) -> Post {
        Post::new(Uuid::new_v4(), title.into(), body.into()).with_status(PostStatus::Published)
    }

    fn titles(results: &[ScoredPost]) -> Vec<&str> {
        results.iter().map(|r| r.post.title.as_str()).collect()
    }

    #[test]
    fn test_title_match_outranks_body_match() {
        let posts = vec![
            post("Web Tips", "covers django basics"),
            post("Django Tips", "general web stuff"),
        ];

        let results = rank_by_relevance(posts, "django", &SearchPolicy::for_mode(true));
        assert_eq!(titles(&results), vec!["Django Tips", "Web Tips"]);
        assert!((results[0].rank - 1.0).abs() < f32::EPSILON);
        assert!((results[1].rank - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_min_rank_threshold_drops_weak_matches() {
        let posts = vec![
            post("Django Tips", "general web stuff"),
            post("Unrelated", "nothing about frameworks"),
            // one of two lexemes, body only: 0.4 / 2
            post("Servers", "django notes"),
        ];

        let results = rank_by_relevance(posts, "django deployment", &SearchPolicy::for_mode(true));
        assert_eq!(titles(&results), vec!["Django Tips"]);
    }

    #[test]
    fn test_unweighted_mode_requires_every_lexeme() {
        let posts = vec![
            post("Django Tips", "templates and views"),
            post("Django Basics", "models only"),
        ];

        let results = rank_by_relevance(posts, "django views", &SearchPolicy::for_mode(false));
        assert_eq!(titles(&results), vec!["Django Tips"]);
    }

    #[test]
    fn test_repeated_hits_rank_higher_without_exceeding_one() {
        let posts = vec![
            post("Rust", "notes"),
            post("Rust", "rust rust rust"),
        ];

        let results = rank_by_relevance(posts, "rust", &SearchPolicy::for_mode(false));
        assert_eq!(results[0].post.body, "rust rust rust");
        assert!(results[0].rank > results[1].rank);
        assert!(results[0].rank <= 1.0);
    }

    #[test]
    fn test_equal_rank_prefers_newer_post() {
        let older = post("Rust", "").with_publish(Utc::now() - Duration::days(3));
        let newer = post("Rust", "").with_publish(Utc::now());
        let newer_id = newer.id;

        let results = rank_by_relevance(vec![older, newer], "rust", &SearchPolicy::for_mode(true));
        assert_eq!(results[0].post.id, newer_id);
    }

    #[test]
    fn test_stop_words_only_query_is_empty() {
        assert!(ParsedQuery::parse("the and of").is_empty());
        let vector = LexicalVector::new().add_field("the cat", WEIGHT_A);
        assert_eq!(vector.rank(&ParsedQuery::parse("the")), 0.0);
    }
}
