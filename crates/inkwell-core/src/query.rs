//! Declarative description of a post query.
//!
//! Every read against the content store is expressed as a [`PostQuery`] and
//! handed to [`PostRepository::execute`](crate::ports::PostRepository::execute).
//! Stores translate it into their own language (SQL, in-memory filtering);
//! [`PostQuery::matches`] and [`PostQuery::sort`] define the reference
//! semantics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Post, PostStatus, tag_key};

/// Filters and slicing over posts. Results always come newest publication
/// first, ties broken by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostQuery {
    pub status: Option<PostStatus>,
    /// Keep posts carrying at least one of these tags, by identity key.
    pub tags_any: Option<Vec<String>>,
    /// Keep only these posts.
    pub ids: Option<Vec<Uuid>>,
    pub exclude_id: Option<Uuid>,
    pub published_on: Option<NaiveDate>,
    pub slug: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PostQuery {
    /// All posts, newest publication first.
    pub fn all() -> Self {
        Self::default()
    }

    /// Published posts only, newest publication first.
    pub fn published() -> Self {
        Self::default().status(PostStatus::Published)
    }

    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Tags are given by name or key; both normalize to the same key.
    pub fn tags_any<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags_any = Some(names.into_iter().map(|n| tag_key(n.as_ref())).collect());
        self
    }

    pub fn ids(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.ids = Some(ids.into_iter().collect());
        self
    }

    pub fn exclude(mut self, id: Uuid) -> Self {
        self.exclude_id = Some(id);
        self
    }

    pub fn published_on(mut self, date: NaiveDate) -> Self {
        self.published_on = Some(date);
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The same filters without slicing; used for counting.
    pub fn unsliced(&self) -> Self {
        Self {
            limit: None,
            offset: None,
            ..self.clone()
        }
    }

    /// Whether `post` passes every filter predicate.
    pub fn matches(&self, post: &Post) -> bool {
        if self.status.is_some_and(|status| post.status != status) {
            return false;
        }
        if self.exclude_id == Some(post.id) {
            return false;
        }
        if self.published_on.is_some_and(|day| post.publish_date() != day) {
            return false;
        }
        if self.slug.as_deref().is_some_and(|slug| post.slug != slug) {
            return false;
        }
        if self.ids.as_ref().is_some_and(|ids| !ids.contains(&post.id)) {
            return false;
        }
        if let Some(keys) = &self.tags_any {
            if !post.tags.iter().any(|tag| keys.contains(&tag.key())) {
                return false;
            }
        }
        true
    }

    /// Newest publication first; ties fall back to the id so that results
    /// are deterministic.
    pub fn sort(&self, posts: &mut [Post]) {
        posts.sort_by(|a, b| b.publish.cmp(&a.publish).then_with(|| a.id.cmp(&b.id)));
    }

    /// Apply offset and limit to an already sorted list.
    pub fn slice(&self, posts: Vec<Post>) -> Vec<Post> {
        let offset = self.offset.unwrap_or(0) as usize;
        let iter = posts.into_iter().skip(offset);
        match self.limit {
            Some(limit) => iter.take(limit as usize).collect(),
            None => iter.collect(),
        }
    }

    /// Run the whole query over an in-memory snapshot.
    pub fn apply<'a, I>(&self, posts: I) -> Vec<Post>
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let mut selected: Vec<Post> = posts
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        self.sort(&mut selected);
        self.slice(selected)
    }
}
