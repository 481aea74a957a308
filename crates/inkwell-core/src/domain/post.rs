use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::{MAX_SLUG_LEN, is_valid_slug, slugify};
use super::tag::Tag;

/// Longest title a post may carry.
pub const MAX_TITLE_LEN: usize = 250;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(format!("unknown post status '{}'", other)),
        }
    }
}

/// Post entity - a publishable article written by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: PostStatus,
    pub tags: BTreeSet<Tag>,
}

impl Post {
    /// Create a new draft post. The slug is derived from the title.
    pub fn new(author_id: Uuid, title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&title),
            title,
            author_id,
            body,
            publish: now,
            created: now,
            updated: now,
            status: PostStatus::Draft,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_publish(mut self, publish: DateTime<Utc>) -> Self {
        self.publish = publish;
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = collect_tags(tags);
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Calendar day of publication; part of the post's unique key.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// Canonical path of the detail page.
    pub fn absolute_path(&self) -> String {
        format!(
            "/blog/{}/{}/{}/{}/",
            self.publish.year(),
            self.publish.month(),
            self.publish.day(),
            self.slug
        )
    }

    /// Identity keys of the post's tags.
    pub fn tag_keys(&self) -> Vec<String> {
        self.tags.iter().map(Tag::key).collect()
    }

    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated = Utc::now();
    }

    /// Field-level checks, collected rather than short-circuited.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let title_len = self.title.chars().count();
        if self.title.trim().is_empty() {
            errors.push("title is required".to_string());
        } else if title_len > MAX_TITLE_LEN {
            errors.push(format!(
                "title must be at most {} characters (got {})",
                MAX_TITLE_LEN, title_len
            ));
        }
        if !is_valid_slug(&self.slug) {
            errors.push(format!(
                "slug must be 1-{} lowercase letters, digits, '-' or '_'",
                MAX_SLUG_LEN
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Build a tag set from raw labels, skipping blanks and duplicates.
pub fn collect_tags<I, S>(labels: I) -> BTreeSet<Tag>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels
        .into_iter()
        .map(Tag::new)
        .filter(|t| !t.name.is_empty())
        .collect()
}

/// Input for creating a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub body: String,
    #[serde(default)]
    pub publish: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewPost {
    pub fn into_post(self) -> Post {
        let mut post = Post::new(self.author_id, self.title, self.body).with_status(self.status);
        if let Some(slug) = self.slug.filter(|s| !s.trim().is_empty()) {
            post.slug = slug;
        }
        if let Some(publish) = self.publish {
            post.publish = publish;
        }
        post.tags = collect_tags(self.tags);
        post
    }
}

/// Partial update of a post. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub publish: Option<DateTime<Utc>>,
    pub status: Option<PostStatus>,
    pub tags: Option<Vec<String>>,
}

impl PostChanges {
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
        if let Some(publish) = self.publish {
            post.publish = publish;
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        if let Some(tags) = self.tags {
            post.tags = collect_tags(tags);
        }
        post.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_post_is_draft_with_derived_slug() {
        let post = Post::new(Uuid::new_v4(), "Django Tips".into(), "body".into());
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.slug, "django-tips");
        assert_eq!(post.created, post.updated);
    }

    #[test]
    fn test_cyrillic_title_gets_valid_slug() {
        let post = Post::new(Uuid::new_v4(), "Привет мир".into(), "body".into())
            .with_tags(["Питон", "веб"]);
        assert_eq!(post.slug, "privet-mir");
        assert!(post.validate().is_ok());
        assert_eq!(post.tag_keys(), vec!["веб".to_string(), "питон".to_string()]);
    }

    #[test]
    fn test_absolute_path_uses_publish_date() {
        let publish = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        let post = Post::new(Uuid::new_v4(), "Web Tips".into(), String::new()).with_publish(publish);
        assert_eq!(post.absolute_path(), "/blog/2024/3/7/web-tips/");
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let post = Post::new(Uuid::new_v4(), "x".repeat(251), String::new()).with_slug("Bad Slug");
        let errors = post.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_changes_refresh_updated() {
        let mut post = Post::new(Uuid::new_v4(), "Title".into(), "body".into());
        let created = post.created;
        PostChanges {
            body: Some("new body".into()),
            tags: Some(vec!["Python".into(), "python".into(), " ".into()]),
            ..Default::default()
        }
        .apply(&mut post);

        assert_eq!(post.body, "new body");
        assert_eq!(post.tags.len(), 1);
        assert_eq!(post.created, created);
        assert!(post.updated >= created);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        assert_eq!("published".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert!("archived".parse::<PostStatus>().is_err());
        assert_eq!(PostStatus::Draft.to_string(), "draft");
    }
}
