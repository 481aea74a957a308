//! Blog application service - the operations the HTTP layer calls.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Comment, NewComment, NewPost, OutgoingMail, Post, PostChanges, ShareRequest, Tag, User,
};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::pagination::{Page, Paginator};
use crate::ports::{BaseRepository, CommentRepository, Mailer, PostRepository, UserRepository};
use crate::query::PostQuery;
use crate::ranking::{self, ScoredPost, SearchPolicy};
use crate::settings::BlogSettings;
use crate::syndication::{Feed, FeedItem, SitemapEntry};
use crate::validation::mask_email;

/// Similar posts shown on a detail page.
pub const DETAIL_SIMILAR_POSTS: usize = 4;
pub const DEFAULT_LATEST_POSTS: usize = 5;
pub const DEFAULT_MOST_COMMENTED: usize = 3;

/// A page of published posts, optionally narrowed to one tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListing {
    pub tag: Option<Tag>,
    pub page: Page<Post>,
}

/// Everything the detail page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub similar_posts: Vec<Post>,
}

/// Application service over the content store ports.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
    mailer: Arc<dyn Mailer>,
    settings: Arc<BlogSettings>,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
        mailer: Arc<dyn Mailer>,
        settings: BlogSettings,
    ) -> Self {
        Self {
            posts,
            comments,
            users,
            mailer,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &BlogSettings {
        &self.settings
    }

    /// Absolute URL of a post's detail page.
    pub fn post_url(&self, post: &Post) -> String {
        self.settings.absolute_url(&post.absolute_path())
    }

    // ----- browsing -------------------------------------------------------

    /// Published posts, newest first, paginated.
    ///
    /// An unknown tag is `NotFound`. `raw_page` is the unparsed `?page=`
    /// value: garbage yields the first page, out-of-range the last.
    pub async fn list_posts(
        &self,
        tag_slug: Option<&str>,
        raw_page: Option<&str>,
    ) -> DomainResult<PostListing> {
        let mut query = PostQuery::published();
        let tag = match tag_slug {
            Some(slug) => {
                let tag = self
                    .posts
                    .find_tag(slug)
                    .await?
                    .ok_or_else(|| DomainError::not_found("tag", slug))?;
                query = query.tags_any([tag.key()]);
                Some(tag)
            }
            None => None,
        };

        let total = self.posts.count(&query).await?;
        let paginator = Paginator::new(total, self.settings.list_view.paginate_by);
        let number = paginator.resolve(raw_page);
        let (offset, limit) = paginator.window(number);
        let items = self
            .posts
            .execute(&query.offset(offset).limit(limit))
            .await?;

        Ok(PostListing {
            tag,
            page: paginator.page(number, items),
        })
    }

    /// The published post at `/{year}/{month}/{day}/{slug}/`.
    pub async fn find_published(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> DomainResult<Post> {
        let not_found = || DomainError::not_found("post", format!("{year}/{month}/{day}/{slug}"));
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(not_found)?;
        let query = PostQuery::published().slug(slug).published_on(date).limit(1);
        self.posts
            .execute(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(not_found)
    }

    /// A published post by id.
    pub async fn published_post(&self, id: Uuid) -> DomainResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .filter(Post::is_published)
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    pub async fn post_detail(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> DomainResult<PostDetail> {
        let post = self.find_published(year, month, day, slug).await?;
        let comments = self.comments.list_for_post(post.id, true).await?;
        let similar_posts = self.similar_to(&post, DETAIL_SIMILAR_POSTS).await?;
        Ok(PostDetail {
            post,
            comments,
            similar_posts,
        })
    }

    pub async fn latest_posts(&self, count: usize) -> DomainResult<Vec<Post>> {
        require_limit(count)?;
        Ok(self
            .posts
            .execute(&PostQuery::published().limit(count as u64))
            .await?)
    }

    pub async fn total_posts(&self) -> DomainResult<u64> {
        Ok(self.posts.count(&PostQuery::published()).await?)
    }

    // ----- ranking --------------------------------------------------------

    /// Published posts sharing tags with the given published post.
    pub async fn similar_posts(&self, post_id: Uuid, limit: usize) -> DomainResult<Vec<Post>> {
        require_limit(limit)?;
        let post = self.published_post(post_id).await?;
        self.similar_to(&post, limit).await
    }

    async fn similar_to(&self, post: &Post, limit: usize) -> DomainResult<Vec<Post>> {
        if post.tags.is_empty() {
            return Ok(Vec::new());
        }
        let candidates = self
            .posts
            .execute(
                &PostQuery::published()
                    .tags_any(post.tag_keys())
                    .exclude(post.id),
            )
            .await?;
        tracing::debug!(
            post_id = %post.id,
            candidates = candidates.len(),
            "Ranking similar posts"
        );
        Ok(ranking::rank_by_shared_tags(post, candidates, limit))
    }

    /// Published posts with the most active comments.
    pub async fn most_commented(&self, limit: usize) -> DomainResult<Vec<Post>> {
        require_limit(limit)?;
        let top = self.comments.most_commented(limit as u64).await?;
        let counts: HashMap<Uuid, u64> = top.iter().copied().collect();
        let posts = self
            .posts
            .execute(&PostQuery::published().ids(counts.keys().copied()))
            .await?;
        Ok(ranking::rank_by_comment_count(posts, &counts, limit))
    }

    /// Full-text search over published posts.
    pub async fn search(&self, query: &str, prioritize_title: bool) -> DomainResult<Vec<ScoredPost>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::InvalidArgument(
                "search query must not be blank".to_string(),
            ));
        }
        let policy = SearchPolicy::for_mode(prioritize_title);
        let results = self.posts.search(query, &policy).await?;
        tracing::debug!(
            query = %query,
            prioritize_title,
            hits = results.len(),
            "Search executed"
        );
        Ok(ranking::order_by_rank(results))
    }

    // ----- comments -------------------------------------------------------

    /// Attach a reader comment to a published post.
    pub async fn add_comment(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
        form: NewComment,
    ) -> DomainResult<Comment> {
        let post = self.find_published(year, month, day, slug).await?;
        form.validate().map_err(DomainError::Validation)?;
        let comment = self.comments.save(form.into_comment(post.id)).await?;
        tracing::info!(
            post_id = %post.id,
            comment_id = %comment.id,
            email = %mask_email(&comment.email),
            "Comment added"
        );
        Ok(comment)
    }

    /// Moderation: show or hide a comment.
    pub async fn set_comment_active(&self, comment_id: Uuid, active: bool) -> DomainResult<Comment> {
        let mut comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("comment", comment_id))?;
        comment.set_active(active);
        let comment = self.comments.save(comment).await?;
        tracing::info!(comment_id = %comment.id, active, "Comment moderated");
        Ok(comment)
    }

    /// All comments of a post, hidden ones included, oldest first.
    pub async fn list_comments(&self, post_id: Uuid) -> DomainResult<Vec<Comment>> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;
        Ok(self.comments.list_for_post(post_id, false).await?)
    }

    // ----- sharing --------------------------------------------------------

    /// Mail a recommendation of a published post.
    pub async fn share_post(&self, post_id: Uuid, form: ShareRequest) -> DomainResult<OutgoingMail> {
        let post = self.published_post(post_id).await?;
        form.validate().map_err(DomainError::Validation)?;
        let mail = form.compose(&post, &self.post_url(&post), &self.settings.mail_from);
        self.mailer
            .send(&mail)
            .await
            .map_err(|e| DomainError::Mail(e.to_string()))?;
        tracing::info!(
            post_id = %post.id,
            to = %mask_email(&form.to),
            "Post shared by email"
        );
        Ok(mail)
    }

    // ----- authoring ------------------------------------------------------

    pub async fn create_user(&self, username: String, email: String) -> DomainResult<User> {
        let mut errors = crate::validation::FieldErrors::new();
        errors.required_text("username", &username, Some(150));
        errors.email("email", &email);
        errors.finish().map_err(DomainError::Validation)?;

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "username '{}' is taken",
                username
            )));
        }
        let user = self
            .users
            .save(User::new(username, email))
            .await
            .map_err(constraint_as_duplicate)?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    pub async fn create_post(&self, input: NewPost) -> DomainResult<Post> {
        self.users
            .find_by_id(input.author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", input.author_id))?;

        let post = input.into_post();
        self.store_post(post).await
    }

    pub async fn update_post(&self, id: Uuid, changes: PostChanges) -> DomainResult<Post> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;
        changes.apply(&mut post);
        self.store_post(post).await
    }

    /// Delete a post together with its comments.
    pub async fn delete_post(&self, id: Uuid) -> DomainResult<()> {
        match self.posts.delete(id).await {
            Ok(()) => {
                tracing::info!(post_id = %id, "Post deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(DomainError::not_found("post", id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn store_post(&self, post: Post) -> DomainResult<Post> {
        post.validate().map_err(DomainError::Validation)?;

        let clash = PostQuery::all()
            .slug(post.slug.clone())
            .published_on(post.publish_date())
            .exclude(post.id)
            .limit(1);
        if !self.posts.execute(&clash).await?.is_empty() {
            return Err(DomainError::Duplicate(format!(
                "a post with slug '{}' is already published on {}",
                post.slug,
                post.publish_date()
            )));
        }

        let saved = self
            .posts
            .save(post)
            .await
            .map_err(constraint_as_duplicate)?;
        tracing::info!(post_id = %saved.id, slug = %saved.slug, status = %saved.status, "Post saved");
        Ok(saved)
    }

    // ----- syndication ----------------------------------------------------

    /// Channel with the latest published posts.
    pub async fn feed(&self) -> DomainResult<Feed> {
        let config = &self.settings.feed;
        let posts = self
            .posts
            .execute(&PostQuery::published().limit(config.items as u64))
            .await?;
        let items = posts
            .iter()
            .map(|p| FeedItem::from_post(p, &self.settings))
            .collect();
        Ok(Feed::new(config, &self.settings, items))
    }

    /// One entry per published post.
    pub async fn sitemap_entries(&self) -> DomainResult<Vec<SitemapEntry>> {
        let posts = self.posts.execute(&PostQuery::published()).await?;
        Ok(posts
            .iter()
            .map(|p| SitemapEntry::from_post(p, &self.settings))
            .collect())
    }
}

fn require_limit(limit: usize) -> DomainResult<()> {
    if limit == 0 {
        return Err(DomainError::InvalidArgument(
            "limit must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn constraint_as_duplicate(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(msg) => DomainError::Duplicate(msg),
        other => other.into(),
    }
}
