
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, Tag, User};
use crate::error::RepoError;
use crate::query::PostQuery;
use crate::ranking::{ScoredPost, SearchPolicy};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
///
/// `delete` also removes the post's comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Run a declarative query; the single entry point for post listings.
    async fn execute(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError>;

    /// Number of posts matching the query's filters (slicing is ignored).
    async fn count(&self, query: &PostQuery) -> Result<u64, RepoError>;

    /// Full-text search over published posts, weighted and filtered by
    /// `policy`. Results need not be ordered.
    async fn search(&self, query: &str, policy: &SearchPolicy)
    -> Result<Vec<ScoredPost>, RepoError>;

    /// Look up a tag by slug.
    async fn find_tag(&self, slug: &str) -> Result<Option<Tag>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments of a post, oldest first.
    async fn list_for_post(
        &self,
        post_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<Comment>, RepoError>;

    /// Top `limit` published posts by active comment count, as
    /// `(post_id, count)`. Posts without comments count zero; ties go to the
    /// newest publication, then the lowest id.
    async fn most_commented(&self, limit: u64) -> Result<Vec<(Uuid, u64)>, RepoError>;
}
