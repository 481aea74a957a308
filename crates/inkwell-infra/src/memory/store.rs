//! In-memory content store - used when no database is configured, and in tests.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use inkwell_core::domain::{Comment, Post, Tag, User, unique_slug};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};
use inkwell_core::query::PostQuery;
use inkwell_core::ranking::{self, ScoredPost, SearchPolicy};

#[derive(Default)]
struct StoreState {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    /// Keyed by [`Tag::key`].
    tags: BTreeMap<String, Tag>,
}

impl StoreState {
    /// The stored tag with `tag`'s name, created on first use with a slug no
    /// other tag holds.
    fn resolve_tag(&mut self, tag: Tag) -> Tag {
        let key = tag.key();
        if let Some(existing) = self.tags.get(&key) {
            return existing.clone();
        }
        let slug = unique_slug(&tag.slug, |s| self.tags.values().any(|t| t.slug == s));
        let stored = Tag { slug, ..tag };
        self.tags.insert(key, stored.clone());
        stored
    }
}

/// Users, posts, comments and tags behind one async RwLock.
///
/// Enforces the same references the database schema does: a post needs an
/// existing author, a comment an existing post, and usernames are unique.
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut state = self.state.write().await;
        let taken = state
            .users
            .values()
            .any(|u| u.username == user.username && u.id != user.id);
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if state.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // posts cascade, and their comments with them
        let orphaned: Vec<Uuid> = state
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in orphaned {
            state.posts.remove(&post_id);
            state.comments.retain(|_, c| c.post_id != post_id);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(
                "Referenced entity does not exist".to_string(),
            ));
        }

        // existing tags keep the name and slug they were first created with
        let mut stored = post;
        let tags = std::mem::take(&mut stored.tags);
        stored.tags = tags.into_iter().map(|tag| state.resolve_tag(tag)).collect();

        state.posts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if state.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        state.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn execute(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(query.apply(state.posts.values()))
    }

    async fn count(&self, query: &PostQuery) -> Result<u64, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.values().filter(|p| query.matches(p)).count() as u64)
    }

    async fn search(
        &self,
        query: &str,
        policy: &SearchPolicy,
    ) -> Result<Vec<ScoredPost>, RepoError> {
        let published = self.execute(&PostQuery::published()).await?;
        Ok(ranking::rank_by_relevance(published, query, policy))
    }

    async fn find_tag(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let state = self.state.read().await;
        Ok(state.tags.values().find(|t| t.slug == slug).cloned())
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.state.read().await.comments.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(
                "Referenced entity does not exist".to_string(),
            ));
        }
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        match state.comments.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_for_post(
        &self,
        post_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<Comment>, RepoError> {
        let state = self.state.read().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.post_id == post_id && (c.active || !active_only))
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn most_commented(&self, limit: u64) -> Result<Vec<(Uuid, u64)>, RepoError> {
        let state = self.state.read().await;
        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for comment in state.comments.values().filter(|c| c.active) {
            *counts.entry(comment.post_id).or_default() += 1;
        }

        let mut ranked: Vec<(&Post, u64)> = state
            .posts
            .values()
            .filter(|p| p.is_published())
            .map(|p| (p, counts.get(&p.id).copied().unwrap_or(0)))
            .collect();
        ranked.sort_by_key(|(p, count)| (Reverse(*count), Reverse(p.publish), p.id));
        ranked.truncate(limit as usize);

        Ok(ranked.into_iter().map(|(p, count)| (p.id, count)).collect())
    }
}
