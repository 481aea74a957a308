//! PostgreSQL repository implementations.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{Duration, NaiveTime};
use sea_orm::sea_query::{Expr, Func, Query, SelectStatement};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use inkwell_core::domain::{Comment, Post, Tag, User, tag_key, unique_slug};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};
use inkwell_core::query::PostQuery;
use inkwell_core::ranking::{ScoredPost, SearchPolicy};

use super::aggregate::{self, CommentCountRow};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error, upsert, write_error};
use super::search::{RankedRow, ranked_search};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(
        &self,
        post_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<Comment>, RepoError> {
        let mut select = CommentEntity::find().filter(comment::Column::PostId.eq(post_id));
        if active_only {
            select = select.filter(comment::Column::Active.eq(true));
        }

        let result = select
            .order_by_asc(comment::Column::Created)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn most_commented(&self, limit: u64) -> Result<Vec<(Uuid, u64)>, RepoError> {
        let rows = CommentCountRow::find_by_statement(aggregate::most_commented(limit))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.id, row.active_comments.max(0) as u64))
            .collect())
    }
}

/// PostgreSQL post repository. Tags live in `tags` and `post_tags` and are
/// loaded alongside every post.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Attach tags to post rows, preserving row order.
    async fn hydrate(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let post_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

        let links = PostTagEntity::find()
            .filter(post_tag::Column::PostId.is_in(post_ids))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        let tags: HashMap<Uuid, Tag> = if links.is_empty() {
            HashMap::new()
        } else {
            let tag_ids: BTreeSet<Uuid> = links.iter().map(|l| l.tag_id).collect();
            TagEntity::find()
                .filter(tag::Column::Id.is_in(tag_ids))
                .all(&self.db)
                .await
                .map_err(query_error)?
                .into_iter()
                .map(|m| (m.id, Tag::from(m)))
                .collect()
        };

        let mut by_post: HashMap<Uuid, BTreeSet<Tag>> = HashMap::new();
        for link in links {
            if let Some(tag) = tags.get(&link.tag_id) {
                by_post.entry(link.post_id).or_default().insert(tag.clone());
            }
        }

        models
            .into_iter()
            .map(|m| {
                let post_tags = by_post.remove(&m.id).unwrap_or_default();
                m.into_domain(post_tags)
            })
            .collect()
    }

    /// Make the post's tag links match `tags` exactly and return the stored
    /// tags. Existing tags are matched by case-insensitive name; new ones get
    /// the first free slug.
    async fn replace_tags<C>(
        db: &C,
        post_id: Uuid,
        tags: &BTreeSet<Tag>,
    ) -> Result<BTreeSet<Tag>, RepoError>
    where
        C: ConnectionTrait,
    {
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(db)
            .await
            .map_err(write_error)?;

        if tags.is_empty() {
            return Ok(BTreeSet::new());
        }

        let keys: Vec<String> = tags.iter().map(Tag::key).collect();
        let mut stored: HashMap<String, tag::Model> = TagEntity::find()
            .filter(Expr::expr(Func::lower(Expr::col(tag::Column::Name))).is_in(keys))
            .all(db)
            .await
            .map_err(query_error)?
            .into_iter()
            .map(|m| (tag_key(&m.name), m))
            .collect();

        let mut created: Vec<tag::Model> = Vec::new();
        for tag in tags {
            if stored.contains_key(&tag.key()) {
                continue;
            }
            let taken: BTreeSet<String> = TagEntity::find()
                .select_only()
                .column(tag::Column::Slug)
                .filter(
                    tag::Column::Slug
                        .eq(tag.slug.as_str())
                        .or(tag::Column::Slug.starts_with(format!("{}-", tag.slug))),
                )
                .into_tuple::<String>()
                .all(db)
                .await
                .map_err(query_error)?
                .into_iter()
                .collect();
            let slug = unique_slug(&tag.slug, |s| {
                taken.contains(s) || created.iter().any(|m| m.slug == s)
            });
            let model = tag::Model {
                id: Uuid::new_v4(),
                name: tag.name.clone(),
                slug,
            };
            stored.insert(tag.key(), model.clone());
            created.push(model);
        }

        if !created.is_empty() {
            let new_tags = created.into_iter().map(|m| tag::ActiveModel {
                id: Set(m.id),
                name: Set(m.name),
                slug: Set(m.slug),
            });
            TagEntity::insert_many(new_tags)
                .exec_without_returning(db)
                .await
                .map_err(write_error)?;
        }

        let links = stored.values().map(|t| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(t.id),
        });
        PostTagEntity::insert_many(links)
            .exec_without_returning(db)
            .await
            .map_err(write_error)?;

        Ok(stored.into_values().map(Tag::from).collect())
    }
}

/// Ids of posts carrying any tag whose identity key is in `keys`.
fn tagged_post_ids(keys: &[String]) -> SelectStatement {
    Query::select()
        .column((PostTagEntity, post_tag::Column::PostId))
        .from(PostTagEntity)
        .inner_join(
            TagEntity,
            Expr::col((TagEntity, tag::Column::Id))
                .equals((PostTagEntity, post_tag::Column::TagId)),
        )
        .and_where(
            Expr::expr(Func::lower(Expr::col((TagEntity, tag::Column::Name))))
                .is_in(keys.iter().cloned()),
        )
        .to_owned()
}

/// Translate a [`PostQuery`] into a SeaORM select.
pub(crate) fn select_for(query: &PostQuery) -> Select<PostEntity> {
    let mut select = PostEntity::find();

    if let Some(status) = query.status {
        select = select.filter(post::Column::Status.eq(status.as_str()));
    }
    if let Some(id) = query.exclude_id {
        select = select.filter(post::Column::Id.ne(id));
    }
    if let Some(day) = query.published_on {
        let start = day.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1);
        select = select
            .filter(post::Column::Publish.gte(start))
            .filter(post::Column::Publish.lt(end));
    }
    if let Some(slug) = &query.slug {
        select = select.filter(post::Column::Slug.eq(slug.as_str()));
    }
    if let Some(ids) = &query.ids {
        select = select.filter(post::Column::Id.is_in(ids.iter().copied()));
    }
    if let Some(keys) = &query.tags_any {
        select = select.filter(post::Column::Id.in_subquery(tagged_post_ids(keys)));
    }

    select = select
        .order_by_desc(post::Column::Publish)
        .order_by_asc(post::Column::Id);

    if let Some(offset) = query.offset {
        select = select.offset(offset);
    }
    if let Some(limit) = query.limit {
        select = select.limit(limit);
    }
    select
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        match model {
            Some(model) => Ok(self.hydrate(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        let model = upsert(post::ActiveModel::from(&entity), &txn).await?;
        let tags = Self::replace_tags(&txn, entity.id, &entity.tags).await?;

        txn.commit().await.map_err(write_error)?;
        model.into_domain(tags)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        // comments and tag links go with it (ON DELETE CASCADE)
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn execute(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let models = select_for(query)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        self.hydrate(models).await
    }

    async fn count(&self, query: &PostQuery) -> Result<u64, RepoError> {
        select_for(&query.unsliced())
            .count(&self.db)
            .await
            .map_err(query_error)
    }

    async fn search(
        &self,
        query: &str,
        policy: &SearchPolicy,
    ) -> Result<Vec<ScoredPost>, RepoError> {
        let ranked = RankedRow::find_by_statement(ranked_search(query, policy))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let ranks: HashMap<Uuid, f32> = ranked.into_iter().map(|r| (r.id, r.rank)).collect();
        let models = PostEntity::find()
            .filter(post::Column::Id.is_in(ranks.keys().copied()))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(self
            .hydrate(models)
            .await?
            .into_iter()
            .map(|post| {
                let rank = ranks.get(&post.id).copied().unwrap_or(0.0);
                ScoredPost { post, rank }
            })
            .collect())
    }

    async fn find_tag(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

