//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use inkwell_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub publish: DateTimeWithTimeZone,
    pub created: DateTimeWithTimeZone,
    pub updated: DateTimeWithTimeZone,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTags,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::post_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Conversion from SeaORM Model to Domain Post; tags are loaded separately.
    pub fn into_domain(
        self,
        tags: std::collections::BTreeSet<inkwell_core::domain::Tag>,
    ) -> Result<inkwell_core::domain::Post, RepoError> {
        let status = self
            .status
            .parse()
            .map_err(|e: String| RepoError::Query(e))?;
        Ok(inkwell_core::domain::Post {
            id: self.id,
            title: self.title,
            slug: self.slug,
            author_id: self.author_id,
            body: self.body,
            publish: self.publish.into(),
            created: self.created.into(),
            updated: self.updated.into(),
            status,
            tags,
        })
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel (tags excluded).
impl From<&inkwell_core::domain::Post> for ActiveModel {
    fn from(post: &inkwell_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title.clone()),
            slug: Set(post.slug.clone()),
            author_id: Set(post.author_id),
            body: Set(post.body.clone()),
            publish: Set(post.publish.into()),
            created: Set(post.created.into()),
            updated: Set(post.updated.into()),
            status: Set(post.status.as_str().to_string()),
        }
    }
}
