//! Domain entities - the core business objects.

mod comment;
mod post;
mod share;
mod slug;
mod tag;
mod user;

pub use comment::{Comment, MAX_COMMENT_NAME_LEN, NewComment};
pub use post::{MAX_TITLE_LEN, NewPost, Post, PostChanges, PostStatus, collect_tags};
pub use share::{MAX_SHARER_NAME_LEN, OutgoingMail, ShareRequest};
pub use slug::{MAX_SLUG_LEN, is_valid_slug, slugify, unique_slug};
pub use tag::{FALLBACK_TAG_SLUG, Tag, tag_key};
pub use user::User;
