use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::FieldErrors;

pub const MAX_COMMENT_NAME_LEN: usize = 80;

/// Comment entity - a reader's reply to a post.
///
/// Moderation hides a comment by clearing `active`; hidden comments are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub active: bool,
}

impl Comment {
    pub fn new(post_id: Uuid, name: String, email: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            name,
            email,
            body,
            created: now,
            updated: now,
            active: true,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated = Utc::now();
    }
}

/// Reader-submitted comment form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = FieldErrors::new();
        errors.required_text("name", &self.name, Some(MAX_COMMENT_NAME_LEN));
        errors.email("email", &self.email);
        errors.required_text("body", &self.body, None);
        errors.finish()
    }

    pub fn into_comment(self, post_id: Uuid) -> Comment {
        Comment::new(
            post_id,
            self.name.trim().to_string(),
            self.email.trim().to_string(),
            self.body,
        )
    }
}
