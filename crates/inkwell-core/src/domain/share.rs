use serde::{Deserialize, Serialize};

use crate::validation::FieldErrors;

use super::post::Post;

pub const MAX_SHARER_NAME_LEN: usize = 25;

/// "Email this post to a friend" form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    pub name: String,
    pub email: String,
    pub to: String,
    #[serde(default)]
    pub comments: String,
}

impl ShareRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = FieldErrors::new();
        errors.required_text("name", &self.name, Some(MAX_SHARER_NAME_LEN));
        errors.email("email", &self.email);
        errors.email("to", &self.to);
        errors.finish()
    }

    /// Compose the recommendation mail for `post`, reachable at `post_url`.
    pub fn compose(&self, post: &Post, post_url: &str, from: &str) -> OutgoingMail {
        OutgoingMail {
            from: from.to_string(),
            to: vec![self.to.trim().to_string()],
            subject: format!(
                "{} ({}) recommends you reading \"{}\"",
                self.name, self.email, post.title
            ),
            body: format!(
                "Read \"{}\" at {}\n\n{}'s comments:{}",
                post.title, post_url, self.name, self.comments
            ),
        }
    }
}

/// A plain-text message handed to the mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn request() -> ShareRequest {
        ShareRequest {
            name: "Dan".into(),
            email: "dan@example.com".into(),
            to: "friend@example.com".into(),
            comments: " worth a read".into(),
        }
    }

    #[test]
    fn test_compose_mail() {
        let post = Post::new(Uuid::new_v4(), "Django Tips".into(), String::new());
        let mail = request().compose(&post, "http://blog.test/blog/2024/1/2/django-tips/", "admin@myblog.com");

        assert_eq!(mail.to, vec!["friend@example.com".to_string()]);
        assert_eq!(
            mail.subject,
            "Dan (dan@example.com) recommends you reading \"Django Tips\""
        );
        assert_eq!(
            mail.body,
            "Read \"Django Tips\" at http://blog.test/blog/2024/1/2/django-tips/\n\nDan's comments: worth a read"
        );
    }

    #[test]
    fn test_comments_are_optional() {
        let mut form = request();
        form.comments.clear();
        assert!(form.validate().is_ok());

        form.to = "not-an-address".into();
        form.name = "x".repeat(26);
        assert_eq!(form.validate().unwrap_err().len(), 2);
    }
}
