//! Form field checks shared by comment and share submissions.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// Accumulates field errors so a form reports all of them at once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required_text(&mut self, field: &str, value: &str, max_chars: Option<usize>) {
        let len = value.chars().count();
        if value.trim().is_empty() {
            self.0.push(format!("{field} is required"));
        } else if let Some(max) = max_chars.filter(|max| len > *max) {
            self.0.push(format!(
                "{field} must be at most {max} characters (got {len})"
            ));
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.0.push(format!("{field} is required"));
        } else if !is_valid_email(value.trim()) {
            self.0.push(format!("{field} must be a valid email address"));
        }
    }

    pub fn finish(self) -> Result<(), Vec<String>> {
        if self.0.is_empty() { Ok(()) } else { Err(self.0) }
    }
}

/// Mask an address for logs: `jane@example.com` becomes `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{}***", first),
                _ => "***".to_string(),
            };
            format!("{}{}", masked_local, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("first.last+blog@mail.example.org"));
        assert!(!is_valid_email("reader@localhost"));
        assert!(!is_valid_email("reader.example.com"));
        assert!(!is_valid_email("a b@example.com"));
    }

    #[test]
    fn test_field_errors_accumulate() {
        let mut errors = FieldErrors::new();
        errors.required_text("name", "", Some(80));
        errors.required_text("body", "fine", None);
        errors.email("email", "nope");
        let errors = errors.finish().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "name is required".to_string(),
                "email must be a valid email address".to_string()
            ]
        );
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane@example.com"), "j***@example.com");
        assert_eq!(mask_email("j@example.com"), "***@example.com");
        assert_eq!(mask_email("garbage"), "***");
    }
}
