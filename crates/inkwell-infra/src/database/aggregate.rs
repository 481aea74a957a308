//! Most-commented ranking as one aggregate query.
//!
//! Published posts are left-joined to their active comments, so posts with
//! no comments still rank with a count of zero.

use sea_orm::{DbBackend, FromQueryResult, Statement, Value};

const MOST_COMMENTED: &str = "SELECT p.id, COUNT(c.id) AS active_comments \
    FROM posts p \
    LEFT JOIN comments c ON c.post_id = p.id AND c.active \
    WHERE p.status = 'published' \
    GROUP BY p.id, p.publish \
    ORDER BY active_comments DESC, p.publish DESC, p.id ASC \
    LIMIT $1";

#[derive(Debug, Clone, FromQueryResult)]
pub struct CommentCountRow {
    pub id: uuid::Uuid,
    pub active_comments: i64,
}

/// Top `limit` published posts by active comment count.
pub fn most_commented(limit: u64) -> Statement {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    Statement::from_sql_and_values(DbBackend::Postgres, MOST_COMMENTED, [Value::from(limit)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_only_active_comments_and_binds_limit() {
        let stmt = most_commented(3);
        assert!(stmt.sql.contains("LEFT JOIN comments c ON c.post_id = p.id AND c.active"));
        assert!(stmt.sql.contains("ORDER BY active_comments DESC, p.publish DESC, p.id ASC"));

        let values = stmt.values.expect("statement has bound values").0;
        assert_eq!(values, vec![Value::BigInt(Some(3))]);
    }
}
