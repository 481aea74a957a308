//! PostgreSQL full-text search statement.
//!
//! Title lexemes are weighted class `A` and body lexemes class `B`;
//! `ts_rank` receives the policy's weights for those classes, so the same
//! statement serves both search modes.

use sea_orm::{DbBackend, FromQueryResult, Statement, Value};

use inkwell_core::ranking::relevance::{SearchPolicy, Threshold, WEIGHT_C, WEIGHT_D};

const DOCUMENT: &str = "setweight(to_tsvector('english', p.title), 'A') || \
                        setweight(to_tsvector('english', p.body), 'B')";

/// A ranked hit before the post itself is loaded.
#[derive(Debug, Clone, FromQueryResult)]
pub struct RankedRow {
    pub id: uuid::Uuid,
    pub rank: f32,
}

/// Build the ranking statement for `query` under `policy`.
pub fn ranked_search(query: &str, policy: &SearchPolicy) -> Statement {
    let filter = match policy.threshold {
        Threshold::MinRank(_) => "ranked.rank >= $4",
        Threshold::AnyMatch => "ranked.matched",
    };
    let sql = format!(
        "SELECT ranked.id, ranked.rank FROM (\
            SELECT p.id, \
                ts_rank(ARRAY[{d}, {c}, $1, $2]::float4[], {doc}, plainto_tsquery('english', $3)) AS rank, \
                ({doc}) @@ plainto_tsquery('english', $3) AS matched \
            FROM posts p \
            WHERE p.status = 'published'\
        ) ranked \
        WHERE {filter}",
        d = WEIGHT_D,
        c = WEIGHT_C,
        doc = DOCUMENT,
        filter = filter,
    );

    let mut values: Vec<Value> = vec![
        policy.body_weight.into(),
        policy.title_weight.into(),
        query.to_string().into(),
    ];
    if let Threshold::MinRank(min) = policy.threshold {
        values.push(min.into());
    }

    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_priority_binds_weights_and_cutoff() {
        let stmt = ranked_search("django", &SearchPolicy::for_mode(true));
        assert!(stmt.sql.contains("ranked.rank >= $4"));

        let values = stmt.values.expect("statement has bound values").0;
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], Value::Float(Some(0.4)));
        assert_eq!(values[1], Value::Float(Some(1.0)));
        assert_eq!(values[2], Value::String(Some(Box::new("django".to_string()))));
        assert_eq!(values[3], Value::Float(Some(0.3)));
    }

    #[test]
    fn test_unweighted_mode_filters_on_match() {
        let stmt = ranked_search("django views", &SearchPolicy::for_mode(false));
        assert!(stmt.sql.contains("WHERE ranked.matched"));
        assert!(!stmt.sql.contains("$4"));
        assert_eq!(stmt.values.expect("statement has bound values").0.len(), 3);
    }
}
