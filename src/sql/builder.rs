//! Builds the parameterized SELECT, INSERT, UPDATE, DELETE statements for [`TABLE`].
//! Placeholders are `?`, which both SQLite and MySQL accept.

use crate::sql::dialect::{Dialect, TABLE};

/// SQL text plus the integer parameters to bind, in order.
#[derive(Debug, PartialEq, Eq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<i64>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }
}

/// Records newest first, optionally unviewed only, optionally capped at `limit` rows.
pub fn select_records(dialect: &dyn Dialect, limit: Option<i64>, include_viewed: bool) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", dialect.select_columns(), TABLE);
    if !include_viewed {
        q.sql.push_str(" WHERE viewed = 0");
    }
    q.sql.push_str(" ORDER BY id DESC");
    if let Some(limit) = limit {
        q.sql.push_str(" LIMIT ?");
        q.params.push(limit);
    }
    q
}

pub fn insert_record() -> String {
    format!("INSERT INTO {} (value, viewed) VALUES (?, 0)", TABLE)
}

pub fn mark_viewed() -> String {
    format!("UPDATE {} SET viewed = 1 WHERE id = ?", TABLE)
}

/// Ids of every row past the newest `keep`. Neither backend accepts OFFSET without
/// LIMIT, so the limit is the largest value both take.
pub fn select_ids_beyond(keep: i64) -> QueryBuf {
    QueryBuf {
        sql: format!(
            "SELECT id FROM {} ORDER BY id DESC LIMIT ? OFFSET ?",
            TABLE
        ),
        params: vec![i64::MAX, keep],
    }
}

/// DELETE for an explicit id list. Caller must not pass an empty slice.
pub fn delete_ids(ids: &[i64]) -> QueryBuf {
    let placeholders = vec!["?"; ids.len()].join(", ");
    QueryBuf {
        sql: format!("DELETE FROM {} WHERE id IN ({})", TABLE, placeholders),
        params: ids.to_vec(),
    }
}
