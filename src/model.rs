//! The stored record and its decoding from a driver-agnostic row.

use crate::error::AppError;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::any::AnyRow;
use sqlx::Row;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NumberRecord {
    pub id: i64,
    pub value: String,
    pub viewed: bool,
    /// As reported by the database; UTC on SQLite, session time zone on MySQL.
    pub created_at: NaiveDateTime,
}

impl NumberRecord {
    pub(crate) fn from_row(row: &AnyRow) -> Result<Self, AppError> {
        let id: i64 = row.try_get("id")?;
        let value: String = row.try_get("value")?;
        let viewed: i64 = row.try_get("viewed")?;
        let created_at: String = row.try_get("created_at")?;
        Ok(NumberRecord {
            id,
            value,
            viewed: viewed != 0,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| AppError::Decode(format!("created_at '{}': {}", s, e)))
}
