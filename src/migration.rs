//! Create the table and backfill columns that older deployments lack.

use crate::error::AppError;
use crate::sql::{Dialect, TABLE};
use sqlx::AnyPool;

/// Columns added after the first release; each is checked and added when missing.
const LATE_COLUMNS: &[&str] = &["viewed"];

/// Idempotent: creates [`TABLE`] if missing, then adds any of [`LATE_COLUMNS`]
/// the existing table does not have. Runs in one transaction.
pub async fn apply_migrations(pool: &AnyPool, dialect: &dyn Dialect) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(&dialect.create_table_statement())
        .execute(&mut *tx)
        .await?;

    for column in LATE_COLUMNS {
        let count: i64 = sqlx::query_scalar(dialect.column_exists_query())
            .bind(TABLE)
            .bind(*column)
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            continue;
        }
        let Some(ddl) = dialect.add_column_statement(column) else {
            continue;
        };
        sqlx::query(&ddl).execute(&mut *tx).await?;
        tracing::info!(table = TABLE, column = *column, "added missing column");
    }

    tx.commit().await?;
    Ok(())
}
