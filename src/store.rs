//! `RandomNumberStore`: owns the connection pool and every read/write on `random_numbers`.

use crate::error::AppError;
use crate::migration::apply_migrations;
use crate::model::NumberRecord;
use crate::sql::{self, parse_db_url, Backend, Dialect, QueryBuf};
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::AnyPool;

/// Handle to the backing database. Created once per program run, passed by
/// reference to whatever needs it, and released with [`RandomNumberStore::close`].
pub struct RandomNumberStore {
    pool: AnyPool,
    dialect: &'static dyn Dialect,
}

impl RandomNumberStore {
    /// Open a single-connection pool for `db_url` (see [`sql::parse_db_url`] for accepted forms).
    pub async fn connect(db_url: &str) -> Result<Self, AppError> {
        sqlx::any::install_default_drivers();
        let parsed = parse_db_url(db_url)?;

        let mut options = AnyPoolOptions::new().max_connections(1);
        if parsed.is_in_memory() {
            // An in-memory database lives exactly as long as its connection.
            options = options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = options.connect(&parsed.url).await?;
        tracing::debug!(backend = ?parsed.backend, "connected");

        Ok(RandomNumberStore {
            pool,
            dialect: parsed.backend.dialect(),
        })
    }

    /// The underlying pool, for callers that need raw SQL.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn backend(&self) -> Backend {
        self.dialect.backend()
    }

    /// Ensure the table exists and has a `viewed` column. Safe to call on every start.
    pub async fn initialize(&self) -> Result<(), AppError> {
        apply_migrations(&self.pool, self.dialect).await
    }

    /// Append an unviewed record; id and timestamp come from the database.
    pub async fn insert(&self, value: &str) -> Result<(), AppError> {
        sqlx::query(&sql::insert_record())
            .bind(value)
            .execute(&self.pool)
            .await?;
        tracing::debug!(value, "inserted number");
        Ok(())
    }

    /// Records newest first. `limit` caps the row count; `include_viewed = false`
    /// keeps only unviewed rows.
    pub async fn fetch(
        &self,
        limit: Option<i64>,
        include_viewed: bool,
    ) -> Result<Vec<NumberRecord>, AppError> {
        if let Some(limit) = limit.filter(|l| *l < 0) {
            return Err(AppError::InvalidArgument(format!(
                "limit must not be negative, got {}",
                limit
            )));
        }
        let q = sql::select_records(self.dialect, limit, include_viewed);
        let rows = self.fetch_rows(&q).await?;
        rows.iter().map(NumberRecord::from_row).collect()
    }

    /// The newest record nobody has viewed yet.
    pub async fn fetch_latest_unseen(&self) -> Result<Option<NumberRecord>, AppError> {
        Ok(self.fetch(Some(1), false).await?.into_iter().next())
    }

    /// Flag a record as viewed. Unknown or already-viewed ids are left as they are.
    pub async fn mark_viewed(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(&sql::mark_viewed())
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(id, rows = result.rows_affected(), "marked viewed");
        Ok(())
    }

    /// Keep the `max_records` newest rows and delete the rest. Returns how many rows
    /// were removed; `max_records <= 0` does nothing.
    pub async fn prune_excess(&self, max_records: i64) -> Result<u64, AppError> {
        if max_records <= 0 {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let select = sql::select_ids_beyond(max_records);
        let mut query = sqlx::query_scalar::<_, i64>(&select.sql);
        for p in &select.params {
            query = query.bind(*p);
        }
        let ids = query.fetch_all(&mut *tx).await?;
        if ids.is_empty() {
            tx.commit().await?;
            return Ok(0);
        }

        let delete = sql::delete_ids(&ids);
        let mut query = sqlx::query(&delete.sql);
        for p in &delete.params {
            query = query.bind(*p);
        }
        let deleted = query.execute(&mut *tx).await?.rows_affected();
        tx.commit().await?;

        tracing::info!(deleted, max_records, "pruned old numbers");
        Ok(deleted)
    }

    /// Close the pool, waiting for the connection to be returned.
    pub async fn close(self) {
        self.pool.close().await;
    }

    async fn fetch_rows(&self, q: &QueryBuf) -> Result<Vec<AnyRow>, AppError> {
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(*p);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}
