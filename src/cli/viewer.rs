//! Viewer program flow: show the newest unseen number once, then count down.

use crate::cli::countdown;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::NumberRecord;
use crate::store::RandomNumberStore;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub const NONE_FOUND: &str = "No numbers found yet. Run the generator first to generate one.";

/// One viewer session. The record shown, if any, is marked viewed before returning.
pub async fn run_viewer<W>(
    store: &RandomNumberStore,
    config: &AppConfig,
    output: &mut W,
    tick: Duration,
) -> Result<Option<NumberRecord>, AppError>
where
    W: AsyncWrite + Unpin,
{
    store.initialize().await?;

    let latest = store.fetch_latest_unseen().await?;
    match &latest {
        None => {
            output.write_all(format!("{}\n", NONE_FOUND).as_bytes()).await?;
        }
        Some(record) => {
            output
                .write_all(format!("Latest random number: {}\n", record.value).as_bytes())
                .await?;
            store.mark_viewed(record.id).await?;
            tracing::info!(id = record.id, "showed number");
        }
    }
    output.flush().await?;

    countdown(output, config.countdown_seconds, tick).await?;
    Ok(latest)
}
