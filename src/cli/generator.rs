//! Generator program flow: prune, ask, then show history or add a fresh number.

use crate::cli::{choose_action, format_history, wait_for_enter, Action};
use crate::config::AppConfig;
use crate::digits::generate_digits_with;
use crate::error::AppError;
use crate::store::RandomNumberStore;
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};

/// One interactive generator session. Returns the number it generated, if any.
///
/// The history view only reads; it never marks records viewed.
pub async fn run_generator<R, W, G>(
    store: &RandomNumberStore,
    config: &AppConfig,
    input: &mut R,
    output: &mut W,
    rng: &mut G,
) -> Result<Option<String>, AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    G: Rng,
{
    store.initialize().await?;
    store.prune_excess(config.max_records).await?;

    let generated = match choose_action(input, output).await? {
        Action::ViewHistory => {
            show_history(store, config, output).await?;
            None
        }
        Action::Generate => {
            let value = generate_digits_with(rng, config.digit_length)?;
            store.insert(&value).await?;
            tracing::info!(value = %value, "generated number");
            output
                .write_all(format!("\nCurrent random number: {}\n\n", value).as_bytes())
                .await?;
            show_history(store, config, output).await?;
            store.prune_excess(config.max_records).await?;
            Some(value)
        }
    };

    wait_for_enter(input, output, "\nPress Enter to exit...").await?;
    Ok(generated)
}

async fn show_history<W>(
    store: &RandomNumberStore,
    config: &AppConfig,
    output: &mut W,
) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    let records = store.fetch(Some(config.history_limit), true).await?;
    output.write_all(format_history(&records).as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
