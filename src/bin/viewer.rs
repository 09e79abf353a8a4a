//! Viewer: show the newest number nobody has seen yet and mark it viewed.

use eightdigit::{config::load_config, init_logging, run_viewer, RandomNumberStore};
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = load_config().await?;
    let store = RandomNumberStore::connect(&config.db_url).await?;

    let mut output = tokio::io::stdout();
    let result = run_viewer(&store, &config, &mut output, Duration::from_secs(1)).await;

    store.close().await;
    result?;
    Ok(())
}
