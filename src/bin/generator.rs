//! Generator: prune old numbers, then show history or store a fresh random number.

use eightdigit::{config::load_config, init_logging, run_generator, RandomNumberStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = load_config().await?;
    let store = RandomNumberStore::connect(&config.db_url).await?;
    tracing::debug!(backend = ?store.backend(), max_records = config.max_records, "store ready");

    let mut input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    let mut rng = StdRng::from_entropy();
    let result = run_generator(&store, &config, &mut input, &mut output, &mut rng).await;

    store.close().await;
    result?;
    Ok(())
}
