//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Entry point for the HTTP server. Seeds a MultiBook from configuration and
// serves it over the /place_trade and /get_orderbook/:symbol routes.
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;

use tracing::info;

use pricetime_engine::{Api, Config, MultiBook};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("starting matching engine API server");

    let config = Config::from_env();
    info!(symbols = config.symbols.len(), "seeding books");
    let multi_book = Arc::new(MultiBook::seeded(config.symbols.clone()));

    let api = Api::new(config.listen_addr, multi_book);
    api.serve().await?;
    Ok(())
}
