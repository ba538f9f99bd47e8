use anyhow::Context;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use hermes_gateway::{
    BookUpdate, Livecoin, SharedMetadata, config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_file = match std::env::args().nth(1) {
        Some(path) => config::load_config(path)?,
        None => config::load_default_config()?,
    };
    config_file.validate()?;

    let venue_config = config_file
        .get_venue("livecoin")
        .context("livecoin venue missing from config")?
        .clone();

    let store = Arc::new(SharedMetadata::new());
    let connector = Livecoin::connect(venue_config, config_file.global.clone(), Arc::clone(&store))
        .await
        .context("connector bootstrap failed")?;

    let (update_tx, mut update_rx) = mpsc::channel(1024);
    connector.start(update_tx)?;

    loop {
        tokio::select! {
            update = update_rx.recv() => {
                match update {
                    Some(BookUpdate::Full { pair, sides }) => tracing::info!(
                        %pair,
                        buys = sides[0].len(),
                        sells = sides[1].len(),
                        "order book snapshot"
                    ),
                    Some(BookUpdate::Delta { order, venue, action }) => tracing::debug!(
                        venue,
                        pair = %order.pair,
                        side = %order.side,
                        action = ?action,
                        price = %order.price,
                        quantity = %order.quantity,
                        "order delta"
                    ),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    connector.shutdown();
    Ok(())
}
