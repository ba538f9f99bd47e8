//! Livecoin connector
//!
//! Metadata comes from four REST endpoints fetched in dependency order;
//! the order book comes from a persistent WebSocket carrying binary
//! envelope frames. Construction runs the metadata bootstrap and fails
//! hard if any stage does — a connector with unknown fee or precision
//! data must not become usable.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use hermes_core::TradingPair;

use crate::application::book_sync::{BookSyncConfig, BookSynchronizer, BookUpdate};
use crate::application::pipeline::{CycleSummary, MetadataPipeline, StageError};
use crate::config::{GlobalConfig, VenueConfig};
use crate::domain::{FetchError, MetadataApi, MetadataStore};
use crate::infrastructure::rest_client::RestClient;

use super::{ConnectorError, ExchangeConnector};

pub const VENUE_NAME: &str = "livecoin";

const COIN_INFO_PATH: &str = "/info/coinInfo";
const TICKER_PATH: &str = "/exchange/ticker";
const RESTRICTIONS_PATH: &str = "/exchange/restrictions";
const COMMISSION_PATH: &str = "/exchange/commission";

/// Livecoin's metadata endpoints over the shared REST client
pub struct LivecoinApi {
    rest: RestClient,
    api_key: String,
    api_sign: String,
}

impl LivecoinApi {
    pub fn new(rest: RestClient, api_key: String, api_sign: String) -> Self {
        LivecoinApi {
            rest,
            api_key,
            api_sign,
        }
    }

    fn auth_headers(&self) -> [(&str, &str); 2] {
        [
            ("Api-Key", self.api_key.as_str()),
            ("Sign", self.api_sign.as_str()),
        ]
    }
}

#[async_trait]
impl MetadataApi for LivecoinApi {
    async fn wallet_fees(&self) -> Result<String, FetchError> {
        Ok(self.rest.get_text(COIN_INFO_PATH).await?)
    }

    async fn ticker(&self) -> Result<String, FetchError> {
        Ok(self.rest.get_text(TICKER_PATH).await?)
    }

    async fn restrictions(&self) -> Result<String, FetchError> {
        Ok(self
            .rest
            .get_text_with_headers(RESTRICTIONS_PATH, &self.auth_headers())
            .await?)
    }

    async fn commission(&self) -> Result<String, FetchError> {
        Ok(self
            .rest
            .get_text_with_headers(COMMISSION_PATH, &self.auth_headers())
            .await?)
    }
}

/// Parse configured "BASE/QUOTE" symbols, warning on unknown entries
fn parse_configured_symbols(symbols: &[String]) -> Vec<TradingPair> {
    let mut pairs = Vec::new();
    for symbol in symbols {
        match TradingPair::from_symbol(symbol) {
            Some(pair) => pairs.push(pair),
            None => tracing::warn!(
                venue = VENUE_NAME,
                symbol = %symbol,
                "ignoring unknown configured symbol"
            ),
        }
    }
    pairs
}

/// The Livecoin venue connector
pub struct Livecoin<S: MetadataStore + 'static> {
    pipeline: Arc<MetadataPipeline<LivecoinApi, S>>,
    venue_config: VenueConfig,
    global_config: GlobalConfig,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
    stream_task: Mutex<Option<JoinHandle<()>>>,
}

impl<S: MetadataStore + 'static> Livecoin<S> {
    /// Build the connector and run the one-shot metadata bootstrap.
    ///
    /// Any failed bootstrap stage aborts construction.
    pub async fn connect(
        venue_config: VenueConfig,
        global_config: GlobalConfig,
        store: Arc<S>,
    ) -> Result<Self, ConnectorError> {
        let rest = RestClient::new(venue_config.rest_url.clone(), venue_config.request_timeout())?;
        let api = LivecoinApi::new(
            rest,
            venue_config.api_key.clone(),
            venue_config.api_sign.clone(),
        );
        let pipeline = Arc::new(MetadataPipeline::new(Arc::new(api), store, VENUE_NAME));

        let summary = pipeline.run_once().await?;
        tracing::info!(
            venue = VENUE_NAME,
            assets = summary.supported_assets,
            pairs = summary.trading_pairs,
            fees = summary.trade_fees,
            "metadata bootstrap complete"
        );

        Ok(Livecoin {
            pipeline,
            venue_config,
            global_config,
            refresh_task: Mutex::new(None),
            stream_task: Mutex::new(None),
        })
    }

    /// Spawn the periodic refresh and the order-book synchronizer.
    ///
    /// Updates flow to `updates` until `shutdown` is called or the
    /// receiver is dropped.
    pub fn start(&self, updates: mpsc::Sender<BookUpdate>) -> Result<(), ConnectorError> {
        let pairs = parse_configured_symbols(&self.venue_config.symbols);
        if pairs.is_empty() {
            return Err(ConnectorError::NoConfiguredPairs);
        }

        let refresh = tokio::spawn(
            Arc::clone(&self.pipeline).run_refresh_loop(self.venue_config.refresh_period()),
        );
        *self.refresh_task.lock() = Some(refresh);

        let synchronizer = BookSynchronizer::new(
            BookSyncConfig {
                ws_url: self.venue_config.ws_url.clone(),
                venue: VENUE_NAME,
                pairs,
                staleness_threshold: self.global_config.heartbeat_staleness_secs,
                safety_check_ticks: self.global_config.safety_check_ticks,
                reconnect_delay: self.global_config.reconnect_delay(),
            },
            updates,
        );
        *self.stream_task.lock() = Some(tokio::spawn(synchronizer.run()));

        Ok(())
    }

    /// Cancel the refresh timer and close the stream.
    ///
    /// Required before dropping the owning runtime: the spawned tasks
    /// hold no other shutdown signal.
    pub fn shutdown(&self) {
        if let Some(task) = self.refresh_task.lock().take() {
            task.abort();
        }
        if let Some(task) = self.stream_task.lock().take() {
            task.abort();
        }
    }
}

impl<S: MetadataStore + 'static> Drop for Livecoin<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<S: MetadataStore + 'static> fmt::Display for Livecoin<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(VENUE_NAME)
    }
}

#[async_trait]
impl<S: MetadataStore + 'static> ExchangeConnector for Livecoin<S> {
    fn name(&self) -> &'static str {
        VENUE_NAME
    }

    async fn refresh_metadata(&self) -> Result<CycleSummary, StageError> {
        self.pipeline.run_once().await
    }

    async fn fetch_trading_pairs(&self) -> Result<Vec<TradingPair>, StageError> {
        self.pipeline.fetch_trading_pairs().await
    }

    fn start(&self, updates: mpsc::Sender<BookUpdate>) -> Result<(), ConnectorError> {
        Livecoin::start(self, updates)
    }

    fn shutdown(&self) {
        Livecoin::shutdown(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::AssetId;

    #[test]
    fn test_parse_configured_symbols_skips_unknown() {
        let symbols = vec![
            "ETH/BTC".to_string(),
            "NOTACOIN/BTC".to_string(),
            "btc/usdt".to_string(),
        ];
        let pairs = parse_configured_symbols(&symbols);
        assert_eq!(
            pairs,
            vec![
                TradingPair::new(AssetId::Eth, AssetId::Btc),
                TradingPair::new(AssetId::Btc, AssetId::Usdt),
            ]
        );
    }
}
