//! Venue connectors
//!
//! Every venue implements the same capability set: fetch metadata,
//! stream the order book, recover the stream when it goes quiet. New
//! venues add a module here and an [`ExchangeConnector`] implementation;
//! nothing upstream changes.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use hermes_core::TradingPair;

use crate::application::book_sync::BookUpdate;
use crate::application::pipeline::{CycleSummary, StageError};
use crate::infrastructure::rest_client::RestError;

pub mod livecoin;

pub use livecoin::{Livecoin, LivecoinApi};

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("failed to build REST client: {0}")]
    Client(#[from] RestError),
    #[error("metadata bootstrap failed: {0}")]
    Bootstrap(#[from] StageError),
    #[error("no usable trading pairs configured")]
    NoConfiguredPairs,
}

/// Capability set implemented once per venue
#[async_trait]
pub trait ExchangeConnector: Send + Sync {
    /// Venue identifier as it appears in delta updates and logs
    fn name(&self) -> &'static str;

    /// Run one full metadata cycle against the venue's REST API
    async fn refresh_metadata(&self) -> Result<CycleSummary, StageError>;

    /// Fetch the currently tradable pairs without touching published state
    async fn fetch_trading_pairs(&self) -> Result<Vec<TradingPair>, StageError>;

    /// Spawn the periodic metadata refresh and the order-book stream
    fn start(&self, updates: mpsc::Sender<BookUpdate>) -> Result<(), ConnectorError>;

    /// Cancel the refresh timer and close the stream
    fn shutdown(&self);
}
