use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use hermes_core::{AssetId, MonetaryAmount, Number, TradeFee, TradingPair, WalletFee};

/// Domain-level transport failure for metadata requests
///
/// Deliberately typed rather than a bare success flag: the refresh logger
/// distinguishes a timeout from a refused connection from an HTTP status.
/// Infrastructure implementations convert their specific errors to this
/// type to keep the dependency direction infrastructure -> domain.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

/// The venue's four metadata endpoints, as raw response bodies.
///
/// Kept at the granularity of one method per endpoint so tests can mock
/// individual stages of the bootstrap chain.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Wallet status plus withdraw/deposit fee schedule per asset
    async fn wallet_fees(&self) -> Result<String, FetchError>;

    /// Ticker listing every tradable pair with current quotes
    async fn ticker(&self) -> Result<String, FetchError>;

    /// Price precision and minimum order quantity per pair (authenticated)
    async fn restrictions(&self) -> Result<String, FetchError>;

    /// Global trade commission rate
    async fn commission(&self) -> Result<String, FetchError>;
}

/// The externally-owned exchange state that metadata cycles publish into.
///
/// Every setter replaces the whole table: a successful parse always
/// produces the complete new truth for its endpoint, so two identical
/// cycles leave identical state behind.
pub trait MetadataStore: Send + Sync {
    fn set_supported_assets(&self, assets: HashSet<AssetId>);
    fn set_withdraw_fees(&self, fees: HashMap<AssetId, WalletFee>);
    fn set_deposit_fees(&self, fees: HashMap<AssetId, WalletFee>);
    fn set_trading_pairs(&self, pairs: Vec<TradingPair>);
    fn set_price_precisions(&self, precisions: HashMap<TradingPair, MonetaryAmount>);
    fn set_min_quantities(&self, quantities: HashMap<TradingPair, Number>);
    fn set_trade_fees(&self, fees: HashMap<TradingPair, TradeFee>);
}
