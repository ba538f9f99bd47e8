//! Metadata bootstrap/refresh pipeline
//!
//! Four stages in fixed dependency order: wallet fees, trading pairs,
//! restrictions (precision + minimum quantities), then commission —
//! which needs both the pair list and the minimum-quantity map. Each
//! successful stage publishes its table into the store before the next
//! stage runs; a failure short-circuits the rest of the cycle with no
//! rollback. Partial publication across a cycle is acceptable because
//! every table is independently replaced wholesale.
//!
//! At bootstrap a failed cycle is fatal to connector construction. In
//! steady state the refresh loop logs the typed failure and retries on
//! the next period.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::MissedTickBehavior;

use hermes_core::TradingPair;

use crate::domain::{FetchError, MetadataApi, MetadataStore};
use crate::infrastructure::parsers::{
    ParseError, parse_commission, parse_restrictions, parse_trading_pairs, parse_wallet_fees,
};

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    WalletFees,
    TradingPairs,
    Restrictions,
    Commission,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::WalletFees => "wallet-fees",
            Stage::TradingPairs => "trading-pairs",
            Stage::Restrictions => "restrictions",
            Stage::Commission => "commission",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StageFailure {
    #[error(transparent)]
    Transport(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Single outcome type for any failed stage
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: StageFailure,
}

impl StageError {
    fn transport(stage: Stage, err: FetchError) -> Self {
        StageError {
            stage,
            source: StageFailure::Transport(err),
        }
    }

    fn parse(stage: Stage, err: ParseError) -> Self {
        StageError {
            stage,
            source: StageFailure::Parse(err),
        }
    }
}

/// Counters from one successful cycle, for the refresh log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub supported_assets: usize,
    pub trading_pairs: usize,
    pub trade_fees: usize,
}

/// Orchestrates the four metadata stages against one venue.
///
/// Generic over:
/// - `A`: MetadataApi - the venue's REST endpoints
/// - `S`: MetadataStore - the externally-owned exchange state
pub struct MetadataPipeline<A, S>
where
    A: MetadataApi + 'static,
    S: MetadataStore + 'static,
{
    api: Arc<A>,
    store: Arc<S>,
    venue: &'static str,
}

impl<A, S> MetadataPipeline<A, S>
where
    A: MetadataApi + 'static,
    S: MetadataStore + 'static,
{
    pub fn new(api: Arc<A>, store: Arc<S>, venue: &'static str) -> Self {
        MetadataPipeline { api, store, venue }
    }

    /// Fetch and parse the pair list without publishing anything
    pub async fn fetch_trading_pairs(&self) -> Result<Vec<TradingPair>, StageError> {
        let body = self
            .api
            .ticker()
            .await
            .map_err(|e| StageError::transport(Stage::TradingPairs, e))?;
        parse_trading_pairs(&body).map_err(|e| StageError::parse(Stage::TradingPairs, e))
    }

    /// Run one full metadata cycle.
    ///
    /// Publishes each stage's tables as soon as that stage succeeds and
    /// returns the first failure untouched.
    pub async fn run_once(&self) -> Result<CycleSummary, StageError> {
        let body = self
            .api
            .wallet_fees()
            .await
            .map_err(|e| StageError::transport(Stage::WalletFees, e))?;
        let wallet = parse_wallet_fees(&body).map_err(|e| StageError::parse(Stage::WalletFees, e))?;
        let supported_assets = wallet.supported.len();
        self.store.set_supported_assets(wallet.supported);
        self.store.set_withdraw_fees(wallet.withdraw);
        self.store.set_deposit_fees(wallet.deposit);

        let pairs = self.fetch_trading_pairs().await?;
        self.store.set_trading_pairs(pairs.clone());

        let body = self
            .api
            .restrictions()
            .await
            .map_err(|e| StageError::transport(Stage::Restrictions, e))?;
        let restrictions =
            parse_restrictions(&body).map_err(|e| StageError::parse(Stage::Restrictions, e))?;
        self.store.set_price_precisions(restrictions.precisions);
        self.store
            .set_min_quantities(restrictions.min_quantities.clone());

        let body = self
            .api
            .commission()
            .await
            .map_err(|e| StageError::transport(Stage::Commission, e))?;
        let fees = parse_commission(&body, &pairs, &restrictions.min_quantities)
            .map_err(|e| StageError::parse(Stage::Commission, e))?;
        let summary = CycleSummary {
            supported_assets,
            trading_pairs: pairs.len(),
            trade_fees: fees.len(),
        };
        self.store.set_trade_fees(fees);

        Ok(summary)
    }

    /// Periodic refresh: run a cycle every `period`, forever.
    ///
    /// Failures are soft — logged with the typed stage error and retried
    /// on the next period.
    pub async fn run_refresh_loop(self: Arc<Self>, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick completes immediately; consume it so the
        // first refresh lands one full period after bootstrap.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            tracing::info!(venue = self.venue, "metadata refresh started");
            match self.run_once().await {
                Ok(summary) => tracing::info!(
                    venue = self.venue,
                    assets = summary.supported_assets,
                    pairs = summary.trading_pairs,
                    fees = summary.trade_fees,
                    "metadata refresh complete"
                ),
                Err(e) => tracing::warn!(
                    venue = self.venue,
                    error = %e,
                    "metadata refresh failed, retrying next period"
                ),
            }
        }
    }
}
