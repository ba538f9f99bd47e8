//! Integration test: metadata pipeline against a scripted venue API
//!
//! Drives the full four-stage cycle into the shared metadata store and
//! checks the cross-stage behavior the unit tests cannot see: partial
//! publication on mid-cycle failure, wholesale replacement across
//! cycles, and recovery on the next successful run.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

use hermes_core::{AssetId, Number, TradingPair};
use hermes_gateway::{
    FetchError, MetadataApi, MetadataPipeline, SharedMetadata, Stage,
};

struct ScriptedApi {
    wallet_body: Mutex<String>,
    ticker_body: Mutex<String>,
    restrictions_body: Mutex<String>,
    commission_body: Mutex<String>,
    fail_stage: Mutex<Option<Stage>>,
}

impl ScriptedApi {
    fn new() -> Self {
        let wallet_body = json!({
            "success": true,
            "info": [
                {
                    "symbol": "BTC",
                    "walletStatus": "normal",
                    "withdrawFee": 0.0005,
                    "minWithdrawAmount": " 0.002 ",
                    "minDepositAmount": 0.0001
                },
                {
                    "symbol": "ETH",
                    "walletStatus": "normal",
                    "withdrawFee": 0.01,
                    "minWithdrawAmount": 0.05,
                    "minDepositAmount": 0.01
                },
                { "symbol": "DOGE", "walletStatus": "down" },
                {
                    "symbol": "NOTACOIN",
                    "walletStatus": "normal",
                    "withdrawFee": 1.0,
                    "minWithdrawAmount": 1.0,
                    "minDepositAmount": 1.0
                }
            ]
        })
        .to_string();

        let ticker_body = json!([
            {
                "symbol": "ETH/BTC",
                "max_bid": 0.051, "min_ask": 0.052,
                "best_bid": 0.05, "best_ask": 0.053, "volume": 120.5
            },
            {
                "symbol": "DOGE/BTC",
                "max_bid": 0.0, "min_ask": 0.0,
                "best_bid": 0.0, "best_ask": 0.0, "volume": 0.0
            },
            {
                "symbol": "LTC/BTC",
                "max_bid": 0.002, "min_ask": 0.0021,
                "best_bid": 0.002, "best_ask": 0.0022, "volume": 40.0
            }
        ])
        .to_string();

        let restrictions_body = json!({
            "success": true,
            "restrictions": [
                { "currencyPair": "ETH/BTC", "priceScale": 5, "minLimitQuantity": 0.01 },
                { "currencyPair": "LTC/BTC", "priceScale": 4, "minLimitQuantity": 0.1 },
                { "currencyPair": "NOTACOIN/BTC", "priceScale": 2, "minLimitQuantity": 1.0 }
            ]
        })
        .to_string();

        let commission_body = json!({ "success": true, "fee": "0.0018" }).to_string();

        ScriptedApi {
            wallet_body: Mutex::new(wallet_body),
            ticker_body: Mutex::new(ticker_body),
            restrictions_body: Mutex::new(restrictions_body),
            commission_body: Mutex::new(commission_body),
            fail_stage: Mutex::new(None),
        }
    }

    fn fail_at(&self, stage: Stage) {
        *self.fail_stage.lock() = Some(stage);
    }

    fn heal(&self) {
        *self.fail_stage.lock() = None;
    }

    fn body_or_fail(&self, stage: Stage, body: &Mutex<String>) -> Result<String, FetchError> {
        if *self.fail_stage.lock() == Some(stage) {
            return Err(FetchError::Timeout);
        }
        Ok(body.lock().clone())
    }
}

#[async_trait]
impl MetadataApi for ScriptedApi {
    async fn wallet_fees(&self) -> Result<String, FetchError> {
        self.body_or_fail(Stage::WalletFees, &self.wallet_body)
    }

    async fn ticker(&self) -> Result<String, FetchError> {
        self.body_or_fail(Stage::TradingPairs, &self.ticker_body)
    }

    async fn restrictions(&self) -> Result<String, FetchError> {
        self.body_or_fail(Stage::Restrictions, &self.restrictions_body)
    }

    async fn commission(&self) -> Result<String, FetchError> {
        self.body_or_fail(Stage::Commission, &self.commission_body)
    }
}

fn pipeline() -> (
    Arc<ScriptedApi>,
    Arc<SharedMetadata>,
    MetadataPipeline<ScriptedApi, SharedMetadata>,
) {
    let api = Arc::new(ScriptedApi::new());
    let store = Arc::new(SharedMetadata::new());
    let pipeline = MetadataPipeline::new(Arc::clone(&api), Arc::clone(&store), "livecoin");
    (api, store, pipeline)
}

#[tokio::test]
async fn bootstrap_publishes_all_tables() {
    let (_api, store, pipeline) = pipeline();

    let summary = pipeline.run_once().await.unwrap();
    assert_eq!(summary.supported_assets, 3);
    assert_eq!(summary.trading_pairs, 2);
    assert_eq!(summary.trade_fees, 4);

    // DOGE is supported despite its wallet being down; it just has no fees.
    assert!(store.is_supported(AssetId::Doge));
    assert!(store.withdraw_fee(AssetId::Doge).is_none());
    assert!(store.deposit_fee(AssetId::Doge).is_none());

    // Padded string minimum parsed for BTC.
    let btc_withdraw = store.withdraw_fee(AssetId::Btc).unwrap();
    assert_eq!(btc_withdraw.minimum.value, Number::parse("0.002").unwrap());

    // The all-zero DOGE/BTC ticker record never becomes a pair.
    let pairs = store.trading_pairs();
    let eth_btc = TradingPair::new(AssetId::Eth, AssetId::Btc);
    let ltc_btc = TradingPair::new(AssetId::Ltc, AssetId::Btc);
    assert_eq!(pairs, vec![eth_btc, ltc_btc]);

    // Tick size for priceScale 5 is 10^(8-5) raw units of the base asset.
    let precision = store.price_precision(eth_btc).unwrap();
    assert_eq!(precision.value, Number::from_raw(1_000));
    assert_eq!(precision.asset, AssetId::Eth);
    assert_eq!(
        store.min_quantity(eth_btc).unwrap(),
        Number::parse("0.01").unwrap()
    );

    // Forward fee in the quote asset with the minimum; reverse fee in the
    // base asset with zero minimum.
    let forward = store.trade_fee(eth_btc).unwrap();
    assert_eq!(forward.asset(), AssetId::Btc);
    assert_eq!(forward.rate.value, Number::parse("0.0018").unwrap());
    assert_eq!(forward.min_quantity.value, Number::parse("0.01").unwrap());

    let reverse = store.trade_fee(eth_btc.inverse()).unwrap();
    assert_eq!(reverse.asset(), AssetId::Eth);
    assert!(reverse.min_quantity.is_zero());
}

#[tokio::test]
async fn mid_cycle_failure_keeps_later_tables_and_heals() {
    let (api, store, pipeline) = pipeline();

    pipeline.run_once().await.unwrap();
    let eth_btc = TradingPair::new(AssetId::Eth, AssetId::Btc);
    let first_precision = store.price_precision(eth_btc).unwrap();

    // Second cycle: restrictions endpoint times out. Earlier stages still
    // publish; later tables keep their previous contents.
    *api.wallet_body.lock() = json!({
        "success": true,
        "info": [{
            "symbol": "BTC",
            "walletStatus": "normal",
            "withdrawFee": 0.0005,
            "minWithdrawAmount": 0.002,
            "minDepositAmount": 0.0001
        }]
    })
    .to_string();
    api.fail_at(Stage::Restrictions);

    let err = pipeline.run_once().await.unwrap_err();
    assert_eq!(err.stage, Stage::Restrictions);

    // Wallet stage ran: ETH dropped from the supported set.
    assert!(!store.is_supported(AssetId::Eth));
    assert!(store.is_supported(AssetId::Btc));

    // Restrictions and commission tables are stale but intact.
    assert_eq!(store.price_precision(eth_btc).unwrap(), first_precision);
    assert!(store.trade_fee(eth_btc).is_some());

    // Next period the endpoint is back and the cycle completes.
    api.heal();
    let summary = pipeline.run_once().await.unwrap();
    assert_eq!(summary.supported_assets, 1);
}

#[tokio::test]
async fn identical_cycles_replace_rather_than_accumulate() {
    let (_api, store, pipeline) = pipeline();

    let first = pipeline.run_once().await.unwrap();
    let second = pipeline.run_once().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.trading_pairs().len(), 2);
    assert_eq!(store.trade_fee_count(), 4);
    assert_eq!(store.supported_assets().len(), 3);
}

#[tokio::test]
async fn first_stage_failure_leaves_store_untouched() {
    let (api, store, pipeline) = pipeline();
    api.fail_at(Stage::WalletFees);

    let err = pipeline.run_once().await.unwrap_err();
    assert_eq!(err.stage, Stage::WalletFees);

    assert!(store.supported_assets().is_empty());
    assert!(store.trading_pairs().is_empty());
    assert_eq!(store.trade_fee_count(), 0);
}
