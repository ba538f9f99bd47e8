//! Shared metadata tables
//!
//! The gateway may be driven from more than one task, so the published
//! tables sit behind a lock instead of relying on single-thread
//! discipline. Writers hold the lock only for the duration of a table
//! swap; readers get cheap clones.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

use hermes_core::{AssetId, MonetaryAmount, Number, TradeFee, TradingPair, WalletFee};

use crate::domain::MetadataStore;

#[derive(Debug, Default)]
struct MetadataTables {
    supported_assets: HashSet<AssetId>,
    withdraw_fees: HashMap<AssetId, WalletFee>,
    deposit_fees: HashMap<AssetId, WalletFee>,
    trading_pairs: Vec<TradingPair>,
    price_precisions: HashMap<TradingPair, MonetaryAmount>,
    min_quantities: HashMap<TradingPair, Number>,
    trade_fees: HashMap<TradingPair, TradeFee>,
}

/// Default [`MetadataStore`] backing the gateway
#[derive(Debug, Default)]
pub struct SharedMetadata {
    tables: RwLock<MetadataTables>,
}

impl SharedMetadata {
    pub fn new() -> Self {
        SharedMetadata::default()
    }

    pub fn supported_assets(&self) -> HashSet<AssetId> {
        self.tables.read().supported_assets.clone()
    }

    pub fn is_supported(&self, asset: AssetId) -> bool {
        self.tables.read().supported_assets.contains(&asset)
    }

    pub fn withdraw_fee(&self, asset: AssetId) -> Option<WalletFee> {
        self.tables.read().withdraw_fees.get(&asset).copied()
    }

    pub fn deposit_fee(&self, asset: AssetId) -> Option<WalletFee> {
        self.tables.read().deposit_fees.get(&asset).copied()
    }

    pub fn trading_pairs(&self) -> Vec<TradingPair> {
        self.tables.read().trading_pairs.clone()
    }

    pub fn price_precision(&self, pair: TradingPair) -> Option<MonetaryAmount> {
        self.tables.read().price_precisions.get(&pair).copied()
    }

    pub fn min_quantity(&self, pair: TradingPair) -> Option<Number> {
        self.tables.read().min_quantities.get(&pair).copied()
    }

    pub fn trade_fee(&self, pair: TradingPair) -> Option<TradeFee> {
        self.tables.read().trade_fees.get(&pair).copied()
    }

    pub fn trade_fee_count(&self) -> usize {
        self.tables.read().trade_fees.len()
    }
}

impl MetadataStore for SharedMetadata {
    fn set_supported_assets(&self, assets: HashSet<AssetId>) {
        self.tables.write().supported_assets = assets;
    }

    fn set_withdraw_fees(&self, fees: HashMap<AssetId, WalletFee>) {
        self.tables.write().withdraw_fees = fees;
    }

    fn set_deposit_fees(&self, fees: HashMap<AssetId, WalletFee>) {
        self.tables.write().deposit_fees = fees;
    }

    fn set_trading_pairs(&self, pairs: Vec<TradingPair>) {
        self.tables.write().trading_pairs = pairs;
    }

    fn set_price_precisions(&self, precisions: HashMap<TradingPair, MonetaryAmount>) {
        self.tables.write().price_precisions = precisions;
    }

    fn set_min_quantities(&self, quantities: HashMap<TradingPair, Number>) {
        self.tables.write().min_quantities = quantities;
    }

    fn set_trade_fees(&self, fees: HashMap<TradingPair, TradeFee>) {
        self.tables.write().trade_fees = fees;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_replace_wholesale() {
        let store = SharedMetadata::new();

        let mut first = HashSet::new();
        first.insert(AssetId::Btc);
        first.insert(AssetId::Eth);
        store.set_supported_assets(first);
        assert_eq!(store.supported_assets().len(), 2);

        let mut second = HashSet::new();
        second.insert(AssetId::Ltc);
        store.set_supported_assets(second);

        let assets = store.supported_assets();
        assert_eq!(assets.len(), 1);
        assert!(assets.contains(&AssetId::Ltc));
        assert!(!store.is_supported(AssetId::Btc));
    }

    #[test]
    fn test_lookups_miss_cleanly() {
        let store = SharedMetadata::new();
        let pair = TradingPair::new(AssetId::Eth, AssetId::Btc);
        assert!(store.withdraw_fee(AssetId::Btc).is_none());
        assert!(store.price_precision(pair).is_none());
        assert!(store.min_quantity(pair).is_none());
        assert!(store.trade_fee(pair).is_none());
        assert!(store.trading_pairs().is_empty());
    }
}
