//! Fee records published by venue connectors
//!
//! Two shapes exist. Wallet operations (withdraw/deposit) carry a
//! 3-component record; exchange (trading) fees carry a 4-component record
//! whose trailing component is reserved and currently always zero.
//! Invariant for both: every component is denominated in the record's
//! single declared asset, which the constructors enforce by taking the
//! asset exactly once.

use serde::{Deserialize, Serialize};

use crate::assets::AssetId;
use crate::value_objects::{MonetaryAmount, Number};

/// Fee applied to wallet operations (withdraw or deposit) for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletFee {
    /// Fixed amount charged per operation
    pub fixed: MonetaryAmount,
    /// Proportional rate, expressed as an amount per unit
    pub rate: MonetaryAmount,
    /// Minimum amount accepted for the operation
    pub minimum: MonetaryAmount,
}

impl WalletFee {
    pub fn new(asset: AssetId, fixed: Number, rate: Number, minimum: Number) -> Self {
        WalletFee {
            fixed: MonetaryAmount::new(fixed, asset),
            rate: MonetaryAmount::new(rate, asset),
            minimum: MonetaryAmount::new(minimum, asset),
        }
    }

    pub fn asset(&self) -> AssetId {
        self.fixed.asset
    }
}

/// Fee applied to trades on one directional pair
///
/// Trading fees are charged in the quote asset of whichever direction is
/// executed, so the forward and reverse records of a logical pair are
/// denominated in different assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFee {
    /// Fixed component, zero on venues that only charge proportionally
    pub base: MonetaryAmount,
    /// Proportional trade rate
    pub rate: MonetaryAmount,
    /// Minimum order quantity for the direction
    pub min_quantity: MonetaryAmount,
    /// Reserved component, always zero today
    pub reserved: MonetaryAmount,
}

impl TradeFee {
    pub fn new(asset: AssetId, rate: Number, min_quantity: Number) -> Self {
        TradeFee {
            base: MonetaryAmount::zero(asset),
            rate: MonetaryAmount::new(rate, asset),
            min_quantity: MonetaryAmount::new(min_quantity, asset),
            reserved: MonetaryAmount::zero(asset),
        }
    }

    pub fn asset(&self) -> AssetId {
        self.rate.asset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_fee_components_share_asset() {
        let fee = WalletFee::new(
            AssetId::Btc,
            Number::from_raw(50_000),
            Number::ZERO,
            Number::from_raw(200_000),
        );
        assert_eq!(fee.fixed.asset, AssetId::Btc);
        assert_eq!(fee.rate.asset, AssetId::Btc);
        assert_eq!(fee.minimum.asset, AssetId::Btc);
        assert_eq!(fee.asset(), AssetId::Btc);
    }

    #[test]
    fn test_trade_fee_base_and_reserved_are_zero() {
        let fee = TradeFee::new(AssetId::Eth, Number::from_raw(180_000), Number::ONE);
        assert!(fee.base.is_zero());
        assert!(fee.reserved.is_zero());
        assert_eq!(fee.rate.value, Number::from_raw(180_000));
        assert_eq!(fee.asset(), AssetId::Eth);
    }
}
