use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assets::AssetId;

use super::number::Number;

/// A fixed-point value denominated in a specific asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonetaryAmount {
    pub value: Number,
    pub asset: AssetId,
}

impl MonetaryAmount {
    pub fn new(value: Number, asset: AssetId) -> Self {
        MonetaryAmount { value, asset }
    }

    /// Zero in the given asset
    pub fn zero(asset: AssetId) -> Self {
        MonetaryAmount {
            value: Number::ZERO,
            asset,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let amount = MonetaryAmount::new(Number::from_raw(50_000_000), AssetId::Btc);
        assert_eq!(amount.to_string(), "0.50000000 BTC");
    }

    #[test]
    fn test_zero() {
        assert!(MonetaryAmount::zero(AssetId::Eth).is_zero());
    }
}
