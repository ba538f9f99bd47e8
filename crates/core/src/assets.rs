//! Asset and trading-pair identifiers
//!
//! Assets are a closed enumeration: venue payloads routinely list coins
//! the platform does not trade, and an unknown symbol is never an error —
//! the record that carries it is simply skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier for a tradable asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetId {
    Btc,
    Eth,
    Ltc,
    Bch,
    Etc,
    Dash,
    Zec,
    Xmr,
    Doge,
    Xrp,
    Xlm,
    Trx,
    Eos,
    Ada,
    Atom,
    Dot,
    Sol,
    Link,
    Uni,
    Bnb,
    Usdt,
    Usdc,
    Dai,
    Pol,
}

impl AssetId {
    /// Look up an asset from its textual symbol (case-insensitive).
    ///
    /// Returns None for symbols the platform does not know about.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim().to_ascii_uppercase();
        Some(match symbol.as_str() {
            "BTC" => AssetId::Btc,
            "ETH" => AssetId::Eth,
            "LTC" => AssetId::Ltc,
            "BCH" => AssetId::Bch,
            "ETC" => AssetId::Etc,
            "DASH" => AssetId::Dash,
            "ZEC" => AssetId::Zec,
            "XMR" => AssetId::Xmr,
            "DOGE" => AssetId::Doge,
            "XRP" => AssetId::Xrp,
            "XLM" => AssetId::Xlm,
            "TRX" => AssetId::Trx,
            "EOS" => AssetId::Eos,
            "ADA" => AssetId::Ada,
            "ATOM" => AssetId::Atom,
            "DOT" => AssetId::Dot,
            "SOL" => AssetId::Sol,
            "LINK" => AssetId::Link,
            "UNI" => AssetId::Uni,
            "BNB" => AssetId::Bnb,
            "USDT" => AssetId::Usdt,
            "USDC" => AssetId::Usdc,
            "DAI" => AssetId::Dai,
            "POL" => AssetId::Pol,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetId::Btc => "BTC",
            AssetId::Eth => "ETH",
            AssetId::Ltc => "LTC",
            AssetId::Bch => "BCH",
            AssetId::Etc => "ETC",
            AssetId::Dash => "DASH",
            AssetId::Zec => "ZEC",
            AssetId::Xmr => "XMR",
            AssetId::Doge => "DOGE",
            AssetId::Xrp => "XRP",
            AssetId::Xlm => "XLM",
            AssetId::Trx => "TRX",
            AssetId::Eos => "EOS",
            AssetId::Ada => "ADA",
            AssetId::Atom => "ATOM",
            AssetId::Dot => "DOT",
            AssetId::Sol => "SOL",
            AssetId::Link => "LINK",
            AssetId::Uni => "UNI",
            AssetId::Bnb => "BNB",
            AssetId::Usdt => "USDT",
            AssetId::Usdc => "USDC",
            AssetId::Dai => "DAI",
            AssetId::Pol => "POL",
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directional `(base, quote)` asset combination
///
/// Pairs are directional: `(A,B)` and `(B,A)` are distinct entries with
/// independently computed fee structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TradingPair {
    pub base: AssetId,
    pub quote: AssetId,
}

impl TradingPair {
    pub fn new(base: AssetId, quote: AssetId) -> Self {
        TradingPair { base, quote }
    }

    /// The opposite direction of this pair
    pub fn inverse(&self) -> Self {
        TradingPair {
            base: self.quote,
            quote: self.base,
        }
    }

    /// Parse from the venue's `"BASE/QUOTE"` encoding.
    ///
    /// Returns None unless the string splits into exactly two recognized
    /// asset symbols.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let mut parts = symbol.split('/');
        let base = AssetId::from_symbol(parts.next()?)?;
        let quote = AssetId::from_symbol(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(TradingPair { base, quote })
    }

    /// The venue's `"BASE/QUOTE"` encoding of this pair
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
