//! Metadata parsers for the venue's REST responses
//!
//! Four pure functions, one per endpoint. All share the same contract:
//! a body that is not valid JSON, a missing/false success indicator, or a
//! missing required field is a hard error for the whole response, while a
//! record naming an asset or pair the platform does not know is silently
//! skipped — venue listings always contain coins we do not trade.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use hermes_core::{
    AssetId, MonetaryAmount, NUMBER_DECIMALS, NUMBER_POW10, Number, TradeFee, TradingPair,
    WalletFee,
};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("venue reported request failure")]
    RequestFailed,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` has the wrong type")]
    WrongType(&'static str),
    #[error("field `{0}` is not a representable number")]
    BadNumber(&'static str),
    #[error("price scale {0} outside [0, {NUMBER_DECIMALS}]")]
    ScaleOutOfRange(i64),
    #[error("no minimum quantity for pair {0}")]
    MissingLimit(TradingPair),
}

/// Wallet fee tables plus the set of assets the venue lists
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalletFeeTables {
    pub supported: HashSet<AssetId>,
    pub withdraw: HashMap<AssetId, WalletFee>,
    pub deposit: HashMap<AssetId, WalletFee>,
}

/// Price precision and minimum order quantity per pair
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Restrictions {
    pub precisions: HashMap<TradingPair, MonetaryAmount>,
    pub min_quantities: HashMap<TradingPair, Number>,
}

fn parse_document(body: &str) -> Result<Value, ParseError> {
    serde_json::from_str(body).map_err(ParseError::from)
}

fn require_success(doc: &Value) -> Result<(), ParseError> {
    match doc.get("success") {
        Some(Value::Bool(true)) => Ok(()),
        Some(Value::Bool(false)) => Err(ParseError::RequestFailed),
        Some(_) => Err(ParseError::WrongType("success")),
        None => Err(ParseError::MissingField("success")),
    }
}

fn require_array<'a>(doc: &'a Value, field: &'static str) -> Result<&'a [Value], ParseError> {
    match doc.get(field) {
        Some(Value::Array(records)) => Ok(records),
        Some(_) => Err(ParseError::WrongType(field)),
        None => Err(ParseError::MissingField(field)),
    }
}

fn require_str<'a>(record: &'a Value, field: &'static str) -> Result<&'a str, ParseError> {
    match record.get(field) {
        Some(value) => value.as_str().ok_or(ParseError::WrongType(field)),
        None => Err(ParseError::MissingField(field)),
    }
}

fn require_f64(record: &Value, field: &'static str) -> Result<f64, ParseError> {
    match record.get(field) {
        Some(value) => value.as_f64().ok_or(ParseError::WrongType(field)),
        None => Err(ParseError::MissingField(field)),
    }
}

fn require_i64(record: &Value, field: &'static str) -> Result<i64, ParseError> {
    match record.get(field) {
        Some(value) => value.as_i64().ok_or(ParseError::WrongType(field)),
        None => Err(ParseError::MissingField(field)),
    }
}

fn number_from_f64(value: f64, field: &'static str) -> Result<Number, ParseError> {
    Number::from_f64(value).ok_or(ParseError::BadNumber(field))
}

/// The minimum withdraw amount arrives either as a JSON number or as a
/// string that may carry stray whitespace. Both forms are accepted.
fn require_flexible_number(record: &Value, field: &'static str) -> Result<Number, ParseError> {
    match record.get(field) {
        None => Err(ParseError::MissingField(field)),
        Some(value) => {
            if let Some(v) = value.as_f64() {
                return number_from_f64(v, field);
            }
            match value.as_str() {
                Some(text) => Number::parse(text.trim()).map_err(|_| ParseError::BadNumber(field)),
                None => Err(ParseError::WrongType(field)),
            }
        }
    }
}

/// Parse `/info/coinInfo`: wallet status plus withdraw/deposit fees.
///
/// Every recognized asset joins the supported set no matter what its
/// wallet status says. Fee publication is gated per status:
/// - absent status or `"down"`: no fee entries at all
/// - withdraw entry unless `"closed_cashout"`
/// - deposit entry unless `"closed_cashin"` or `"delisted"`
pub fn parse_wallet_fees(body: &str) -> Result<WalletFeeTables, ParseError> {
    let doc = parse_document(body)?;
    require_success(&doc)?;
    let records = require_array(&doc, "info")?;

    let mut tables = WalletFeeTables::default();

    for record in records {
        let symbol = require_str(record, "symbol")?;
        let Some(asset) = AssetId::from_symbol(symbol) else {
            continue;
        };
        tables.supported.insert(asset);

        let Some(status) = record.get("walletStatus").and_then(Value::as_str) else {
            continue;
        };
        if status == "down" {
            continue;
        }

        // Required in every non-suppressed branch, even when the specific
        // entry ends up gated off below.
        let withdraw_fee = number_from_f64(require_f64(record, "withdrawFee")?, "withdrawFee")?;
        let min_withdraw = require_flexible_number(record, "minWithdrawAmount")?;

        if status != "closed_cashout" {
            tables.withdraw.insert(
                asset,
                WalletFee::new(asset, withdraw_fee, Number::ZERO, min_withdraw),
            );
        }

        let min_deposit =
            number_from_f64(require_f64(record, "minDepositAmount")?, "minDepositAmount")?;

        if status != "closed_cashin" && status != "delisted" {
            tables.deposit.insert(
                asset,
                WalletFee::new(asset, Number::ZERO, Number::ZERO, min_deposit),
            );
        }
    }

    Ok(tables)
}

const QUOTE_FIELDS: [&str; 5] = ["max_bid", "min_ask", "best_bid", "best_ask", "volume"];

/// Parse `/exchange/ticker`: the list of tradable pairs.
///
/// A record whose quote fields are all exactly zero is an inactive or
/// delisted pair and is dropped. Output preserves input order.
pub fn parse_trading_pairs(body: &str) -> Result<Vec<TradingPair>, ParseError> {
    let doc = parse_document(body)?;
    let records = doc.as_array().ok_or(ParseError::WrongType("ticker"))?;

    let mut pairs = Vec::new();

    for record in records {
        let symbol = require_str(record, "symbol")?;
        let Some(pair) = TradingPair::from_symbol(symbol) else {
            continue;
        };

        let mut live = false;
        for field in QUOTE_FIELDS {
            if require_f64(record, field)? != 0.0 {
                live = true;
            }
        }
        if !live {
            continue;
        }

        pairs.push(pair);
    }

    Ok(pairs)
}

/// Parse `/exchange/restrictions`: tick size and minimum quantity per pair.
///
/// `priceScale` counts decimal places and must lie in `[0, 8]`; the tick
/// size is `10^(8 - scale)` raw units of the base asset.
pub fn parse_restrictions(body: &str) -> Result<Restrictions, ParseError> {
    let doc = parse_document(body)?;
    require_success(&doc)?;
    let records = require_array(&doc, "restrictions")?;

    let mut restrictions = Restrictions::default();

    for record in records {
        let symbol = require_str(record, "currencyPair")?;
        let Some(pair) = TradingPair::from_symbol(symbol) else {
            continue;
        };

        let scale = require_i64(record, "priceScale")?;
        if scale < 0 || scale > NUMBER_DECIMALS as i64 {
            return Err(ParseError::ScaleOutOfRange(scale));
        }
        let tick = Number::from_raw(NUMBER_POW10[(NUMBER_DECIMALS as i64 - scale) as usize]);
        restrictions
            .precisions
            .insert(pair, MonetaryAmount::new(tick, pair.base));

        let limit = number_from_f64(
            require_f64(record, "minLimitQuantity")?,
            "minLimitQuantity",
        )?;
        restrictions.min_quantities.insert(pair, limit);
    }

    Ok(restrictions)
}

/// Parse `/exchange/commission` and synthesize directional trade fees.
///
/// The venue publishes one global rate. For every listed pair `(A,B)` two
/// records are produced: the forward direction carries the pair's minimum
/// quantity in the quote asset, the reverse direction carries a zero
/// minimum in the base asset — the fee is always charged in the quote
/// asset of whichever direction executes. A pair without a minimum-limit
/// entry is a cross-stage consistency failure.
pub fn parse_commission(
    body: &str,
    pairs: &[TradingPair],
    limits: &HashMap<TradingPair, Number>,
) -> Result<HashMap<TradingPair, TradeFee>, ParseError> {
    let doc = parse_document(body)?;
    require_success(&doc)?;

    let rate_text = require_str(&doc, "fee")?;
    let rate = Number::parse(rate_text).map_err(|_| ParseError::BadNumber("fee"))?;

    let mut fees = HashMap::with_capacity(pairs.len() * 2);

    for pair in pairs {
        let limit = limits
            .get(pair)
            .copied()
            .ok_or(ParseError::MissingLimit(*pair))?;

        fees.insert(*pair, TradeFee::new(pair.quote, rate, limit));
        fees.insert(pair.inverse(), TradeFee::new(pair.base, rate, Number::ZERO));
    }

    Ok(fees)
}
