//! Orders and order-book sides as delivered by venue connectors

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assets::TradingPair;
use crate::value_objects::MonetaryAmount;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

/// What an incremental book event means for the level it names.
///
/// Venues report both insertions/changes and removals through the same
/// event shape; a removal is signalled by a zero quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookAction {
    /// Insert the level or replace its quantity
    Upsert,
    /// Remove the level
    Delete,
}

/// A single resting order (price level) on one side of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub pair: TradingPair,
    /// Price, denominated in the pair's quote asset
    pub price: MonetaryAmount,
    /// Quantity, denominated in the pair's base asset
    pub quantity: MonetaryAmount,
    pub side: Side,
}

impl Order {
    /// Resolve the book action this order implies when used as a diff
    pub fn action(&self) -> BookAction {
        if self.quantity.is_zero() {
            BookAction::Delete
        } else {
            BookAction::Upsert
        }
    }
}

/// All orders for one `(pair, side)`, rebuilt wholesale on snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSide {
    pub pair: TradingPair,
    pub side: Side,
    pub orders: Vec<Order>,
}

impl OrderBookSide {
    pub fn new(pair: TradingPair, side: Side, orders: Vec<Order>) -> Self {
        OrderBookSide { pair, side, orders }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
