//! Infrastructure Layer - Inbound adapters from upstream systems
//!
//! This layer contains adapters for systems we consume from:
//! - RestClient: HTTP client for the venue's metadata endpoints
//! - StreamClient: WebSocket client for the venue's order-book stream
//! - Parsers: metadata parsing from the venue's response formats

pub mod parsers;
pub mod rest_client;
pub mod stream_client;

pub use parsers::{
    ParseError, Restrictions, WalletFeeTables, parse_commission, parse_restrictions,
    parse_trading_pairs, parse_wallet_fees,
};
pub use rest_client::{RestClient, RestError};
pub use stream_client::{FrameSink, StreamClient, StreamEvent, WsError};
