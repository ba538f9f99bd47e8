//! Gateway Crate
//!
//! Market data gateway for connecting to trading venues: keeps
//! fee/precision/pair metadata fresh over REST and maintains a live
//! order-book stream per venue.
//!
//! # Architecture
//!
//! The gateway:
//! - Bootstraps venue metadata over REST at construction (fatal on failure)
//! - Refreshes the same metadata on a fixed period (soft failure, retried)
//! - Subscribes the venue's order-book stream and classifies every frame
//! - Forwards snapshots and per-order deltas to the owning system
//!
//! ```text
//! ┌───────────────────────────── Venue ─────────────────────────────┐
//! │        REST (metadata)                WebSocket (order book)    │
//! └──────────────┬──────────────────────────────┬───────────────────┘
//!                ▼                              ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           Gateway                                │
//! │  ┌─────────────────────┐        ┌─────────────────────────────┐  │
//! │  │  MetadataPipeline   │        │      BookSynchronizer       │  │
//! │  │  wallet fees        │        │  classify: snapshot / diff  │  │
//! │  │  → trading pairs    │        │  / error / heartbeat        │  │
//! │  │  → restrictions     │        │  liveness + reconnect       │  │
//! │  │  → commission       │        └──────────────┬──────────────┘  │
//! │  └──────────┬──────────┘                       │                 │
//! │             ▼                                  ▼                 │
//! │      SharedMetadata                  mpsc<BookUpdate>            │
//! │      (published tables)              (snapshots + deltas)        │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod venues;

// Re-export key types
pub use domain::liveness::{ConnectionState, HeartbeatMonitor};
pub use domain::protocol::{BookEvent, CodecError, EventKind, OrderBookPayload};
pub use domain::traits::{FetchError, MetadataApi, MetadataStore};

pub use application::book_sync::{BookSyncConfig, BookSynchronizer, BookUpdate};
pub use application::pipeline::{CycleSummary, MetadataPipeline, Stage, StageError, StageFailure};
pub use application::store::SharedMetadata;

pub use infrastructure::parsers::{
    ParseError, Restrictions, WalletFeeTables, parse_commission, parse_restrictions,
    parse_trading_pairs, parse_wallet_fees,
};
pub use infrastructure::rest_client::{RestClient, RestError};
pub use infrastructure::stream_client::{FrameSink, StreamClient, StreamEvent, WsError};

pub use venues::{ConnectorError, ExchangeConnector, Livecoin, LivecoinApi};

pub use config::{ConfigError, GatewayConfigFile, VenueConfig, load_config, load_default_config};
