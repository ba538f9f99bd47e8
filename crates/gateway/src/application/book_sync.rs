//! Order-book synchronizer
//!
//! Owns one streaming session to the venue: subscribes every configured
//! pair, classifies inbound frames, and converts them into order-book
//! updates for the owning system. The synchronizer keeps no book state
//! itself — snapshots are handed off wholesale and diffs are emitted
//! entry by entry.
//!
//! Updates are delivered over a channel rather than invoked inline from
//! the read loop, so consumer code runs serialized on its own task and
//! can never re-enter the frame classification path.

use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use hermes_core::{BookAction, MonetaryAmount, Number, Order, OrderBookSide, Side, TradingPair};

use crate::domain::liveness::{ConnectionState, HeartbeatMonitor};
use crate::domain::protocol::{
    self, BookEvent, CodecError, EventKind, OrderBookPayload,
};
use crate::infrastructure::stream_client::{StreamClient, StreamEvent, WsError};

/// Order-book updates delivered to the owning system
#[derive(Debug, Clone)]
pub enum BookUpdate {
    /// Full replacement state for one pair, `[buy side, sell side]`
    Full {
        pair: TradingPair,
        sides: [OrderBookSide; 2],
    },
    /// One incremental change against the named venue's book
    Delta {
        order: Order,
        venue: &'static str,
        action: BookAction,
    },
}

/// Classified inbound frame
#[derive(Debug)]
pub(crate) enum FrameClass {
    Snapshot(OrderBookPayload),
    Diff(OrderBookPayload),
    VenueError { code: i32, message: String },
    Unrecognized(u32),
}

/// Classify a non-empty binary frame by its response-type tag
pub(crate) fn classify_frame(frame: &[u8]) -> Result<FrameClass, CodecError> {
    let envelope = protocol::decode_response(frame)?;
    match envelope.kind {
        protocol::RESPONSE_BOOK_SUBSCRIBED => Ok(FrameClass::Snapshot(
            protocol::decode_book_payload(&envelope.payload)?,
        )),
        protocol::RESPONSE_BOOK_NOTIFY => Ok(FrameClass::Diff(protocol::decode_book_payload(
            &envelope.payload,
        )?)),
        protocol::RESPONSE_ERROR => {
            let error = protocol::decode_error_payload(&envelope.payload)?;
            Ok(FrameClass::VenueError {
                code: error.code,
                message: error.message,
            })
        }
        other => Ok(FrameClass::Unrecognized(other)),
    }
}

/// Split a payload's events into sell and buy orders.
///
/// Entries whose price or quantity fail to parse are dropped; order is
/// preserved within each side.
pub(crate) fn split_orders(pair: TradingPair, events: &[BookEvent]) -> (Vec<Order>, Vec<Order>) {
    let mut sells = Vec::new();
    let mut buys = Vec::new();

    for event in events {
        let side = match event.kind {
            EventKind::Bid => Side::Buy,
            EventKind::Ask => Side::Sell,
        };
        let (Ok(price), Ok(quantity)) =
            (Number::parse(&event.price), Number::parse(&event.quantity))
        else {
            continue;
        };

        let order = Order {
            pair,
            price: MonetaryAmount::new(price, pair.quote),
            quantity: MonetaryAmount::new(quantity, pair.base),
            side,
        };
        match side {
            Side::Sell => sells.push(order),
            Side::Buy => buys.push(order),
        }
    }

    (sells, buys)
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Ws(#[from] WsError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    /// Liveness check forced a reset
    Stale,
    /// Transport dropped the connection
    Disconnected,
    /// The owning system hung up; the synchronizer is done
    SinkClosed,
}

/// Configuration for one synchronizer instance
#[derive(Debug, Clone)]
pub struct BookSyncConfig {
    pub ws_url: String,
    pub venue: &'static str,
    pub pairs: Vec<TradingPair>,
    /// Ticks of silence tolerated before a forced reconnect
    pub staleness_threshold: u64,
    /// Forced-reset safety check fires every this many ticks
    pub safety_check_ticks: u64,
    /// Pause between sessions
    pub reconnect_delay: Duration,
}

/// Maintains the live stream and feeds updates to the owning system
pub struct BookSynchronizer {
    config: BookSyncConfig,
    updates: mpsc::Sender<BookUpdate>,
}

impl BookSynchronizer {
    pub fn new(config: BookSyncConfig, updates: mpsc::Sender<BookUpdate>) -> Self {
        BookSynchronizer { config, updates }
    }

    /// Run until the owning system drops its receiver.
    ///
    /// Every session that ends for any other reason is followed by a full
    /// reset: reconnect and resubscribe every configured pair.
    pub async fn run(self) {
        let client = StreamClient::new(self.config.ws_url.clone());
        loop {
            match self.run_session(&client).await {
                Ok(SessionEnd::SinkClosed) => {
                    tracing::info!(venue = self.config.venue, "update channel closed, stopping");
                    return;
                }
                Ok(end) => {
                    tracing::warn!(
                        venue = self.config.venue,
                        reason = ?end,
                        "stream session ended, reconnecting"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        venue = self.config.venue,
                        error = %e,
                        "stream session failed, reconnecting"
                    );
                }
            }
            tokio::time::sleep(self.config.reconnect_delay).await;
        }
    }

    async fn run_session(&self, client: &StreamClient) -> Result<SessionEnd, SyncError> {
        let (sink, mut events) = client.connect().await?;
        tracing::debug!(venue = self.config.venue, state = ?ConnectionState::Connected, "transport open");

        for pair in &self.config.pairs {
            sink.send(protocol::encode_subscribe(&pair.symbol())?).await?;
        }
        let mut state = ConnectionState::Subscribed;
        tracing::info!(
            venue = self.config.venue,
            pairs = self.config.pairs.len(),
            state = ?state,
            "subscribed to order-book channels"
        );

        let mut monitor = HeartbeatMonitor::new(self.config.staleness_threshold);
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tick: u64 = 0;

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        return Ok(SessionEnd::Disconnected);
                    };
                    monitor.record_ping(tick);
                    monitor.record_pong(tick);

                    match event {
                        StreamEvent::Heartbeat => {}
                        StreamEvent::Frame(frame) => {
                            if state != ConnectionState::Streaming {
                                state = ConnectionState::Streaming;
                                tracing::debug!(venue = self.config.venue, state = ?state, "stream is live");
                            }
                            if !self.dispatch_frame(&frame).await {
                                return Ok(SessionEnd::SinkClosed);
                            }
                        }
                        StreamEvent::Disconnected => return Ok(SessionEnd::Disconnected),
                        StreamEvent::TransportError(e) => {
                            tracing::warn!(venue = self.config.venue, error = %e, "stream transport error");
                            return Ok(SessionEnd::Disconnected);
                        }
                    }
                }
                _ = ticker.tick() => {
                    tick += 1;
                    if monitor.is_stale(tick) || tick % self.config.safety_check_ticks == 0 {
                        tracing::warn!(
                            venue = self.config.venue,
                            tick,
                            last_pong = monitor.last_pong(),
                            "no traffic from venue, forcing reconnect"
                        );
                        return Ok(SessionEnd::Stale);
                    }
                }
            }
        }
    }

    /// Returns false when the receiving side is gone.
    async fn dispatch_frame(&self, frame: &[u8]) -> bool {
        let class = match classify_frame(frame) {
            Ok(class) => class,
            Err(e) => {
                tracing::warn!(venue = self.config.venue, error = %e, "dropping undecodable frame");
                return true;
            }
        };

        match class {
            FrameClass::Snapshot(payload) => self.dispatch_snapshot(payload).await,
            FrameClass::Diff(payload) => self.dispatch_diff(payload).await,
            FrameClass::VenueError { code, message } => {
                tracing::error!(venue = self.config.venue, code, message = %message, "venue stream error");
                true
            }
            FrameClass::Unrecognized(kind) => {
                tracing::warn!(venue = self.config.venue, kind, "unrecognized response type");
                true
            }
        }
    }

    fn resolve_pair(&self, currency_pair: &str) -> Option<TradingPair> {
        let pair = TradingPair::from_symbol(currency_pair);
        if pair.is_none() {
            tracing::warn!(
                venue = self.config.venue,
                pair = currency_pair,
                "unknown currency pair, dropping frame"
            );
        }
        pair
    }

    async fn dispatch_snapshot(&self, payload: OrderBookPayload) -> bool {
        let Some(pair) = self.resolve_pair(&payload.currency_pair) else {
            return true;
        };

        let (sells, buys) = split_orders(pair, &payload.events);
        let update = BookUpdate::Full {
            pair,
            sides: [
                OrderBookSide::new(pair, Side::Buy, buys),
                OrderBookSide::new(pair, Side::Sell, sells),
            ],
        };
        self.updates.send(update).await.is_ok()
    }

    async fn dispatch_diff(&self, payload: OrderBookPayload) -> bool {
        let Some(pair) = self.resolve_pair(&payload.currency_pair) else {
            return true;
        };

        // Sell-side entries first, matching the source field order.
        let (sells, buys) = split_orders(pair, &payload.events);
        for order in sells.into_iter().chain(buys) {
            let action = order.action();
            let update = BookUpdate::Delta {
                order,
                venue: self.config.venue,
                action,
            };
            if self.updates.send(update).await.is_err() {
                return false;
            }
        }
        true
    }
}
