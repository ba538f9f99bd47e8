//! Binary wire protocol for the venue's streaming endpoint
//!
//! Frames are length-delimited binary blobs carrying a bincode-encoded
//! envelope: a numeric message-kind discriminator plus an opaque payload
//! that is decoded according to the kind. A zero-length frame carries no
//! envelope at all — it is the venue's heartbeat.
//!
//! Keeping the envelope's `kind` a plain integer (rather than a closed
//! Rust enum) preserves the distinction between a frame we cannot decode
//! and a frame whose kind we simply do not know yet: the latter is
//! routine and must only be logged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request kinds (gateway → venue)
pub const REQUEST_SUBSCRIBE_ORDER_BOOK: u32 = 1;

/// Response kinds (venue → gateway)
pub const RESPONSE_BOOK_SUBSCRIBED: u32 = 1;
pub const RESPONSE_BOOK_NOTIFY: u32 = 2;
pub const RESPONSE_ERROR: u32 = 3;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("frame encoding failed: {0}")]
    Encode(#[source] bincode::Error),
    #[error("frame decoding failed: {0}")]
    Decode(#[source] bincode::Error),
}

/// Outer envelope of an outbound frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub kind: u32,
    pub payload: Vec<u8>,
}

/// Outer envelope of an inbound frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub kind: u32,
    pub payload: Vec<u8>,
}

/// Subscribe to the order-book channel for one pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeOrderBook {
    /// Pair encoded as `"BASE/QUOTE"`
    pub currency_pair: String,
}

/// Which side of the book an event touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Bid,
    Ask,
}

/// One order-book entry inside a snapshot or diff payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEvent {
    pub kind: EventKind,
    pub price: String,
    pub quantity: String,
}

/// Payload shared by snapshot and diff responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookPayload {
    /// Pair encoded as `"BASE/QUOTE"`
    pub currency_pair: String,
    pub events: Vec<BookEvent>,
}

/// Payload of an error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: i32,
    pub message: String,
}

/// Encode a subscribe request for one pair
pub fn encode_subscribe(currency_pair: &str) -> Result<Vec<u8>, CodecError> {
    let payload = bincode::serialize(&SubscribeOrderBook {
        currency_pair: currency_pair.to_string(),
    })
    .map_err(CodecError::Encode)?;
    bincode::serialize(&RequestEnvelope {
        kind: REQUEST_SUBSCRIBE_ORDER_BOOK,
        payload,
    })
    .map_err(CodecError::Encode)
}

/// Decode the outer envelope of an inbound frame
pub fn decode_response(frame: &[u8]) -> Result<ResponseEnvelope, CodecError> {
    bincode::deserialize(frame).map_err(CodecError::Decode)
}

/// Decode the payload of a snapshot or diff response
pub fn decode_book_payload(payload: &[u8]) -> Result<OrderBookPayload, CodecError> {
    bincode::deserialize(payload).map_err(CodecError::Decode)
}

/// Decode the payload of an error response
pub fn decode_error_payload(payload: &[u8]) -> Result<ErrorPayload, CodecError> {
    bincode::deserialize(payload).map_err(CodecError::Decode)
}
