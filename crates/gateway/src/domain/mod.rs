pub mod liveness;
pub mod protocol;
pub mod traits;

pub use liveness::{ConnectionState, HeartbeatMonitor};
pub use protocol::{
    BookEvent, CodecError, ErrorPayload, EventKind, OrderBookPayload, RequestEnvelope,
    ResponseEnvelope, SubscribeOrderBook,
};
pub use traits::{FetchError, MetadataApi, MetadataStore};
