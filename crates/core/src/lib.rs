pub mod assets;
pub mod fees;
pub mod orders;
pub mod value_objects;

// Re-export value objects at crate root for convenience
pub use value_objects::{
    MonetaryAmount, NUMBER_DECIMALS, NUMBER_POW10, NUMBER_SCALE, Number, NumberError,
};

// Re-export identifiers at crate root
pub use assets::{AssetId, TradingPair};

// Re-export fee and order types at crate root
pub use fees::{TradeFee, WalletFee};
pub use orders::{BookAction, Order, OrderBookSide, Side};
