pub mod amount;
pub mod number;

pub use amount::MonetaryAmount;
pub use number::{NUMBER_DECIMALS, NUMBER_POW10, NUMBER_SCALE, Number, NumberError};
