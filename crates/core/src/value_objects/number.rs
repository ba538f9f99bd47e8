//! Fixed-point numeric representation shared by all monetary values
//!
//! Uses i64 with 8 implied decimal places (scale = 100_000_000).
//! Every price, quantity and fee in the system carries this scale, so
//! tick sizes and minimum amounts can be expressed as raw multiples of
//! the smallest representable unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use thiserror::Error;

/// Scale: 8 decimal places
pub const NUMBER_DECIMALS: u32 = 8;
pub const NUMBER_SCALE: i64 = 100_000_000;

/// Powers of ten up to `10^NUMBER_DECIMALS`, indexed by exponent
pub const NUMBER_POW10: [i64; 9] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumberError {
    #[error("empty numeric string")]
    Empty,
    #[error("invalid integer part")]
    InvalidInteger,
    #[error("invalid fractional part")]
    InvalidFraction,
    #[error("value out of representable range")]
    OutOfRange,
}

/// Fixed-point number with 8 decimal places
///
/// Internally stored as i64 where the value represents:
/// actual_value = raw_value / 100_000_000
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Number(i64);

impl Number {
    pub const ZERO: Number = Number(0);
    pub const ONE: Number = Number(NUMBER_SCALE);
    pub const DECIMALS: u32 = NUMBER_DECIMALS;
    pub const SCALE: i64 = NUMBER_SCALE;

    /// Create from raw scaled value
    #[inline(always)]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Create from integer (whole number)
    #[inline(always)]
    pub const fn from_int(value: i64) -> Self {
        Self(value * NUMBER_SCALE)
    }

    /// Get the raw scaled value
    #[inline(always)]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse from string (e.g., "123.45678901")
    ///
    /// Leading/trailing whitespace is accepted; fractional digits beyond
    /// the fixed scale are truncated.
    pub fn parse(text: &str) -> Result<Self, NumberError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NumberError::Empty);
        }

        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let mut parts = text.splitn(2, '.');
        let int_text = parts.next().unwrap_or("");
        let int_part: i64 = int_text.parse().map_err(|_| NumberError::InvalidInteger)?;

        let frac_scaled = match parts.next() {
            Some(frac_text) => {
                if frac_text.is_empty() || !frac_text.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(NumberError::InvalidFraction);
                }
                let digits = if frac_text.len() > NUMBER_DECIMALS as usize {
                    &frac_text[..NUMBER_DECIMALS as usize]
                } else {
                    frac_text
                };
                let frac: i64 = digits.parse().map_err(|_| NumberError::InvalidFraction)?;
                frac * NUMBER_POW10[NUMBER_DECIMALS as usize - digits.len()]
            }
            None => 0,
        };

        let raw = int_part
            .checked_mul(NUMBER_SCALE)
            .and_then(|v| v.checked_add(frac_scaled))
            .ok_or(NumberError::OutOfRange)?;

        Ok(Self(if negative { -raw } else { raw }))
    }

    /// Create from f64, rounding to scale; None for non-finite or
    /// out-of-range input
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = value * NUMBER_SCALE as f64;
        if scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(scaled.round() as i64))
    }

    /// Convert to f64 (for compatibility with external systems)
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / NUMBER_SCALE as f64
    }

    /// Absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:08}",
            sign,
            magnitude / NUMBER_SCALE as u64,
            magnitude % NUMBER_SCALE as u64
        )
    }
}

impl Add for Number {
    type Output = Number;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Number(self.0 + rhs.0)
    }
}

impl Sub for Number {
    type Output = Number;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Number(self.0 - rhs.0)
    }
}

impl Neg for Number {
    type Output = Number;
    #[inline(always)]
    fn neg(self) -> Self::Output {
        Number(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(Number::parse("42").unwrap(), Number::from_int(42));
        assert_eq!(Number::parse("0").unwrap(), Number::ZERO);
        assert_eq!(Number::parse("-3").unwrap(), Number::from_int(-3));
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(Number::parse("0.5").unwrap(), Number::from_raw(50_000_000));
        assert_eq!(
            Number::parse("123.45678901").unwrap(),
            Number::from_raw(12_345_678_901)
        );
        assert_eq!(
            Number::parse("-0.00000001").unwrap(),
            Number::from_raw(-1)
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            Number::parse("  0.25 ").unwrap(),
            Number::from_raw(25_000_000)
        );
    }

    #[test]
    fn test_parse_truncates_excess_digits() {
        // 9 fractional digits: the ninth is dropped, not rounded
        assert_eq!(
            Number::parse("0.123456789").unwrap(),
            Number::from_raw(12_345_678)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Number::parse(""), Err(NumberError::Empty));
        assert_eq!(Number::parse("   "), Err(NumberError::Empty));
        assert_eq!(Number::parse("abc"), Err(NumberError::InvalidInteger));
        assert_eq!(Number::parse("1.x"), Err(NumberError::InvalidFraction));
        assert_eq!(Number::parse("1."), Err(NumberError::InvalidFraction));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(
            Number::parse("99999999999999999999"),
            Err(NumberError::InvalidInteger)
        );
        assert_eq!(
            Number::parse("922337203685.0"),
            Err(NumberError::OutOfRange)
        );
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Number::from_f64(0.5).unwrap(), Number::from_raw(50_000_000));
        assert_eq!(Number::from_f64(0.0).unwrap(), Number::ZERO);
        assert!(Number::from_f64(f64::NAN).is_none());
        assert!(Number::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::from_raw(50_000_000).to_string(), "0.50000000");
        assert_eq!(Number::from_int(2).to_string(), "2.00000000");
        assert_eq!(Number::from_raw(-50_000_000).to_string(), "-0.50000000");
    }

    #[test]
    fn test_pow10_table() {
        assert_eq!(NUMBER_POW10[0], 1);
        assert_eq!(NUMBER_POW10[NUMBER_DECIMALS as usize], NUMBER_SCALE);
    }
}
