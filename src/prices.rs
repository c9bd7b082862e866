//! Prices

use std::ops::Deref;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Currency symbol stripped from upstream price strings.
const CURRENCY_SYMBOL: char = '$';

/// Thousands separator stripped from upstream price strings.
const THOUSANDS_SEPARATOR: char = '.';

/// Errors that can occur while parsing a price string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The cleaned price is not a non-negative integer.
    #[error("invalid price: {raw:?}")]
    Invalid {
        /// The price string as received.
        raw: String,
    },
}

/// Represents a price in minor currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a new Price
    pub fn new(value: u64) -> Self {
        Price { value }
    }

    /// Whether this price is zero.
    pub fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Price as an exact decimal, for discount arithmetic.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.value)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

/// Parse a formatted price string (e.g. `"$1.234"`) into minor units.
///
/// The currency symbol and every `.` thousands separator are removed before
/// the remaining digits are parsed. An empty (or all-whitespace) string is
/// read as a zero price: upstream sources leave the reference price blank
/// when an item is not discounted.
///
/// # Errors
///
/// Returns [`PriceError::Invalid`] if the cleaned string is not a valid
/// non-negative integer.
pub fn parse_price(raw: &str) -> Result<Price, PriceError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Ok(Price::default());
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != CURRENCY_SYMBOL && *c != THOUSANDS_SEPARATOR)
        .collect();

    cleaned
        .parse::<u64>()
        .map(Price::new)
        .map_err(|_err| PriceError::Invalid {
            raw: raw.to_string(),
        })
}
