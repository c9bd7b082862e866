//! Sources
//!
//! Wire types and normalizers for the two upstream payloads. Each normalizer
//! turns its decoded payload into [`Listing`](crate::records::Listing)s in
//! source order.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::prices::PriceError;

/// Implement `Deserialize` for wire types that derive it with
/// `#[serde(remote = "Self")]`, so they decode from JSON objects only.
///
/// A derived struct would otherwise also accept a positional array.
macro_rules! deserialize_from_object {
    ($($wire:ty),+ $(,)?) => {
        $(
            impl<'de> serde::Deserialize<'de> for $wire {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let object = $crate::sources::json_object(deserializer)?;

                    <$wire>::deserialize(object)
                        .map_err(<D::Error as serde::de::Error>::custom)
                }
            }
        )+
    };
}

pub mod catalog;
pub mod inventory;

/// Buffer the next value, failing unless it is a JSON object.
pub(crate) fn json_object<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Map::deserialize(deserializer).map(Value::Object)
}

/// Errors raised while normalizing a decoded payload.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    /// A price string could not be parsed.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// A product references a category id missing from the category list.
    #[error("product {product:?} references unknown category id {category_id}")]
    UnknownCategory {
        /// Product name
        product: String,

        /// The unresolved category id
        category_id: u64,
    },

    /// A product carries no category reference at all.
    #[error("product {product:?} has no category reference")]
    MissingCategory {
        /// Product name
        product: String,
    },

    /// `price * discount` does not fit in a decimal.
    #[error("cash discount for product {product:?} overflows")]
    CashDiscountOverflow {
        /// Product name
        product: String,
    },
}
