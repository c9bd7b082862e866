//! Inventory source
//!
//! The inventory payload keeps categories and products in two flat lists.
//! Products point at their category by id, and every numeric field arrives
//! already typed.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::debug;

use crate::{
    prices::Price,
    records::{Listing, Origin, SourceKind},
    sources::NormalizeError,
};

/// Decoded inventory payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(remote = "Self")]
pub struct InventoryPayload {
    /// Known categories, in no particular id order
    #[serde(default)]
    pub categories: Vec<InventoryCategory>,

    /// Products in upstream order
    #[serde(default)]
    pub products: Vec<InventoryEntry>,
}

/// A category in the inventory category list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(remote = "Self")]
pub struct InventoryCategory {
    /// Category id referenced by products
    pub id: u64,

    /// Category name
    pub name: String,

    /// Category weight
    #[serde(alias = "relevance")]
    pub importance: f64,
}

/// Envelope around each upstream product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(remote = "Self")]
pub struct InventoryEntry {
    /// The product itself
    pub product_data: InventoryProduct,
}

/// An inventory product as published upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(remote = "Self")]
pub struct InventoryProduct {
    /// Product name
    pub name: String,

    /// Current price in minor units
    pub price: u64,

    /// Rating
    pub rate: u32,

    /// Discount percentage
    pub discount: i64,

    /// Category references; only the first one is used
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

/// Reference from a product to a category id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(remote = "Self")]
pub struct CategoryRef {
    /// Referenced category id
    pub category_id: u64,
}

deserialize_from_object!(
    InventoryPayload,
    InventoryCategory,
    InventoryEntry,
    InventoryProduct,
    CategoryRef,
);

/// Resolve every product against the category list and build listings.
///
/// # Errors
///
/// - [`NormalizeError::MissingCategory`]: a product has no category reference.
/// - [`NormalizeError::UnknownCategory`]: a product references an id that is
///   not in the category list.
/// - [`NormalizeError::CashDiscountOverflow`]: price times discount does not
///   fit in a decimal.
pub fn normalize(payload: &InventoryPayload) -> Result<Vec<Listing>, NormalizeError> {
    // Later duplicates of an id replace earlier ones.
    let categories: FxHashMap<u64, &InventoryCategory> = payload
        .categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    payload
        .products
        .iter()
        .enumerate()
        .map(|(position, entry)| normalize_product(position, &entry.product_data, &categories))
        .collect()
}

fn normalize_product(
    position: usize,
    product: &InventoryProduct,
    categories: &FxHashMap<u64, &InventoryCategory>,
) -> Result<Listing, NormalizeError> {
    let category_ref = product
        .categories
        .first()
        .ok_or_else(|| NormalizeError::MissingCategory {
            product: product.name.clone(),
        })?;

    if product.categories.len() > 1 {
        debug!(
            product = %product.name,
            references = product.categories.len(),
            "product has several category references, using the first"
        );
    }

    let category = categories.get(&category_ref.category_id).ok_or_else(|| {
        NormalizeError::UnknownCategory {
            product: product.name.clone(),
            category_id: category_ref.category_id,
        }
    })?;

    let cash_discount = cash_discount(product.price, product.discount).ok_or_else(|| {
        NormalizeError::CashDiscountOverflow {
            product: product.name.clone(),
        }
    })?;

    Ok(Listing {
        origin: Origin::new(SourceKind::Inventory, position),
        name: product.name.clone(),
        price: Price::from(product.price),
        discount: product.discount,
        cash_discount,
        rate: product.rate,
        category: category.name.clone(),
        category_importance: category.importance,
    })
}

/// `price * discount / 100`, exact.
fn cash_discount(price: u64, discount: i64) -> Option<Decimal> {
    Decimal::from(price)
        .checked_mul(Decimal::from(discount))?
        .checked_div(Decimal::ONE_HUNDRED)
}
