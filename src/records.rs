//! Records

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::prices::Price;

/// The upstream a listing was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Category groups, each carrying its products.
    Catalog,

    /// Flat category list plus flat product list.
    Inventory,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Catalog => f.write_str("catalog"),
            SourceKind::Inventory => f.write_str("inventory"),
        }
    }
}

/// Where a listing came from: its source and its position in that source's
/// flattened product order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Origin {
    /// Source the item was decoded from
    pub source: SourceKind,

    /// Zero-based position among the source's products
    pub position: usize,
}

impl Origin {
    /// Creates a new origin
    pub fn new(source: SourceKind, position: usize) -> Self {
        Self { source, position }
    }
}

/// A normalized, not yet scored product listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    /// Source item this listing maps back to
    #[serde(skip)]
    pub origin: Origin,

    /// Product display name
    pub name: String,

    /// Current price
    pub price: Price,

    /// Discount percentage
    pub discount: i64,

    /// Absolute amount saved, in minor units
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_discount: Decimal,

    /// Quality/popularity rating
    pub rate: u32,

    /// Category name
    pub category: String,

    /// Weight assigned to the category
    pub category_importance: f64,
}

/// A complete output record: a listing together with its computed relevance.
///
/// Records are only produced by [`RelevanceScorer`](crate::relevance::RelevanceScorer),
/// so a record always carries a relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(flatten)]
    listing: Listing,

    relevance: f64,
}

impl Record {
    pub(crate) fn scored(listing: Listing, relevance: f64) -> Self {
        Self { listing, relevance }
    }

    /// Returns the scored listing
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Returns the relevance score
    pub fn relevance(&self) -> f64 {
        self.relevance
    }

    /// Returns the origin of the underlying source item
    pub fn origin(&self) -> Origin {
        self.listing.origin
    }

    /// Returns the product name
    pub fn name(&self) -> &str {
        &self.listing.name
    }
}
