//! Relevance
//!
//! Relevance is a weighted sum of a listing's rate, cash discount and
//! category importance. Under the default [`RelevancePolicy::Normalized`]
//! policy each term is first divided by that field's maximum across the whole
//! merged set, so sources publishing on different scales compete fairly.

use rust_decimal::prelude::ToPrimitive;

use crate::records::{Listing, Record};

/// How raw listing fields are turned into a relevance score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelevancePolicy {
    /// Divide each field by its maximum across all listings before weighting.
    #[default]
    Normalized,

    /// Weight the raw field values of each listing independently.
    Raw,
}

/// Weight given to each field in the relevance sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelevanceWeights {
    /// Weight of the rating
    pub rate: f64,

    /// Weight of the cash discount
    pub cash_discount: f64,

    /// Weight of the category importance
    pub category_importance: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            rate: 0.3,
            cash_discount: 0.5,
            category_importance: 0.2,
        }
    }
}

/// Scoring policy and weights, as configured for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scoring {
    /// Scoring policy
    pub policy: RelevancePolicy,

    /// Field weights
    pub weights: RelevanceWeights,
}

/// Per-field maxima over a set of listings.
///
/// Every maximum starts at zero, so a field that is zero or negative
/// everywhere ends up with a zero maximum and contributes nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleStats {
    /// Highest rating seen
    pub max_rate: f64,

    /// Highest cash discount seen
    pub max_cash_discount: f64,

    /// Highest category importance seen
    pub max_category_importance: f64,
}

impl ScaleStats {
    /// Collect maxima across every listing of every given set.
    pub fn observe<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a [Listing]>,
    {
        sets.into_iter()
            .flatten()
            .fold(Self::default(), |stats, listing| Self {
                max_rate: stats.max_rate.max(f64::from(listing.rate)),
                max_cash_discount: stats.max_cash_discount.max(cash_discount(listing)),
                max_category_importance: stats
                    .max_category_importance
                    .max(listing.category_importance),
            })
    }
}

/// Computes relevance scores and builds complete [`Record`]s.
#[derive(Clone, Copy, Debug)]
pub struct RelevanceScorer {
    scoring: Scoring,
    stats: ScaleStats,
}

impl RelevanceScorer {
    /// Create a scorer with precomputed scale statistics.
    pub fn new(scoring: Scoring, stats: ScaleStats) -> Self {
        Self { scoring, stats }
    }

    /// Create a scorer whose scale statistics cover all of the given sets.
    pub fn fit<'a, I>(scoring: Scoring, sets: I) -> Self
    where
        I: IntoIterator<Item = &'a [Listing]>,
    {
        Self::new(scoring, ScaleStats::observe(sets))
    }

    /// Scale statistics the scorer normalizes against.
    pub fn stats(&self) -> &ScaleStats {
        &self.stats
    }

    /// Relevance of a single listing.
    pub fn relevance(&self, listing: &Listing) -> f64 {
        let weights = &self.scoring.weights;

        let rate = f64::from(listing.rate);
        let cash_discount = cash_discount(listing);
        let importance = listing.category_importance;

        match self.scoring.policy {
            RelevancePolicy::Normalized => {
                ratio(rate, self.stats.max_rate) * weights.rate
                    + ratio(cash_discount, self.stats.max_cash_discount) * weights.cash_discount
                    + ratio(importance, self.stats.max_category_importance)
                        * weights.category_importance
            }
            RelevancePolicy::Raw => {
                rate * weights.rate
                    + cash_discount * weights.cash_discount
                    + importance * weights.category_importance
            }
        }
    }

    /// Score a listing into a complete record.
    pub fn score(&self, listing: Listing) -> Record {
        let relevance = self.relevance(&listing);

        Record::scored(listing, relevance)
    }

    /// Score every listing, keeping their order.
    pub fn score_all(&self, listings: Vec<Listing>) -> Vec<Record> {
        listings
            .into_iter()
            .map(|listing| self.score(listing))
            .collect()
    }
}

fn cash_discount(listing: &Listing) -> f64 {
    listing.cash_discount.to_f64().unwrap_or_default()
}

/// `value / max`, or zero when there is no positive maximum to divide by.
fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 { value / max } else { 0.0 }
}
