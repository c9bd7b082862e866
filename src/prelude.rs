//! Canasta prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fetch::{Fetch, FetchError, HttpFetcher},
    merge::merge,
    output::{OutputError, write_records},
    pipeline::{Pipeline, PipelineError, SourceUrls, decode_catalog, decode_inventory},
    prices::{Price, PriceError, parse_price},
    records::{Listing, Origin, Record, SourceKind},
    relevance::{RelevancePolicy, RelevanceScorer, RelevanceWeights, ScaleStats, Scoring},
    sources::NormalizeError,
};
