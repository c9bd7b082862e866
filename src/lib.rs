//! Canasta
//!
//! Canasta fetches product listings from two differently shaped upstream
//! sources, normalizes them into a single record shape, scores every record
//! for relevance and emits the merged set sorted by descending relevance.

pub mod config;
pub mod fetch;
pub mod merge;
pub mod observability;
pub mod output;
pub mod pipeline;
pub mod prelude;
pub mod prices;
pub mod records;
pub mod relevance;
pub mod sources;
