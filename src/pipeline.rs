//! Pipeline
//!
//! Fetches both sources, normalizes them, scores the combined set and merges
//! the results. The first failure in any stage aborts the run.

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    fetch::{Fetch, FetchError, HttpFetcher},
    merge::merge,
    records::{Listing, Record, SourceKind},
    relevance::{RelevanceScorer, Scoring},
    sources::{
        NormalizeError,
        catalog::{self, CatalogTree},
        inventory::{self, InventoryPayload},
    },
};

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A source could not be fetched.
    #[error("failed to fetch {source_kind}")]
    Fetch {
        /// Source being fetched
        source_kind: SourceKind,

        /// Transport failure
        #[source]
        source: FetchError,
    },

    /// A source payload is not valid JSON of the expected shape.
    #[error("failed to decode {source_kind} payload")]
    Decode {
        /// Source being decoded
        source_kind: SourceKind,

        /// Decoder failure
        #[source]
        source: serde_json::Error,
    },

    /// A decoded payload could not be normalized.
    #[error("failed to normalize {source_kind} payload")]
    Normalize {
        /// Source being normalized
        source_kind: SourceKind,

        /// Normalization failure
        #[source]
        source: NormalizeError,
    },
}

/// Where each source is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    /// Catalog (category tree) endpoint
    pub catalog: String,

    /// Inventory (flat lists) endpoint
    pub inventory: String,
}

/// Fetch → decode → normalize → score → merge.
#[derive(Debug)]
pub struct Pipeline<F = HttpFetcher> {
    fetcher: F,
    sources: SourceUrls,
    scoring: Scoring,
}

impl Pipeline<HttpFetcher> {
    /// Create a pipeline that fetches over HTTP.
    #[must_use]
    pub fn new(sources: SourceUrls, scoring: Scoring) -> Self {
        Self::with_fetcher(HttpFetcher::new(), sources, scoring)
    }
}

impl<F: Fetch> Pipeline<F> {
    /// Create a pipeline around the given fetcher.
    pub fn with_fetcher(fetcher: F, sources: SourceUrls, scoring: Scoring) -> Self {
        Self {
            fetcher,
            sources,
            scoring,
        }
    }

    /// Run the pipeline once and return records sorted by descending relevance.
    ///
    /// # Errors
    ///
    /// Returns the first [`PipelineError`] raised by either source. No partial
    /// output is produced.
    pub async fn run(&self) -> Result<Vec<Record>, PipelineError> {
        let catalog = self.catalog_listings().await?;
        let inventory = self.inventory_listings().await?;

        let scorer = RelevanceScorer::fit(self.scoring, [&catalog[..], &inventory[..]]);

        debug!(stats = ?scorer.stats(), policy = ?self.scoring.policy, "scoring listings");

        let records = merge(scorer.score_all(catalog), scorer.score_all(inventory));

        debug!(count = records.len(), "merged records");

        Ok(records)
    }

    async fn catalog_listings(&self) -> Result<Vec<Listing>, PipelineError> {
        let body = self.fetch(SourceKind::Catalog, &self.sources.catalog).await?;

        let tree = decode_catalog(&body)?;

        let listings = catalog::normalize(&tree).map_err(|source| PipelineError::Normalize {
            source_kind: SourceKind::Catalog,
            source,
        })?;

        info!(count = listings.len(), "normalized catalog listings");

        Ok(listings)
    }

    async fn inventory_listings(&self) -> Result<Vec<Listing>, PipelineError> {
        let body = self
            .fetch(SourceKind::Inventory, &self.sources.inventory)
            .await?;

        let payload = decode_inventory(&body)?;

        let listings =
            inventory::normalize(&payload).map_err(|source| PipelineError::Normalize {
                source_kind: SourceKind::Inventory,
                source,
            })?;

        info!(count = listings.len(), "normalized inventory listings");

        Ok(listings)
    }

    async fn fetch(&self, source_kind: SourceKind, url: &str) -> Result<Vec<u8>, PipelineError> {
        info!(%source_kind, url, "fetching source");

        self.fetcher
            .get(url)
            .await
            .map_err(|source| PipelineError::Fetch {
                source_kind,
                source,
            })
    }
}

/// Decode a catalog response body.
///
/// # Errors
///
/// Returns [`PipelineError::Decode`] if the body is not a catalog tree.
pub fn decode_catalog(body: &[u8]) -> Result<CatalogTree, PipelineError> {
    serde_json::from_slice(body).map_err(|source| PipelineError::Decode {
        source_kind: SourceKind::Catalog,
        source,
    })
}

/// Decode an inventory response body.
///
/// # Errors
///
/// Returns [`PipelineError::Decode`] if the body is not an inventory payload.
pub fn decode_inventory(body: &[u8]) -> Result<InventoryPayload, PipelineError> {
    serde_json::from_slice(body).map_err(|source| PipelineError::Decode {
        source_kind: SourceKind::Inventory,
        source,
    })
}
