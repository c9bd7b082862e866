//! Configuration
//!
//! Every setting has a default, so a plain `canasta` invocation uses the fixed
//! upstream endpoints and writes `./output.json`.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::{
    pipeline::SourceUrls,
    relevance::{RelevancePolicy, RelevanceWeights, Scoring},
};

/// Default catalog (category tree) endpoint.
pub const DEFAULT_CATALOG_URL: &str =
    "https://run.mocky.io/v3/77f7e692-73f3-4676-a4ce-8576dd99ca0c";

/// Default inventory (flat lists) endpoint.
pub const DEFAULT_INVENTORY_URL: &str =
    "https://run.mocky.io/v3/26029c20-0eb4-43b1-b8ba-871384052fc7";

/// canasta configuration
#[derive(Debug, Parser)]
#[command(name = "canasta", about = "Fetch, rank and export product listings", long_about = None)]
pub struct Config {
    /// Upstream endpoints.
    #[command(flatten)]
    pub sources: SourcesConfig,

    /// Output file settings.
    #[command(flatten)]
    pub output: OutputConfig,

    /// Relevance scoring settings.
    #[command(flatten)]
    pub scoring: ScoringConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Upstream endpoints.
#[derive(Debug, Args)]
pub struct SourcesConfig {
    /// Catalog endpoint (category groups with nested products)
    #[arg(long, env = "CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Inventory endpoint (flat category and product lists)
    #[arg(long, env = "INVENTORY_URL", default_value = DEFAULT_INVENTORY_URL)]
    pub inventory_url: String,
}

impl SourcesConfig {
    /// Endpoints for the pipeline.
    pub fn urls(&self) -> SourceUrls {
        SourceUrls {
            catalog: self.catalog_url.clone(),
            inventory: self.inventory_url.clone(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Args)]
pub struct OutputConfig {
    /// Output file path
    #[arg(short = 'o', long = "output", env = "OUTPUT_PATH", default_value = "./output.json")]
    pub path: PathBuf,

    /// Pretty-print the output JSON
    #[arg(long, env = "OUTPUT_PRETTY", default_value_t = false)]
    pub pretty: bool,
}

/// Relevance scoring settings.
#[derive(Debug, Args)]
pub struct ScoringConfig {
    /// Relevance policy (normalized, raw)
    #[arg(long, env = "RELEVANCE_POLICY", value_enum, default_value_t = PolicyArg::Normalized)]
    pub policy: PolicyArg,

    /// Weight of the rating
    #[arg(long, env = "RATE_WEIGHT", default_value_t = 0.3)]
    pub rate_weight: f64,

    /// Weight of the cash discount
    #[arg(long, env = "CASH_DISCOUNT_WEIGHT", default_value_t = 0.5)]
    pub cash_discount_weight: f64,

    /// Weight of the category importance
    #[arg(long, env = "CATEGORY_IMPORTANCE_WEIGHT", default_value_t = 0.2)]
    pub category_importance_weight: f64,
}

impl ScoringConfig {
    /// Scoring settings for the pipeline.
    pub fn scoring(&self) -> Scoring {
        Scoring {
            policy: self.policy.into(),
            weights: RelevanceWeights {
                rate: self.rate_weight,
                cash_discount: self.cash_discount_weight,
                category_importance: self.category_importance_weight,
            },
        }
    }
}

/// `--policy` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Scale each field by its maximum over both sources
    Normalized,

    /// Use field values as published
    Raw,
}

impl From<PolicyArg> for RelevancePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Normalized => Self::Normalized,
            PolicyArg::Raw => Self::Raw,
        }
    }
}

/// How log lines are rendered on stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event, for terminals
    Compact,

    /// One JSON object per event, for log collectors
    Json,
}

/// Logging settings. A `RUST_LOG` filter, when set, replaces the level.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Level for canasta's own events; dependencies only log warnings
    #[arg(short, long, env = "CANASTA_LOG", default_value = "info")]
    pub log_level: String,

    /// Log line format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
