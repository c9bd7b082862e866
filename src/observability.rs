//! Logging
//!
//! Events go to stderr so they never mix with the output file.

use std::io;

use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    match config.log_format {
        LogFormat::Compact => install(fmt_layer.compact().with_target(false), filter),
        LogFormat::Json => install(fmt_layer.json().flatten_event(true), filter),
    }
}

/// `level` for this crate, warnings only for everything else.
fn default_directives(level: &str) -> String {
    format!("warn,{}={level}", env!("CARGO_CRATE_NAME"))
}

fn install<L>(fmt_layer: L, filter: EnvFilter) -> Result<(), TryInitError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
}
