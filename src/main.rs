//! Canasta command line entry point

use std::process;

use tracing::{error, info};

use canasta::{config::Config, observability, output, pipeline::Pipeline};

/// Fetch both sources, rank the merged listings and write them out
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = Config::load().unwrap_or_else(|e| e.exit());

    if let Err(init_error) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("failed to initialize logging: {init_error}");
        }

        process::exit(1);
    }

    let pipeline = Pipeline::new(config.sources.urls(), config.scoring.scoring());

    let records = match pipeline.run().await {
        Ok(records) => records,
        Err(run_error) => {
            error!(
                error = %run_error,
                cause = ?std::error::Error::source(&run_error),
                "pipeline failed"
            );

            process::exit(1);
        }
    };

    if let Err(write_error) =
        output::write_records(&config.output.path, &records, config.output.pretty)
    {
        error!(
            error = %write_error,
            path = %config.output.path.display(),
            "failed to write output"
        );

        process::exit(1);
    }

    info!(
        count = records.len(),
        path = %config.output.path.display(),
        "wrote ranked listings"
    );
}
