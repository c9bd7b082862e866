//! Output

use std::{fs, io, path::Path};

use thiserror::Error;

use crate::records::Record;

/// Errors that can occur while writing results.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Records could not be serialized.
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("failed to write output file: {0}")]
    Io(#[from] io::Error),
}

/// Serialize records as a JSON array.
///
/// # Errors
///
/// Returns [`OutputError::Serialize`] if serialization fails.
pub fn to_json(records: &[Record], pretty: bool) -> Result<Vec<u8>, OutputError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(records)?
    } else {
        serde_json::to_vec(records)?
    };

    Ok(bytes)
}

/// Write the full result set to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the records cannot be serialized or the file cannot
/// be written.
pub fn write_records(
    path: impl AsRef<Path>,
    records: &[Record],
    pretty: bool,
) -> Result<(), OutputError> {
    fs::write(path, to_json(records, pretty)?)?;

    Ok(())
}
