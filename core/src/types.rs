use std::io;
use thiserror::Error;

use crate::headers::HeaderError;

/// Crate-level error covering I/O, header encoding/decoding and configuration.
/// - `From<T>` impls let `?` cross from the pure encoder into the file glue.
/// - Header failures are raised before any byte is written.
#[derive(Debug, Error)]
pub enum PatchError {
    /// I/O error on the patch file or image.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Header encode/decode failure.
    #[error("header error: {0}")]
    Header(#[from] HeaderError),

    /// Malformed configuration value.
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PatchError {
    fn from(e: serde_json::Error) -> Self {
        PatchError::Config(e.to_string())
    }
}
