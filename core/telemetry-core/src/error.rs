//! Errors raised while decoding event cache snapshots.
//!
//! Resolution itself cannot fail: a missing establisher is reported as `None`,
//! not as an error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read cache snapshot: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read cache snapshot input: {0}")]
    Input(#[source] std::io::Error),

    #[error("Failed to decode cache snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}
