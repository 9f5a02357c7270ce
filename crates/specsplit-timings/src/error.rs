//! Timings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading, writing, or estimating with timings.
#[derive(Debug, Error)]
pub enum TimingsError {
    #[error("timings file not found: {}", .0.display())]
    BaselineNotFound(PathBuf),

    #[error("failed to parse timings file {}: {source}", path.display())]
    BaselineParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("baseline has no entries")]
    EmptyBaseline,

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize timings: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type TimingsResult<T> = Result<T, TimingsError>;
