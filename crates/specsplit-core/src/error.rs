//! Worker slot validation errors.

use thiserror::Error;

/// Invalid worker count or index.
///
/// These are caller bugs (bad CI wiring, off-by-one indices) and are never
/// recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("bucket count must be >= 0, got {0}")]
    InvalidBucketCount(i64),

    #[error("invalid bucket index {index} for {total} buckets")]
    InvalidBucketIndex { index: i64, total: i64 },
}
