//! Worker position within a split.

use std::fmt;

use crate::error::SlotError;

/// A validated `(total, index)` pair: this worker is bucket `index` of `total`.
///
/// Construction guarantees `index < total`, so a `WorkerSlot` always has at
/// least one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerSlot {
    total: usize,
    index: usize,
}

impl WorkerSlot {
    /// Validate raw values as they arrive from CI variables or flags.
    pub fn new(total: i64, index: i64) -> Result<Self, SlotError> {
        let total_buckets =
            usize::try_from(total).map_err(|_| SlotError::InvalidBucketCount(total))?;
        let invalid_index = SlotError::InvalidBucketIndex { index, total };
        let bucket_index = usize::try_from(index).map_err(|_| invalid_index.clone())?;
        if bucket_index >= total_buckets {
            return Err(invalid_index);
        }
        Ok(Self {
            total: total_buckets,
            index: bucket_index,
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The same split seen from another worker.
    pub fn with_index(&self, index: usize) -> Option<Self> {
        (index < self.total).then_some(Self {
            total: self.total,
            index,
        })
    }
}

impl fmt::Display for WorkerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Humans count workers from one.
        write!(f, "{} of {}", self.index + 1, self.total)
    }
}
