//! Duration-aware bucket scheduling.
//!
//! Greedy longest-processing-time-first: take specs from longest to
//! shortest and drop each into the bucket with the smallest running total.
//! Not optimal, but the slowest bucket stays within `4/3 - 1/(3n)` of the
//! optimal makespan.

use specsplit_core::{Millis, TimedSpec};
use tracing::{debug, warn};

/// Buckets produced by [`schedule`] and the summed duration of each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub buckets: Vec<Vec<TimedSpec>>,
    pub sums: Vec<Millis>,
}

impl Schedule {
    /// Bucket `index`, or an empty slice if out of range.
    pub fn bucket(&self, index: usize) -> &[TimedSpec] {
        self.buckets.get(index).map_or(&[], Vec::as_slice)
    }

    pub fn sum(&self, index: usize) -> Millis {
        self.sums.get(index).copied().unwrap_or(0)
    }

    /// Summed duration of the slowest bucket.
    pub fn makespan(&self) -> Millis {
        self.sums.iter().copied().max().unwrap_or(0)
    }
}

/// Assign `items` to `n` buckets, balancing summed duration.
///
/// Ties in duration keep input order; ties in bucket load go to the lowest
/// index. Bucket contents are in placement order, not input order.
/// `n == 0` yields no buckets.
pub fn schedule(n: usize, items: &[TimedSpec]) -> Schedule {
    let mut buckets: Vec<Vec<TimedSpec>> = vec![Vec::new(); n];
    let mut sums: Vec<Millis> = vec![0; n];

    if n == 0 {
        if !items.is_empty() {
            warn!(items = items.len(), "no buckets to schedule into");
        }
        return Schedule { buckets, sums };
    }

    // `sort_by` is stable, so equal durations keep their input order.
    let mut sorted: Vec<&TimedSpec> = items.iter().collect();
    sorted.sort_by(|a, b| b.duration.cmp(&a.duration));

    for item in sorted {
        let target = lightest(&sums);
        sums[target] = sums[target].saturating_add(item.duration);
        buckets[target].push(item.clone());
    }

    debug!(buckets = n, items = items.len(), ?sums, "scheduled specs by duration");
    Schedule { buckets, sums }
}

/// Index of the bucket with the smallest total; first one wins on ties.
fn lightest(sums: &[Millis]) -> usize {
    sums.iter()
        .enumerate()
        .min_by_key(|&(_, sum)| *sum)
        .map_or(0, |(index, _)| index)
}
