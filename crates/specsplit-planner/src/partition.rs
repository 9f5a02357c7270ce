//! Order-preserving partitioning by count.
//!
//! Used when no duration data exists. Buckets are contiguous slices of the
//! input, so concatenating them in bucket order gives back the input.

use specsplit_core::{SlotError, WorkerSlot};
use tracing::debug;

/// Split `items` into at most `n` contiguous buckets.
///
/// - `n < 2` yields a single bucket holding everything.
/// - If `n` divides the length, every bucket has `len / n` items.
/// - Otherwise `balanced` sizes each bucket `ceil(remaining / buckets_left)`,
///   so sizes differ by at most one and larger buckets come first. Fewer
///   than `n` buckets come back when there are fewer items than buckets.
/// - Without `balanced`, the first `n - 1` buckets share a fixed size and the
///   last bucket takes whatever is left over.
pub fn partition<T: Clone>(items: &[T], n: usize, balanced: bool) -> Vec<Vec<T>> {
    if n < 2 {
        return vec![items.to_vec()];
    }

    let len = items.len();
    if len % n == 0 {
        let size = len / n;
        if size == 0 {
            return Vec::new();
        }
        return items.chunks(size).map(<[T]>::to_vec).collect();
    }

    if balanced {
        balanced_split(items, n)
    } else {
        overflow_split(items, n)
    }
}

fn balanced_split<T: Clone>(items: &[T], n: usize) -> Vec<Vec<T>> {
    let mut out = Vec::with_capacity(n);
    let mut rest = items;
    let mut buckets_left = n;

    // With one bucket left the whole remainder is taken, so this never
    // divides by zero.
    while !rest.is_empty() {
        let size = rest.len().div_ceil(buckets_left);
        let (head, tail) = rest.split_at(size);
        out.push(head.to_vec());
        rest = tail;
        buckets_left -= 1;
    }
    out
}

fn overflow_split<T: Clone>(items: &[T], n: usize) -> Vec<Vec<T>> {
    let len = items.len();
    let fixed_buckets = n - 1;
    let mut size = len / fixed_buckets;
    // An exact fit would leave the overflow bucket empty.
    if size > 0 && len % size == 0 {
        size -= 1;
    }

    let boundary = size * fixed_buckets;
    let mut out: Vec<Vec<T>> = if size == 0 {
        Vec::new()
    } else {
        items[..boundary].chunks(size).map(<[T]>::to_vec).collect()
    };
    out.push(items[boundary..].to_vec());
    out
}

/// The balanced bucket owned by `slot`. Empty when the split produced fewer
/// buckets than workers.
pub fn bucket_for<T: Clone>(items: &[T], slot: WorkerSlot) -> Vec<T> {
    let bucket = partition(items, slot.total(), true)
        .into_iter()
        .nth(slot.index())
        .unwrap_or_default();
    debug!(
        worker = %slot,
        items = items.len(),
        selected = bucket.len(),
        "selected bucket by name"
    );
    bucket
}

/// Validate `(total_buckets, bucket_index)` and return that worker's
/// balanced bucket.
pub fn select_bucket<T: Clone>(
    items: &[T],
    total_buckets: i64,
    bucket_index: i64,
) -> Result<Vec<T>, SlotError> {
    let slot = WorkerSlot::new(total_buckets, bucket_index)?;
    Ok(bucket_for(items, slot))
}
