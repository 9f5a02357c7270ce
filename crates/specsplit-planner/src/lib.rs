//! specsplit-planner: decides which specs each worker runs.
//!
//! Two strategies, both pure and synchronous:
//!
//! - **`partition`**: contiguous, order-preserving buckets of near-equal
//!   size, used when nothing is known about spec durations
//! - **`schedule`**: greedy longest-processing-time-first assignment that
//!   balances the summed duration of each bucket
//!
//! Neither touches the filesystem; the orchestrator decides which one runs.

pub mod partition;
pub mod schedule;

pub use partition::{bucket_for, partition, select_bucket};
pub use schedule::{Schedule, schedule};
