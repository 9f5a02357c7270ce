//! specsplit-timings: the persisted duration baseline.
//!
//! Pure operations over `Timings` documents, plus the file plumbing around
//! them:
//!
//! - **`combine`**: fold several partial reports into one baseline
//! - **`divergence`**: decide whether a new report is worth persisting
//! - **`merge`**: overlay a report onto a baseline without losing entries
//! - **`estimate`**: per-spec cost lookup with a mean fallback
//! - **`store`**: locate, read, and write timings files
//! - **`discover`**: find partial reports left by several workers
//!
//! # Concurrency
//!
//! Nothing here locks the baseline file. Two workers that both run
//! read → merge → write race, and the last writer wins. Hosts that need
//! every worker's observations must serialize that sequence themselves or
//! combine the per-worker reports after all workers finish.

pub mod combine;
pub mod discover;
pub mod divergence;
pub mod error;
pub mod estimate;
pub mod merge;
pub mod store;

pub use combine::combine_reports;
pub use discover::{combine_report_files, find_reports};
pub use divergence::{has_diverged, relative_change};
pub use error::{TimingsError, TimingsResult};
pub use estimate::{estimate_durations, mean_duration};
pub use merge::merge;
pub use store::{find_file, load_timings, parse_timings, save_timings, to_json};
