//! specsplit-core: shared types for splitting spec files across workers.
//!
//! Every other specsplit crate speaks in these types:
//!
//! - **`types`**: `Spec`, `TimedSpec`, the `Timings` document, run records
//! - **`slot`**: validated `(total, index)` worker position
//! - **`config`**: `SplitConfig`, the explicit settings handed to the orchestrator

pub mod config;
pub mod error;
pub mod slot;
pub mod types;

pub use config::{DEFAULT_THRESHOLD, SplitConfig};
pub use error::SlotError;
pub use slot::WorkerSlot;
pub use types::*;
