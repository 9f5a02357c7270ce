//! specsplit-orchestrator: one worker's view of a split.
//!
//! Wires an explicit `SplitConfig`, the discovered spec list, and the
//! optional timings baseline into a single call to the planner, then routes
//! the run's observed durations back into the baseline.
//!
//! ```text
//! specs + baseline? ──► schedule (by duration) ──► this worker's bucket
//!                  └──► partition (by name, fallback)
//! observed report ──► has_diverged? ──► merge ──► baseline file
//! ```

pub mod assignment;
pub mod error;
pub mod orchestrator;

pub use assignment::{Assignment, FallbackReason, Strategy};
pub use error::{OrchestratorError, OrchestratorResult};
pub use orchestrator::{Orchestrator, RecordOutcome};
