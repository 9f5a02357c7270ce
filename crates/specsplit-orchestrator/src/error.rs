//! Orchestrator error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Slot(#[from] specsplit_core::SlotError),

    #[error(transparent)]
    Timings(#[from] specsplit_timings::TimingsError),

    #[error("no timings file or output file configured")]
    NoTimingsFile,
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
