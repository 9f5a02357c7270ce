//! specsplit.toml configuration parser.
//!
//! `SplitConfig` is the only way settings reach the orchestrator. Callers
//! fill it from a file, flags, or CI variables; nothing below reads the
//! process environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SlotError;
use crate::slot::WorkerSlot;
use crate::types::Spec;

/// Relative change in a spec's duration that justifies rewriting the baseline.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Number of parallel workers.
    pub total: i64,
    /// Zero-based index of this worker.
    pub index: i64,
    /// Baseline timings to read before splitting.
    pub timings_file: Option<PathBuf>,
    /// Where to write updated timings. Defaults to `timings_file`.
    pub output_file: Option<PathBuf>,
    /// Relative change that counts as divergence.
    pub threshold: f64,
    /// Spec to run instead when this worker's bucket is empty.
    pub placeholder_spec: Option<Spec>,
    /// Look for a relative `timings_file` in parent directories, up to the git root.
    pub search_parents: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            total: 1,
            index: 0,
            timings_file: None,
            output_file: None,
            threshold: DEFAULT_THRESHOLD,
            placeholder_spec: None,
            search_parents: true,
        }
    }
}

impl SplitConfig {
    pub fn new(total: i64, index: i64) -> Self {
        Self {
            total,
            index,
            ..Self::default()
        }
    }

    pub fn with_timings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.timings_file = Some(path.into());
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    pub fn with_placeholder(mut self, spec: impl Into<Spec>) -> Self {
        self.placeholder_spec = Some(spec.into());
        self
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: SplitConfig = toml::from_str(content)?;
        if !config.threshold.is_finite() || config.threshold < 0.0 {
            anyhow::bail!("threshold must be a non-negative number, got {}", config.threshold);
        }
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn slot(&self) -> Result<WorkerSlot, SlotError> {
        WorkerSlot::new(self.total, self.index)
    }

    /// Destination for recorded timings.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_file
            .as_deref()
            .or(self.timings_file.as_deref())
    }
}
