//! Shared types used across specsplit crates.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A duration in milliseconds.
pub type Millis = u64;

/// Identifier of a single spec file, usually a path relative to the project root.
///
/// Identity is exact string equality; no path normalization happens here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Spec(String);

impl Spec {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Spec {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Spec {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Spec {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Spec {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Split a comma-separated spec list, trimming whitespace and dropping empties.
pub fn parse_spec_list(input: &str) -> Vec<Spec> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Spec::from)
        .collect()
}

/// A spec with its known or estimated duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedSpec {
    pub spec: Spec,
    pub duration: Millis,
}

impl TimedSpec {
    pub fn new(spec: impl Into<Spec>, duration: Millis) -> Self {
        Self {
            spec: spec.into(),
            duration,
        }
    }
}

/// The timings document: `{ "durations": [ { "spec": ..., "duration": ... } ] }`.
///
/// The same shape is used for the persisted baseline and for the partial
/// report a single worker produces after its run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    pub durations: Vec<TimedSpec>,
}

/// Best known duration per spec, persisted between runs.
pub type Baseline = Timings;

/// Durations observed by one worker during one run.
pub type PartialReport = Timings;

impl Timings {
    pub fn new(durations: Vec<TimedSpec>) -> Self {
        Self { durations }
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Duration recorded for `spec`. If the document repeats a spec, the
    /// last entry wins.
    pub fn get(&self, spec: &str) -> Option<Millis> {
        self.durations
            .iter()
            .rev()
            .find(|t| t.spec.as_str() == spec)
            .map(|t| t.duration)
    }

    /// Build a report from run results. Failed specs are left out so that
    /// retry-inflated durations never reach the baseline.
    pub fn from_runs<'a>(runs: impl IntoIterator<Item = &'a SpecRun>) -> Self {
        let durations = runs
            .into_iter()
            .filter(|run| run.status.counts_toward_timings())
            .map(|run| TimedSpec::new(run.spec.clone(), run.duration))
            .collect();
        Self { durations }
    }
}

/// Outcome of a whole spec file after the host runner finished it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Passed,
    Failed,
    /// Every test in the spec was pending or skipped.
    Pending,
}

impl RunStatus {
    pub fn counts_toward_timings(&self) -> bool {
        !matches!(self, RunStatus::Failed)
    }
}

/// One spec's result as reported by the host test runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRun {
    pub spec: Spec,
    pub duration: Millis,
    pub status: RunStatus,
}
