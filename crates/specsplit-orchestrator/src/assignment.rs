//! What a worker was told to run, and why.

use std::fmt;
use std::path::PathBuf;

use specsplit_core::{Millis, Spec, TimedSpec};

/// Why duration-aware scheduling was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No timings file configured at all.
    NotConfigured,
    /// The configured timings file could not be located.
    BaselineNotFound(PathBuf),
    /// The timings file exists but could not be read or parsed.
    BaselineUnreadable { path: PathBuf, error: String },
    /// The timings file has no entries to estimate from.
    EmptyBaseline(PathBuf),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NotConfigured => write!(f, "no timings file configured"),
            FallbackReason::BaselineNotFound(path) => {
                write!(f, "timings file {} not found", path.display())
            }
            FallbackReason::BaselineUnreadable { path, error } => {
                write!(f, "could not read timings file {}: {error}", path.display())
            }
            FallbackReason::EmptyBaseline(path) => {
                write!(f, "timings file {} has no entries", path.display())
            }
        }
    }
}

/// How the specs were split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Greedy scheduling over known or estimated durations.
    ByDuration { baseline: PathBuf, bucket_sum: Millis },
    /// Order-preserving split by count.
    ByName { reason: FallbackReason },
}

/// The specs one worker should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Zero-based worker index.
    pub index: usize,
    pub total: usize,
    pub strategy: Strategy,
    pub specs: Vec<Spec>,
    /// Estimated duration of each entry in `specs`, when split by duration.
    pub estimates: Option<Vec<Millis>>,
    /// `specs` is the configured placeholder standing in for an empty bucket.
    pub placeholder: bool,
}

impl Assignment {
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn by_duration(&self) -> bool {
        matches!(self.strategy, Strategy::ByDuration { .. })
    }

    /// Specs paired with their estimates, if any.
    pub fn timed(&self) -> Option<Vec<TimedSpec>> {
        let estimates = self.estimates.as_ref()?;
        Some(
            self.specs
                .iter()
                .zip(estimates)
                .map(|(spec, duration)| TimedSpec::new(spec.clone(), *duration))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_pairs_specs_with_estimates() {
        let assignment = Assignment {
            index: 0,
            total: 2,
            strategy: Strategy::ByDuration {
                baseline: PathBuf::from("timings.json"),
                bucket_sum: 30,
            },
            specs: vec![Spec::from("a"), Spec::from("b")],
            estimates: Some(vec![20, 10]),
            placeholder: false,
        };
        assert!(assignment.by_duration());
        assert_eq!(
            assignment.timed(),
            Some(vec![TimedSpec::new("a", 20), TimedSpec::new("b", 10)])
        );
    }

    #[test]
    fn fallback_reason_names_the_file() {
        let reason = FallbackReason::BaselineUnreadable {
            path: PathBuf::from("ci/timings.json"),
            error: "expected value at line 1".to_string(),
        };
        assert_eq!(
            reason.to_string(),
            "could not read timings file ci/timings.json: expected value at line 1"
        );
    }
}
