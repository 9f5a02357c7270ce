//! Orchestrator: selection before a run, bookkeeping after it.
//!
//! Selection never fails because of the timings file: a missing, corrupt,
//! or empty baseline is logged and the split falls back to names. Only an
//! invalid worker slot is fatal, and that is rejected at construction.

use std::path::{Path, PathBuf};

use specsplit_core::{
    Baseline, Millis, PartialReport, SlotError, Spec, SpecRun, SplitConfig, Timings, WorkerSlot,
};
use specsplit_planner::{Schedule, bucket_for, schedule};
use specsplit_timings::{
    TimingsError, estimate_durations, find_file, has_diverged, load_timings, merge, save_timings,
};
use tracing::{debug, info, warn};

use crate::assignment::{Assignment, FallbackReason, Strategy};
use crate::error::{OrchestratorError, OrchestratorResult};

/// Result of recording a run's durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No usable baseline existed; the report was written as a new one.
    Created(PathBuf),
    /// The report diverged from the baseline; the merge was written.
    Updated(PathBuf),
    /// Nothing changed enough to rewrite the baseline.
    ///
    /// Nothing is written, not even to a separate `output_file`. A run in
    /// which every worker is unchanged leaves no per-worker files behind,
    /// so there is nothing for `specsplit merge` to collect.
    Unchanged,
}

/// How the specs are split for every worker of one run.
enum Plan {
    ByDuration { baseline: PathBuf, schedule: Schedule },
    ByName { specs: Vec<Spec>, reason: FallbackReason },
}

/// One worker's orchestrator.
///
/// `root` is the directory relative timings paths are resolved from,
/// normally the project directory the test runner was started in.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: SplitConfig,
    slot: WorkerSlot,
    root: PathBuf,
}

impl Orchestrator {
    pub fn new(config: SplitConfig, root: impl Into<PathBuf>) -> Result<Self, SlotError> {
        let slot = config.slot()?;
        Ok(Self {
            config,
            slot,
            root: root.into(),
        })
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn slot(&self) -> WorkerSlot {
        self.slot
    }

    /// The specs this worker should run.
    pub fn assign(&self, specs: &[Spec]) -> Assignment {
        let plan = self.plan(specs);
        let assignment = self.assignment_for(&plan, self.slot);
        info!(
            worker = %self.slot,
            found = specs.len(),
            assigned = assignment.len(),
            by_duration = assignment.by_duration(),
            "selected specs for this worker"
        );
        assignment
    }

    /// Every worker's assignment, without running anything.
    pub fn preview(&self, specs: &[Spec]) -> Vec<Assignment> {
        let plan = self.plan(specs);
        (0..self.slot.total())
            .filter_map(|index| self.slot.with_index(index))
            .map(|slot| self.assignment_for(&plan, slot))
            .collect()
    }

    /// Fold a run's observed durations into the baseline.
    ///
    /// The baseline is read, merged, and written without any locking. When
    /// several workers record into the same file the last writer wins, so
    /// either run this once per file at a time or record into per-worker
    /// output files and combine them after all workers finish.
    pub fn record(&self, report: &PartialReport) -> OrchestratorResult<RecordOutcome> {
        let configured = self.config.timings_file.as_deref();
        let existing = configured.and_then(|path| self.locate(path));

        let output = match (self.config.output_file.as_deref(), &existing, configured) {
            (Some(output), _, _) => self.root.join(output),
            (None, Some(found), _) => found.clone(),
            (None, None, Some(path)) => self.root.join(path),
            (None, None, None) => return Err(OrchestratorError::NoTimingsFile),
        };

        let baseline = existing.and_then(|path| match load_timings(&path) {
            Ok(baseline) => Some(baseline),
            Err(e) => {
                warn!(error = %e, "existing timings unusable, writing a fresh baseline");
                None
            }
        });

        let Some(baseline) = baseline else {
            let fresh = merge(&Timings::default(), report);
            save_timings(&output, &fresh)?;
            info!(path = %output.display(), specs = fresh.len(), "created timings file");
            return Ok(RecordOutcome::Created(output));
        };

        if !has_diverged(&baseline, report, self.config.threshold) {
            info!(
                specs = report.len(),
                threshold = self.config.threshold,
                "timings within threshold, leaving baseline unchanged"
            );
            return Ok(RecordOutcome::Unchanged);
        }

        let merged = merge(&baseline, report);
        save_timings(&output, &merged)?;
        info!(
            path = %output.display(),
            specs = merged.len(),
            observed = report.len(),
            "updated timings file"
        );
        Ok(RecordOutcome::Updated(output))
    }

    /// [`record`](Self::record) straight from run results; failed specs are dropped.
    pub fn record_runs(&self, runs: &[SpecRun]) -> OrchestratorResult<RecordOutcome> {
        let report = Timings::from_runs(runs);
        let dropped = runs.len() - report.len();
        if dropped > 0 {
            debug!(dropped, "ignoring durations of failed specs");
        }
        self.record(&report)
    }

    fn locate(&self, path: &Path) -> Option<PathBuf> {
        find_file(path, &self.root, self.config.search_parents)
    }

    fn plan(&self, specs: &[Spec]) -> Plan {
        let (path, baseline) = match self.load_baseline() {
            Ok(found) => found,
            Err(reason) => return Self::by_name(specs, reason),
        };

        match estimate_durations(specs, &baseline) {
            Ok(timed) => Plan::ByDuration {
                schedule: schedule(self.slot.total(), &timed),
                baseline: path,
            },
            Err(e) => {
                debug!(error = %e, "cannot estimate durations");
                Self::by_name(specs, FallbackReason::EmptyBaseline(path))
            }
        }
    }

    fn by_name(specs: &[Spec], reason: FallbackReason) -> Plan {
        if reason == FallbackReason::NotConfigured {
            debug!("no timings file configured, splitting specs by name");
        } else {
            warn!(%reason, "falling back to splitting specs by name");
        }
        Plan::ByName {
            specs: specs.to_vec(),
            reason,
        }
    }

    fn load_baseline(&self) -> Result<(PathBuf, Baseline), FallbackReason> {
        let configured = self
            .config
            .timings_file
            .as_deref()
            .ok_or(FallbackReason::NotConfigured)?;
        let path = self
            .locate(configured)
            .ok_or_else(|| FallbackReason::BaselineNotFound(self.root.join(configured)))?;

        match load_timings(&path) {
            Ok(baseline) => Ok((path, baseline)),
            Err(TimingsError::BaselineNotFound(missing)) => {
                Err(FallbackReason::BaselineNotFound(missing))
            }
            Err(e) => Err(FallbackReason::BaselineUnreadable {
                path,
                error: e.to_string(),
            }),
        }
    }

    fn assignment_for(&self, plan: &Plan, slot: WorkerSlot) -> Assignment {
        let (strategy, specs, estimates): (Strategy, Vec<Spec>, Option<Vec<Millis>>) = match plan {
            Plan::ByDuration { baseline, schedule } => {
                let bucket = schedule.bucket(slot.index());
                (
                    Strategy::ByDuration {
                        baseline: baseline.clone(),
                        bucket_sum: schedule.sum(slot.index()),
                    },
                    bucket.iter().map(|t| t.spec.clone()).collect(),
                    Some(bucket.iter().map(|t| t.duration).collect()),
                )
            }
            Plan::ByName { specs, reason } => (
                Strategy::ByName {
                    reason: reason.clone(),
                },
                bucket_for(specs, slot),
                None,
            ),
        };

        let mut assignment = Assignment {
            index: slot.index(),
            total: slot.total(),
            strategy,
            specs,
            estimates,
            placeholder: false,
        };

        if assignment.is_empty() {
            match &self.config.placeholder_spec {
                Some(placeholder) => {
                    warn!(worker = %slot, placeholder = %placeholder, "no specs to run, using placeholder spec");
                    assignment.specs = vec![placeholder.clone()];
                    assignment.estimates = None;
                    assignment.placeholder = true;
                }
                None => warn!(worker = %slot, "no specs to run"),
            }
        }
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specsplit_core::{RunStatus, TimedSpec};
    use std::fs;

    fn specs(names: &[&str]) -> Vec<Spec> {
        names.iter().map(|n| Spec::from(*n)).collect()
    }

    fn write_baseline(dir: &Path, entries: &[(&str, u64)]) {
        let timings = Timings::new(
            entries
                .iter()
                .map(|(spec, duration)| TimedSpec::new(*spec, *duration))
                .collect(),
        );
        save_timings(&dir.join("timings.json"), &timings).unwrap();
    }

    #[test]
    fn invalid_slot_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let err = Orchestrator::new(SplitConfig::new(2, 2), dir.path()).unwrap_err();
        assert_eq!(err, SlotError::InvalidBucketIndex { index: 2, total: 2 });
    }

    #[test]
    fn without_timings_splits_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::new(SplitConfig::new(2, 1), dir.path()).unwrap();

        let assignment = orchestrator.assign(&specs(&["a", "b", "c"]));
        assert_eq!(assignment.specs, specs(&["c"]));
        assert_eq!(
            assignment.strategy,
            Strategy::ByName {
                reason: FallbackReason::NotConfigured
            }
        );
        assert!(assignment.estimates.is_none());
    }

    #[test]
    fn with_timings_schedules_by_duration() {
        let dir = tempfile::tempdir().unwrap();
        write_baseline(dir.path(), &[("a", 1000), ("b", 6000), ("c", 6000), ("d", 1000)]);
        let config = SplitConfig::new(2, 1).with_timings_file("timings.json");
        let orchestrator = Orchestrator::new(config, dir.path()).unwrap();

        let assignment = orchestrator.assign(&specs(&["a", "b", "c", "d"]));
        assert_eq!(assignment.specs, specs(&["c", "d"]));
        assert_eq!(assignment.estimates, Some(vec![6000, 1000]));
        assert_eq!(
            assignment.strategy,
            Strategy::ByDuration {
                baseline: dir.path().join("timings.json"),
                bucket_sum: 7000
            }
        );
    }

    #[test]
    fn unseen_specs_are_estimated_with_the_mean() {
        let dir = tempfile::tempdir().unwrap();
        write_baseline(dir.path(), &[("a", 1000), ("b", 3000)]);
        let config = SplitConfig::new(1, 0).with_timings_file("timings.json");
        let orchestrator = Orchestrator::new(config, dir.path()).unwrap();

        let assignment = orchestrator.assign(&specs(&["a", "new"]));
        assert_eq!(
            assignment.timed(),
            Some(vec![TimedSpec::new("new", 2000), TimedSpec::new("a", 1000)])
        );
    }

    #[test]
    fn missing_timings_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SplitConfig::new(2, 0).with_timings_file("missing.json");
        config.search_parents = false;
        let orchestrator = Orchestrator::new(config, dir.path()).unwrap();

        let assignment = orchestrator.assign(&specs(&["a", "b", "c"]));
        assert_eq!(assignment.specs, specs(&["a", "b"]));
        assert_eq!(
            assignment.strategy,
            Strategy::ByName {
                reason: FallbackReason::BaselineNotFound(dir.path().join("missing.json"))
            }
        );
    }

    #[test]
    fn corrupt_timings_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("timings.json"), "{ oops").unwrap();
        let config = SplitConfig::new(2, 0).with_timings_file("timings.json");
        let orchestrator = Orchestrator::new(config, dir.path()).unwrap();

        let assignment = orchestrator.assign(&specs(&["a", "b"]));
        assert_eq!(assignment.specs, specs(&["a"]));
        assert!(matches!(
            assignment.strategy,
            Strategy::ByName {
                reason: FallbackReason::BaselineUnreadable { .. }
            }
        ));
    }

    #[test]
    fn empty_timings_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write_baseline(dir.path(), &[]);
        let config = SplitConfig::new(2, 0).with_timings_file("timings.json");
        let orchestrator = Orchestrator::new(config, dir.path()).unwrap();

        let assignment = orchestrator.assign(&specs(&["a", "b"]));
        assert_eq!(
            assignment.strategy,
            Strategy::ByName {
                reason: FallbackReason::EmptyBaseline(dir.path().join("timings.json"))
            }
        );
    }

    #[test]
    fn empty_bucket_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let config = SplitConfig::new(3, 2).with_placeholder("cypress/empty.cy.js");
        let orchestrator = Orchestrator::new(config, dir.path()).unwrap();

        let assignment = orchestrator.assign(&specs(&["a"]));
        assert!(assignment.placeholder);
        assert_eq!(assignment.specs, specs(&["cypress/empty.cy.js"]));

        let bare = Orchestrator::new(SplitConfig::new(3, 2), dir.path()).unwrap();
        let assignment = bare.assign(&specs(&["a"]));
        assert!(assignment.is_empty());
        assert!(!assignment.placeholder);
    }

    #[test]
    fn preview_covers_every_worker() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::new(SplitConfig::new(4, 0), dir.path()).unwrap();

        let all = orchestrator.preview(&specs(&["1", "2", "3", "4", "5"]));
        let buckets: Vec<Vec<Spec>> = all.iter().map(|a| a.specs.clone()).collect();
        assert_eq!(
            buckets,
            vec![specs(&["1", "2"]), specs(&["3"]), specs(&["4"]), specs(&["5"])]
        );
        assert_eq!(all.iter().map(|a| a.index).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn record_without_any_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::new(SplitConfig::new(1, 0), dir.path()).unwrap();
        assert!(matches!(
            orchestrator.record(&Timings::default()),
            Err(OrchestratorError::NoTimingsFile)
        ));
    }

    #[test]
    fn record_runs_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        let config = SplitConfig::new(1, 0).with_timings_file("timings.json");
        let orchestrator = Orchestrator::new(config, dir.path()).unwrap();

        let runs = vec![
            SpecRun {
                spec: "b".into(),
                duration: 20,
                status: RunStatus::Passed,
            },
            SpecRun {
                spec: "a".into(),
                duration: 99_999,
                status: RunStatus::Failed,
            },
        ];
        let outcome = orchestrator.record_runs(&runs).unwrap();
        let path = dir.path().join("timings.json");
        assert_eq!(outcome, RecordOutcome::Created(path.clone()));
        assert_eq!(
            load_timings(&path).unwrap(),
            Timings::new(vec![TimedSpec::new("b", 20)])
        );
    }

    #[test]
    fn unchanged_run_writes_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        write_baseline(dir.path(), &[("a", 1000), ("b", 2000)]);
        let config = SplitConfig::new(2, 0)
            .with_timings_file("timings.json")
            .with_output_file(dir.path().join("worker-0/timings.json"));
        let orchestrator = Orchestrator::new(config, dir.path()).unwrap();

        let report = Timings::new(vec![TimedSpec::new("a", 1050)]);
        assert_eq!(orchestrator.record(&report).unwrap(), RecordOutcome::Unchanged);
        assert!(!dir.path().join("worker-0").exists());
    }
}
