//! Overlay a run's observations onto the stored baseline.

use std::collections::BTreeMap;

use specsplit_core::{Baseline, Millis, PartialReport, Spec, TimedSpec, Timings};

/// Copy `baseline`, overwrite the duration of every spec in `report`, append
/// the specs it has never seen, and return the result sorted by spec.
///
/// Specs not run this time keep their old duration. A spec repeated in
/// either input ends up once, with the last value seen. The output order is
/// what gets persisted, so re-serializing unchanged data is byte-identical.
pub fn merge(baseline: &Baseline, report: &PartialReport) -> Timings {
    let mut merged: BTreeMap<&Spec, Millis> = BTreeMap::new();
    for entry in baseline.durations.iter().chain(&report.durations) {
        merged.insert(&entry.spec, entry.duration);
    }

    Timings::new(
        merged
            .into_iter()
            .map(|(spec, duration)| TimedSpec::new(spec.clone(), duration))
            .collect(),
    )
}
