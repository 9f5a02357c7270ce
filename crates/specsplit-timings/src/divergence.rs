//! Detect whether newly observed durations warrant rewriting the baseline.

use std::collections::HashMap;

use specsplit_core::{Baseline, Millis, PartialReport};
use tracing::debug;

/// `|previous - current| / max(previous, 1)`.
pub fn relative_change(previous: Millis, current: Millis) -> f64 {
    previous.abs_diff(current) as f64 / previous.max(1) as f64
}

/// True if `report` holds a spec missing from `baseline`, or a shared spec
/// whose duration moved by more than `threshold` (relative).
///
/// Baseline specs that were not run this time never count.
pub fn has_diverged(baseline: &Baseline, report: &PartialReport, threshold: f64) -> bool {
    // Later entries overwrite earlier ones, matching `Timings::get`.
    let known: HashMap<&str, Millis> = baseline
        .durations
        .iter()
        .map(|t| (t.spec.as_str(), t.duration))
        .collect();

    for entry in &report.durations {
        let Some(&previous) = known.get(entry.spec.as_str()) else {
            debug!(spec = %entry.spec, "new spec not in baseline");
            return true;
        };
        let change = relative_change(previous, entry.duration);
        if change > threshold {
            debug!(
                spec = %entry.spec,
                previous,
                current = entry.duration,
                change,
                threshold,
                "spec duration diverged"
            );
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use specsplit_core::{TimedSpec, Timings};

    fn timings(entries: &[(&str, Millis)]) -> Timings {
        Timings::new(
            entries
                .iter()
                .map(|(spec, duration)| TimedSpec::new(*spec, *duration))
                .collect(),
        )
    }

    #[test]
    fn new_spec_always_diverges() {
        let baseline = timings(&[("a", 1000)]);
        let report = timings(&[("a", 1000), ("b", 1)]);
        assert!(has_diverged(&baseline, &report, 0.1));
        assert!(has_diverged(&baseline, &report, 1000.0));
    }

    #[test]
    fn small_changes_stay_within_threshold() {
        let baseline = timings(&[("a", 1000), ("b", 2000)]);
        let report = timings(&[("a", 1100), ("b", 1900)]);
        // Exactly 10% is not more than 10%.
        assert!(!has_diverged(&baseline, &report, 0.1));
    }

    #[test]
    fn large_change_diverges() {
        let baseline = timings(&[("a", 1000), ("b", 2000)]);
        let report = timings(&[("a", 1000), ("b", 2201)]);
        assert!(has_diverged(&baseline, &report, 0.1));
        assert!(!has_diverged(&baseline, &report, 0.2));
    }

    #[test]
    fn specs_missing_from_report_are_ignored() {
        let baseline = timings(&[("a", 1000), ("b", 2000), ("c", 5)]);
        let report = timings(&[("a", 1010)]);
        assert!(!has_diverged(&baseline, &report, 0.1));
        assert!(!has_diverged(&baseline, &Timings::default(), 0.1));
    }

    #[test]
    fn zero_baseline_duration_does_not_divide_by_zero() {
        assert_eq!(relative_change(0, 0), 0.0);
        assert_eq!(relative_change(0, 5), 5.0);
        let baseline = timings(&[("a", 0)]);
        assert!(has_diverged(&baseline, &timings(&[("a", 1)]), 0.1));
        assert!(!has_diverged(&baseline, &timings(&[("a", 0)]), 0.1));
    }
}
