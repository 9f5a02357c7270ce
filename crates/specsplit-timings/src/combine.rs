//! Fold partial reports from several workers into one baseline.

use std::collections::BTreeMap;

use specsplit_core::{Millis, PartialReport, Spec, TimedSpec, Timings};
use tracing::debug;

/// Combine reports into a single document sorted by spec.
///
/// A spec seen once keeps its duration. Each further sighting replaces the
/// running value with the mean of the running value and the new duration,
/// so with three or more reports the later ones weigh more. Existing
/// baselines were produced this way; keep it. Values are rounded to whole
/// milliseconds (half up) only at the end. Running values are `f64`, so
/// durations are exact only up to 2^53 ms.
pub fn combine_reports<'a>(reports: impl IntoIterator<Item = &'a PartialReport>) -> Timings {
    let mut running: BTreeMap<&'a Spec, f64> = BTreeMap::new();
    let mut report_count = 0usize;

    for report in reports {
        report_count += 1;
        for entry in &report.durations {
            let observed = entry.duration as f64;
            running
                .entry(&entry.spec)
                .and_modify(|value| *value = (*value + observed) / 2.0)
                .or_insert(observed);
        }
    }

    let durations: Vec<TimedSpec> = running
        .into_iter()
        .map(|(spec, value)| TimedSpec::new(spec.clone(), value.round() as Millis))
        .collect();

    debug!(reports = report_count, specs = durations.len(), "combined timings reports");
    Timings::new(durations)
}
