//! Per-spec cost estimates for the scheduler.

use std::collections::HashMap;

use specsplit_core::{Baseline, Millis, Spec, TimedSpec};
use tracing::debug;

use crate::error::{TimingsError, TimingsResult};

/// Latest duration per spec; a repeated spec keeps its last entry.
fn latest_durations(baseline: &Baseline) -> HashMap<&str, Millis> {
    baseline
        .durations
        .iter()
        .map(|t| (t.spec.as_str(), t.duration))
        .collect()
}

fn rounded_mean<'a>(durations: impl ExactSizeIterator<Item = &'a Millis>) -> TimingsResult<Millis> {
    let count = durations.len() as u128;
    if count == 0 {
        return Err(TimingsError::EmptyBaseline);
    }
    let sum: u128 = durations.map(|&d| u128::from(d)).sum();
    Ok(((2 * sum + count) / (2 * count)) as Millis)
}

/// Mean duration across the distinct specs in the baseline, rounded half up.
pub fn mean_duration(baseline: &Baseline) -> TimingsResult<Millis> {
    rounded_mean(latest_durations(baseline).values())
}

/// Pair every spec with its baseline duration, or the baseline mean when
/// the spec has never been timed.
///
/// An empty baseline gives no meaningful mean and is reported as
/// `EmptyBaseline`; callers fall back to splitting by name.
pub fn estimate_durations(specs: &[Spec], baseline: &Baseline) -> TimingsResult<Vec<TimedSpec>> {
    let known = latest_durations(baseline);
    let mean = rounded_mean(known.values())?;

    let mut unseen = 0usize;
    let estimates: Vec<TimedSpec> = specs
        .iter()
        .map(|spec| {
            let duration = known.get(spec.as_str()).copied().unwrap_or_else(|| {
                unseen += 1;
                mean
            });
            TimedSpec::new(spec.clone(), duration)
        })
        .collect();

    debug!(
        specs = specs.len(),
        unseen,
        mean_ms = mean,
        "estimated spec durations from baseline"
    );
    Ok(estimates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use specsplit_core::Timings;

    fn baseline() -> Timings {
        Timings::new(vec![
            TimedSpec::new("a.cy.js", 1000),
            TimedSpec::new("b.cy.js", 2000),
        ])
    }

    #[test]
    fn known_specs_use_baseline_duration() {
        let specs = vec![Spec::from("b.cy.js"), Spec::from("a.cy.js")];
        let estimates = estimate_durations(&specs, &baseline()).unwrap();
        assert_eq!(
            estimates,
            vec![TimedSpec::new("b.cy.js", 2000), TimedSpec::new("a.cy.js", 1000)]
        );
    }

    #[test]
    fn unseen_specs_get_the_mean() {
        let specs = vec![Spec::from("a.cy.js"), Spec::from("new.cy.js")];
        let estimates = estimate_durations(&specs, &baseline()).unwrap();
        assert_eq!(estimates[1], TimedSpec::new("new.cy.js", 1500));
    }

    #[test]
    fn mean_rounds_half_up() {
        let timings = Timings::new(vec![TimedSpec::new("a", 1), TimedSpec::new("b", 2)]);
        assert_eq!(mean_duration(&timings).unwrap(), 2);
        let timings = Timings::new(vec![
            TimedSpec::new("a", 1),
            TimedSpec::new("b", 1),
            TimedSpec::new("c", 2),
        ]);
        assert_eq!(mean_duration(&timings).unwrap(), 1);
    }

    #[test]
    fn repeated_spec_counts_once_in_the_mean() {
        let timings = Timings::new(vec![
            TimedSpec::new("a.cy.js", 100),
            TimedSpec::new("a.cy.js", 100),
            TimedSpec::new("b.cy.js", 1000),
        ]);
        assert_eq!(mean_duration(&timings).unwrap(), 550);

        let timings = Timings::new(vec![
            TimedSpec::new("a.cy.js", 300),
            TimedSpec::new("b.cy.js", 1000),
            TimedSpec::new("a.cy.js", 100),
        ]);
        let estimates = estimate_durations(&[Spec::from("a.cy.js"), Spec::from("new.cy.js")], &timings).unwrap();
        assert_eq!(estimates[0].duration, 100);
        assert_eq!(estimates[1].duration, 550);
    }

    #[test]
    fn empty_baseline_is_an_error_not_a_division_by_zero() {
        let specs = vec![Spec::from("a.cy.js")];
        assert!(matches!(
            estimate_durations(&specs, &Timings::default()),
            Err(TimingsError::EmptyBaseline)
        ));
    }
}
