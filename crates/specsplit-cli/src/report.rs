//! Human-readable and JSON output for assignments.

use serde::Serialize;
use specsplit_core::{Millis, Spec};
use specsplit_orchestrator::{Assignment, Strategy};

/// Compact duration: `850ms`, `12.3s`, `4m 05s`, `1h 02m`.
pub fn format_duration(ms: Millis) -> String {
    if ms < 1_000 {
        return format!("{ms}ms");
    }
    // Anything that would print as 60.0s moves up to minutes.
    if ms < 59_950 {
        return format!("{:.1}s", ms as f64 / 1_000.0);
    }
    let seconds = (ms + 500) / 1_000;
    if seconds < 3_600 {
        return format!("{}m {:02}s", seconds / 60, seconds % 60);
    }
    format!("{}h {:02}m", seconds / 3_600, (seconds % 3_600) / 60)
}

fn heading(assignment: &Assignment) -> String {
    let count = assignment.len();
    let noun = if count == 1 { "spec" } else { "specs" };
    let how = match &assignment.strategy {
        Strategy::ByDuration { bucket_sum, .. } => {
            format!("split by duration, ~{}", format_duration(*bucket_sum))
        }
        Strategy::ByName { reason } => format!("split by name: {reason}"),
    };
    format!(
        "worker {} of {} ({count} {noun}, {how})",
        assignment.index + 1,
        assignment.total
    )
}

pub fn format_assignment(assignment: &Assignment) -> String {
    let mut out = String::new();
    out.push_str(&heading(assignment));
    out.push('\n');

    if assignment.placeholder {
        out.push_str("  (no specs assigned, running placeholder)\n");
    }
    if assignment.is_empty() {
        out.push_str("  (no specs assigned)\n");
        return out;
    }

    let rows: Vec<(String, String, Option<String>)> = match assignment.timed() {
        Some(timed) => timed
            .iter()
            .enumerate()
            .map(|(k, t)| ((k + 1).to_string(), t.spec.to_string(), Some(format_duration(t.duration))))
            .collect(),
        None => assignment
            .specs
            .iter()
            .enumerate()
            .map(|(k, spec)| ((k + 1).to_string(), spec.to_string(), None))
            .collect(),
    };

    let k_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(1).max(1);
    let spec_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max(4);
    let timed = rows.iter().any(|r| r.2.is_some());

    if timed {
        out.push_str(&format!(
            "  {:>k_width$}  {:<spec_width$}  duration (estimate)\n",
            "k", "spec"
        ));
    } else {
        out.push_str(&format!("  {:>k_width$}  spec\n", "k"));
    }

    for (k, spec, duration) in &rows {
        match duration {
            Some(d) => out.push_str(&format!("  {k:>k_width$}  {spec:<spec_width$}  {d}\n")),
            None => out.push_str(&format!("  {k:>k_width$}  {spec}\n")),
        }
    }

    out
}

/// `select --format json` output.
#[derive(Debug, Serialize)]
pub struct AssignmentJson<'a> {
    pub index: usize,
    pub total: usize,
    pub strategy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub specs: &'a [Spec],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimates: Option<&'a [Millis]>,
    pub placeholder: bool,
}

impl<'a> From<&'a Assignment> for AssignmentJson<'a> {
    fn from(assignment: &'a Assignment) -> Self {
        let (strategy, fallback_reason) = match &assignment.strategy {
            Strategy::ByDuration { .. } => ("duration", None),
            Strategy::ByName { reason } => ("name", Some(reason.to_string())),
        };
        Self {
            index: assignment.index,
            total: assignment.total,
            strategy,
            fallback_reason,
            specs: &assignment.specs,
            estimates: assignment.estimates.as_deref(),
            placeholder: assignment.placeholder,
        }
    }
}
