use std::path::Path;

use anyhow::{Context, Result, bail};
use specsplit_core::SpecRun;
use specsplit_orchestrator::{Orchestrator, RecordOutcome};
use specsplit_timings::load_timings;

use super::{SplitArgs, working_dir};

pub fn record(split: &SplitArgs, results: Option<&Path>, report: Option<&Path>) -> Result<()> {
    let config = split.to_config()?;
    let orchestrator = Orchestrator::new(config, working_dir()?)?;

    let outcome = match (results, report) {
        (Some(path), _) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read results {}", path.display()))?;
            let runs: Vec<SpecRun> = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse results {}", path.display()))?;
            orchestrator.record_runs(&runs)?
        }
        (None, Some(path)) => orchestrator.record(&load_timings(path)?)?,
        (None, None) => bail!("pass --results or --report"),
    };

    match outcome {
        RecordOutcome::Created(path) => println!("✓ Created {}", path.display()),
        RecordOutcome::Updated(path) => println!("✓ Updated {}", path.display()),
        RecordOutcome::Unchanged => println!("Timings unchanged"),
    }

    Ok(())
}
