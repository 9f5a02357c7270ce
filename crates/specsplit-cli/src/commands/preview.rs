use anyhow::Result;
use specsplit_orchestrator::Orchestrator;
use tracing::info;

use super::{SpecArgs, SplitArgs, working_dir};
use crate::report;

/// Print every worker's bucket. The worker index is irrelevant here.
pub fn preview(split: &SplitArgs, input: &SpecArgs) -> Result<()> {
    let mut config = split.to_config()?;
    config.index = 0;
    let specs = input.read()?;
    info!(total = config.total, specs = specs.len(), "previewing split");

    let orchestrator = Orchestrator::new(config, working_dir()?)?;
    for assignment in orchestrator.preview(&specs) {
        println!("{}", report::format_assignment(&assignment));
    }

    Ok(())
}
