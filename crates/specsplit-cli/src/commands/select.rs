use anyhow::Result;
use specsplit_orchestrator::Orchestrator;

use super::{SpecArgs, SplitArgs, working_dir};
use crate::report;

pub fn select(split: &SplitArgs, input: &SpecArgs, format: &str) -> Result<()> {
    let config = split.to_config()?;
    let specs = input.read()?;
    let orchestrator = Orchestrator::new(config, working_dir()?)?;
    let assignment = orchestrator.assign(&specs);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report::AssignmentJson::from(&assignment))?);
        }
        "list" => {
            for spec in &assignment.specs {
                println!("{spec}");
            }
        }
        _ => {
            print!("{}", report::format_assignment(&assignment));
        }
    }

    Ok(())
}
