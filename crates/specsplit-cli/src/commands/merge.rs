use std::path::Path;

use anyhow::{Result, bail};
use specsplit_timings::{combine_report_files, find_reports, save_timings, to_json};
use tracing::info;

/// Combine every `split_file` under `parent_folder`.
///
/// Workers whose record step was unchanged write no file, so a run where
/// none diverged leaves nothing to find and this fails.
pub fn merge(parent_folder: &Path, split_file: &str, output: Option<&Path>) -> Result<()> {
    info!(
        "finding all timings files {}/**/{}",
        parent_folder.display(),
        split_file
    );
    let found = find_reports(parent_folder, split_file);
    if found.is_empty() {
        bail!(
            "no {split_file} files found under {}",
            parent_folder.display()
        );
    }
    for path in &found {
        info!(path = %path.display(), "found timings file");
    }

    let combined = combine_report_files(&found)?;

    match output {
        Some(path) => {
            save_timings(path, &combined)?;
            println!(
                "✓ Combined {} files into {} ({} specs)",
                found.len(),
                path.display(),
                combined.len()
            );
        }
        None => print!("{}", to_json(&combined)?),
    }

    Ok(())
}
