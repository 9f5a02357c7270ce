//! Collect partial reports written by several workers.
//!
//! Each CI machine leaves its own timings file behind, usually as a
//! downloaded artifact in its own folder. These are combined once all
//! workers have finished.

use std::path::{Path, PathBuf};

use specsplit_core::Timings;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::combine::combine_reports;
use crate::error::TimingsResult;
use crate::store::load_timings;

/// Every file named `file_name` below `parent`, sorted by path.
pub fn find_reports(parent: &Path, file_name: &str) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(parent)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable path while searching for reports");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
        .map(|entry| entry.into_path())
        .collect();
    found.sort();

    debug!(parent = %parent.display(), file_name, count = found.len(), "found timings reports");
    found
}

/// Load every report and combine them. Any unreadable report fails the
/// whole combine; a partial combination would silently drop timings.
pub fn combine_report_files(paths: &[PathBuf]) -> TimingsResult<Timings> {
    let reports = paths
        .iter()
        .map(|path| load_timings(path))
        .collect::<TimingsResult<Vec<_>>>()?;
    let combined = combine_reports(&reports);
    info!(
        reports = reports.len(),
        specs = combined.len(),
        "combined timings from worker reports"
    );
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimingsError;
    use crate::store::save_timings;
    use specsplit_core::TimedSpec;
    use std::fs;

    #[test]
    fn finds_reports_in_nested_folders() {
        let dir = tempfile::tempdir().unwrap();
        for worker in ["worker-2", "worker-1"] {
            let path = dir.path().join(worker).join("timings.json");
            save_timings(&path, &Timings::default()).unwrap();
        }
        fs::write(dir.path().join("worker-1/other.json"), "{}").unwrap();

        let found = find_reports(dir.path(), "timings.json");
        assert_eq!(
            found,
            vec![
                dir.path().join("worker-1/timings.json"),
                dir.path().join("worker-2/timings.json"),
            ]
        );
    }

    #[test]
    fn missing_parent_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_reports(&dir.path().join("absent"), "timings.json").is_empty());
    }

    #[test]
    fn combines_found_reports() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a/timings.json");
        let second = dir.path().join("b/timings.json");
        save_timings(
            &first,
            &Timings::new(vec![TimedSpec::new("x.cy.js", 100), TimedSpec::new("y.cy.js", 10)]),
        )
        .unwrap();
        save_timings(&second, &Timings::new(vec![TimedSpec::new("x.cy.js", 111)])).unwrap();

        let combined = combine_report_files(&find_reports(dir.path(), "timings.json")).unwrap();
        assert_eq!(
            combined,
            Timings::new(vec![TimedSpec::new("x.cy.js", 106), TimedSpec::new("y.cy.js", 10)])
        );
    }

    #[test]
    fn corrupt_report_fails_the_combine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timings.json");
        fs::write(&path, "not json").unwrap();

        let result = combine_report_files(&[path]);
        assert!(matches!(result, Err(TimingsError::BaselineParseError { .. })));
    }
}
