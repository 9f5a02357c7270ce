//! Timings files on disk.
//!
//! Files are pretty-printed JSON with a trailing newline. Writes go to a
//! sibling temp file that is then renamed over the target, so readers see
//! either the old or the new document. This does not serialize concurrent
//! writers; see the crate docs.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use specsplit_core::Timings;
use tracing::debug;

use crate::error::{TimingsError, TimingsResult};

/// Resolve `path` against `start`.
///
/// Absolute paths are only checked for existence. Relative paths are tried
/// in `start`, then (with `search_parents`) in each parent directory,
/// stopping after the first directory that contains `.git`.
pub fn find_file(path: &Path, start: &Path, search_parents: bool) -> Option<PathBuf> {
    if path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }

    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(path);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "found timings file");
            return Some(candidate);
        }
        if !search_parents {
            return None;
        }
        if dir.join(".git").exists() {
            debug!(root = %dir.display(), file = %path.display(), "reached git root without finding file");
            return None;
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Parse a timings document. `path` is only used for the error message.
pub fn parse_timings(content: &str, path: &Path) -> TimingsResult<Timings> {
    serde_json::from_str(content).map_err(|source| TimingsError::BaselineParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a timings file.
pub fn load_timings(path: &Path) -> TimingsResult<Timings> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            TimingsError::BaselineNotFound(path.to_path_buf())
        } else {
            TimingsError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let timings = parse_timings(&content, path)?;
    debug!(path = %path.display(), specs = timings.len(), "loaded timings");
    Ok(timings)
}

/// Serialize as it will be written: two-space indent, trailing newline.
pub fn to_json(timings: &Timings) -> TimingsResult<String> {
    let mut json = serde_json::to_string_pretty(timings)?;
    json.push('\n');
    Ok(json)
}

/// Write `timings` to `path`, creating parent directories as needed.
pub fn save_timings(path: &Path, timings: &Timings) -> TimingsResult<()> {
    let json = to_json(timings)?;
    let io_err = |source: std::io::Error| TimingsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            std::fs::create_dir_all(parent).map_err(io_err)?;
            parent
        }
        None => Path::new("."),
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "timings.json".to_string());
    // Unique per call, so concurrent saves never share a temp file.
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(io_err)?;
    tmp.write_all(json.as_bytes()).map_err(io_err)?;
    tmp.persist(path).map_err(|err| io_err(err.error))?;

    debug!(path = %path.display(), specs = timings.len(), "saved timings");
    Ok(())
}
