pub mod merge;
pub mod preview;
pub mod record;
pub mod select;

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use specsplit_core::{Spec, SplitConfig, parse_spec_list};

/// Split settings shared by `select`, `preview`, and `record`.
///
/// Values come from `--config`, then flags or their environment variables.
#[derive(Args, Debug, Clone, Default)]
pub struct SplitArgs {
    /// TOML file with split settings; flags override it
    #[arg(long, env = "SPLIT_CONFIG")]
    pub config: Option<PathBuf>,
    /// Number of parallel workers
    #[arg(long = "split", env = "SPLIT", allow_negative_numbers = true)]
    pub total: Option<i64>,
    /// Zero-based index of this worker
    #[arg(long = "split-index", env = "SPLIT_INDEX", allow_negative_numbers = true)]
    pub index: Option<i64>,
    /// Timings file to read durations from
    #[arg(long = "split-file", env = "SPLIT_FILE")]
    pub timings_file: Option<PathBuf>,
    /// Where to write recorded timings (defaults to --split-file)
    #[arg(long = "split-output-file", env = "SPLIT_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
    /// Relative duration change that triggers a timings rewrite
    #[arg(long, env = "SPLIT_THRESHOLD")]
    pub threshold: Option<f64>,
    /// Spec to run when this worker gets nothing
    #[arg(long, env = "SPLIT_PLACEHOLDER")]
    pub placeholder: Option<String>,
    /// Only look for the timings file in the working directory
    #[arg(long)]
    pub no_search_parents: bool,
}

impl SplitArgs {
    pub fn to_config(&self) -> Result<SplitConfig> {
        let mut config = match &self.config {
            Some(path) => SplitConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SplitConfig::default(),
        };

        if let Some(total) = self.total {
            config.total = total;
        }
        if let Some(index) = self.index {
            config.index = index;
        }
        if let Some(path) = &self.timings_file {
            config.timings_file = Some(path.clone());
        }
        if let Some(path) = &self.output_file {
            config.output_file = Some(path.clone());
        }
        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                bail!("--threshold must be a non-negative number, got {threshold}");
            }
            config.threshold = threshold;
        }
        if let Some(placeholder) = &self.placeholder {
            config.placeholder_spec = Some(Spec::from(placeholder.as_str()));
        }
        if self.no_search_parents {
            config.search_parents = false;
        }
        Ok(config)
    }
}

/// Where the list of discovered specs comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct SpecArgs {
    /// Comma-separated spec files to split
    #[arg(long, env = "SPEC")]
    pub spec: Option<String>,
    /// File listing spec files, one per line. Without --spec or --spec-list,
    /// the list is read from stdin.
    #[arg(long)]
    pub spec_list: Option<PathBuf>,
}

impl SpecArgs {
    pub fn read(&self) -> Result<Vec<Spec>> {
        if let Some(list) = &self.spec {
            let specs = parse_spec_list(list);
            tracing::info!(count = specs.len(), "using explicit spec list");
            return Ok(specs);
        }

        if let Some(path) = &self.spec_list {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read spec list {}", path.display()))?;
            return Ok(parse_lines(&content));
        }

        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            bail!("no specs given. Pass --spec, --spec-list, or pipe spec paths on stdin.");
        }
        let mut content = String::new();
        stdin
            .read_to_string(&mut content)
            .context("failed to read spec list from stdin")?;
        Ok(parse_lines(&content))
    }
}

fn parse_lines(content: &str) -> Vec<Spec> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Spec::from)
        .collect()
}

/// Directory relative timings paths resolve from.
pub fn working_dir() -> Result<PathBuf> {
    std::env::current_dir().context("cannot determine the working directory")
}
