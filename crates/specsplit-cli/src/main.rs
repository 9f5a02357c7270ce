use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod report;

use commands::{SpecArgs, SplitArgs};

#[derive(Parser)]
#[command(
    name = "specsplit",
    about = "Split spec files across parallel CI workers",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the specs this worker should run.
    ///
    /// Uses the timings file to balance workers by duration when it is
    /// available; otherwise splits the spec list by name.
    Select {
        #[command(flatten)]
        split: SplitArgs,
        #[command(flatten)]
        input: SpecArgs,
        /// Output format: table, list, or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// Show how the specs would be split across every worker
    Preview {
        #[command(flatten)]
        split: SplitArgs,
        #[command(flatten)]
        input: SpecArgs,
    },
    /// Record observed spec durations into the timings file
    Record {
        #[command(flatten)]
        split: SplitArgs,
        /// JSON array of run results: [{"spec", "duration", "status"}]
        #[arg(long, required_unless_present = "report", conflicts_with = "report")]
        results: Option<PathBuf>,
        /// Timings document with observed durations
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Combine timings files left behind by several workers
    Merge {
        /// Folder to search recursively
        #[arg(long, default_value = ".")]
        parent_folder: PathBuf,
        /// File name of each worker's timings file
        #[arg(long, default_value = "timings.json")]
        split_file: String,
        /// Write the combined timings here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "specsplit=debug" } else { "specsplit=info" };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse()?)
        );
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Select { split, input, format } => {
            commands::select::select(&split, &input, &format)
        }
        Commands::Preview { split, input } => commands::preview::preview(&split, &input),
        Commands::Record { split, results, report } => {
            commands::record::record(&split, results.as_deref(), report.as_deref())
        }
        Commands::Merge { parent_folder, split_file, output } => {
            commands::merge::merge(&parent_folder, &split_file, output.as_deref())
        }
    }
}
