// LogMerge - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Source collection (command-line sources or the interactive dialogue)
// 4. Merging and printing the report

use clap::Parser;
use logmerge::app::{prompt, session};
use logmerge::core::export::{self, OutputFormat};
use logmerge::core::parser::{self, ShortBatchPolicy};
use logmerge::core::sorter::SortStrategy;
use logmerge::platform::config;
use logmerge::util::{self, error::Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// LogMerge - merge timestamped log entries from several servers into one
/// chronological sequence.
///
/// Without --source, the servers and their timestamps are asked for
/// interactively on stdin.
#[derive(Parser, Debug)]
#[command(name = "logmerge", version, about)]
struct Cli {
    /// Timestamps of one server, space-separated. Repeat once per server.
    #[arg(short = 's', long = "source", value_name = "TIMESTAMPS", allow_hyphen_values = true)]
    sources: Vec<String>,

    /// Sorter implementation: recursive, bottom-up or parallel.
    #[arg(long)]
    strategy: Option<SortStrategy>,

    /// Output format: text, json or csv.
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Reject servers that supply fewer timestamps than they declared.
    #[arg(long)]
    strict: bool,

    /// Directory containing config.toml (defaults to the platform config dir).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Merge failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Config first: it may carry the log level.
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(config::default_config_dir);
    let (app_config, config_warnings) = config::load_config(&config_dir);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        config_dir = %config_dir.display(),
        "LogMerge starting"
    );
    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Config warning; default used");
    }

    if app_config.worker_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(app_config.worker_threads)
            .build_global()
        {
            tracing::warn!(error = %e, "Could not size the rayon pool; using default");
        }
    }

    // CLI flags override config.
    let options = session::MergeOptions {
        strategy: cli.strategy.unwrap_or(app_config.strategy),
        parallel_threshold: app_config.parallel_threshold,
    };
    let format = cli.format.unwrap_or(app_config.output_format);
    let policy = if cli.strict || app_config.strict_counts {
        ShortBatchPolicy::Reject
    } else {
        ShortBatchPolicy::Warn
    };

    let interactive = cli.sources.is_empty();
    let batches = if interactive {
        let stdin = io::stdin();
        let stdout = io::stdout();
        prompt::collect_sources(stdin.lock(), stdout.lock(), policy)?.batches
    } else {
        cli.sources
            .iter()
            .enumerate()
            .map(|(i, raw)| parser::tokens_to_batch(i + 1, raw))
            .collect::<std::result::Result<Vec<_>, _>>()?
    };

    let report = session::merge_batches(&batches, &options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if interactive && format == OutputFormat::Text {
        // Separate the report from the dialogue.
        writeln!(out).map_err(util::error::ExportError::Io)?;
    }
    export::write_report(&report, format, &mut out)?;

    Ok(())
}
