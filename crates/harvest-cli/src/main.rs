//! Command line interface for the harvest arXiv downloader.
//!
//! This crate wraps the `harvest` library in a small CLI:
//! - `harvest run` fetches the newest papers for a query and downloads every PDF not yet on disk
//! - `harvest list` shows what a run would download, without downloading anything
//!
//! Running `harvest` without a subcommand is the same as `harvest run`.
//!
//! # Usage
//!
//! ```bash
//! # Download the 100 newest cs.AI papers into data/raw
//! harvest
//!
//! # A different query and destination, with a config file for the rest
//! harvest --config harvest.toml --query "cat:math.AG" --output-dir papers run
//!
//! # Peek at the 5 newest results
//! harvest --max-results 5 list
//! ```
//!
//! Progress goes to stdout. Logging goes to stderr and is controlled by `-v`
//! (repeatable) or `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{path::PathBuf, process::ExitCode};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use harvest::{
  paper::PaperRecord,
  pipeline::{Pipeline, Progress, Reporter},
  prelude::*,
  Config,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(author, version, about = "Download the PDFs of the newest arXiv papers for a query")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to a TOML configuration file. If not specified, the platform configuration
  /// directory is searched and the built-in defaults are used when nothing is found.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Settings that take precedence over the configuration file
  #[command(flatten)]
  overrides: Overrides,

  /// The subcommand to execute, `run` when omitted
  #[command(subcommand)]
  command: Option<Commands>,
}

/// Per-invocation overrides of [`Config`] fields.
#[derive(Args, Clone, Debug, Default)]
pub struct Overrides {
  /// Search expression in arXiv query syntax, e.g. "cat:cs.AI"
  #[arg(long, short, global = true)]
  query: Option<String>,

  /// Number of results to request
  #[arg(long, short, global = true)]
  max_results: Option<u32>,

  /// Directory the PDFs are written to
  #[arg(long, short, global = true)]
  output_dir: Option<PathBuf>,

  /// arXiv query endpoint
  #[arg(long, global = true)]
  api_base_url: Option<String>,

  /// Seconds to wait after a successful download before starting the next one
  #[arg(long, global = true)]
  delay: Option<u64>,
}

impl Overrides {
  /// Applies every override that was given on the command line.
  fn apply(self, mut config: Config) -> Config {
    if let Some(query) = self.query {
      config = config.with_query(query);
    }
    if let Some(max_results) = self.max_results {
      config = config.with_max_results(max_results);
    }
    if let Some(output_dir) = self.output_dir {
      config = config.with_output_dir(output_dir);
    }
    if let Some(api_base_url) = self.api_base_url {
      config = config.with_api_base_url(api_base_url);
    }
    if let Some(delay) = self.delay {
      config.courtesy_delay_secs = delay;
    }
    config
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set. Logs are written to stderr so they never
/// interleave with the progress lines on stdout.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Entry point for the harvest CLI application
///
/// Parses the command line, sets up logging, assembles the [`Config`] and executes
/// the requested command. Any error that aborts the command is printed to stderr and
/// turns into a non-zero exit code.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  match execute(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{}{}", style(ERROR_PREFIX).red(), style(e).red());
      ExitCode::FAILURE
    },
  }
}

/// Loads the configuration and dispatches to the selected command.
async fn execute(cli: Cli) -> Result<()> {
  let config = cli.overrides.apply(Config::load(cli.config.as_deref())?);
  debug!("Effective configuration: {config:?}");

  match cli.command.unwrap_or_default() {
    Commands::Run => run(config).await,
    Commands::List => list(config).await,
  }
}
