//! Console rendering of pipeline progress.

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";

/// [`Reporter`] that prints one line per event to stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
  /// Whether downloads follow the metadata query, which changes the "found" line
  downloading: bool,
}

impl ConsoleReporter {
  /// Reporter for a full run.
  pub fn run() -> Self { Self { downloading: true } }

  /// Reporter for a metadata-only listing.
  pub fn listing() -> Self { Self { downloading: false } }
}

impl Reporter for ConsoleReporter {
  fn report(&mut self, progress: Progress<'_>) {
    match progress {
      Progress::FetchStarted { max_results } => println!(
        "{}Fetching metadata for {} papers from arXiv...",
        style(INFO_PREFIX).blue(),
        style(max_results).cyan()
      ),
      Progress::FetchRejected { rejection } => println!(
        "{}Error fetching metadata: {}",
        style(ERROR_PREFIX).red(),
        style(rejection.status.as_u16()).red()
      ),
      Progress::Found { count } if self.downloading =>
        println!("Found {} papers. Downloading...", style(count).cyan()),
      Progress::Found { count } => println!("Found {} papers.", style(count).cyan()),
      Progress::Skipped { index, total, filename } => println!(
        "[{index}/{total}] Skipping {} (already exists)",
        style(filename.display()).yellow()
      ),
      Progress::Downloading { index, total, title } =>
        println!("[{index}/{total}] Downloading: {}...", style(title).bold()),
      Progress::Saved { path, bytes, .. } => debug!("Saved {bytes} bytes to {}", path.display()),
      Progress::Failed { rejection, .. } => println!(
        "{}Failed to download {} {}",
        style(WARNING_PREFIX).yellow(),
        style(&rejection.url).yellow(),
        style(format!("({})", rejection.status)).dim()
      ),
      Progress::Finished { summary } => println!(
        "\n{}Download complete! {} PDFs saved to {}",
        style(SUCCESS_PREFIX).green(),
        style(summary.downloaded).green(),
        style(summary.output_dir.display()).yellow()
      ),
    }
  }
}

/// Prints one discovered paper as `[i/n] id  title`.
pub fn print_record(index: usize, total: usize, paper: &PaperRecord) {
  println!(
    "[{index}/{total}] {}  {}",
    style(&paper.id).cyan(),
    paper.title.split_whitespace().collect::<Vec<_>>().join(" ")
  );
}
