//! Subcommands of the harvest CLI.

use super::*;

pub mod list;
pub mod run;

pub use list::list;
pub use run::run;

/// Available commands for the CLI
#[derive(Subcommand, Clone, Copy, Debug, Default)]
pub enum Commands {
  /// Fetch the metadata and download every PDF not already on disk (the default)
  #[default]
  Run,

  /// Fetch the metadata and list the papers, without downloading anything
  List,
}
