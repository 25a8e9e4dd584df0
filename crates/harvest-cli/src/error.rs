//! Error type for the harvest CLI.

use thiserror::Error;

use super::*;

/// Error type alias used throughout the CLI.
pub type Result<T> = core::result::Result<T, CliError>;

/// Failures that end a CLI invocation with a non-zero exit code.
#[derive(Error, Debug)]
pub enum CliError {
  /// The library reported a fatal error.
  #[error(transparent)]
  Harvest(#[from] HarvestError),

  /// `list` had nothing to show because the metadata query was refused.
  ///
  /// A full `run` treats the same situation as an empty harvest instead.
  #[error("The metadata query was rejected: {0}")]
  MetadataRejected(Rejection),
}
