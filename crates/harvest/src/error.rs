//! Error types for the harvest library.
//!
//! Only failures that abort a run live here. An upstream service answering with a
//! non-success status is not an error: it comes back as
//! [`Outcome::Rejected`](crate::outcome::Outcome::Rejected) and the pipeline carries on.
//!
//! # Examples
//!
//! ```no_run
//! use harvest::{pipeline::Pipeline, prelude::*, Config};
//!
//! # async fn example() -> Result<(), HarvestError> {
//! let pipeline = Pipeline::new(Config::default())?;
//! match pipeline.run(&mut ()).await {
//!   Err(HarvestError::Xml(e)) => println!("Upstream sent a broken feed: {e}"),
//!   Err(HarvestError::Network(e)) => println!("Network error: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(summary) => println!("Downloaded {}", summary.downloaded),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`harvest`](crate) crate.
pub type Result<T> = core::result::Result<T, HarvestError>;

/// Errors that abort a harvesting run.
#[derive(Error, Debug)]
pub enum HarvestError {
  /// A network request failed at the transport level.
  ///
  /// This covers refused connections, DNS failures, TLS errors, timeouts and
  /// a response body stream that breaks off midway.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - The output directory cannot be created
  /// - A PDF cannot be written (permissions, disk full)
  /// - A configuration file cannot be read
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The metadata response was not a well-formed Atom feed, or an entry lacked
  /// its `title` or `id` element.
  #[error(transparent)]
  Xml(#[from] quick_xml::DeError),

  /// A configuration file was not valid TOML for [`Config`](crate::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configured API base URL could not be parsed.
  #[error(transparent)]
  Url(#[from] url::ParseError),

  /// The configuration was readable but describes an impossible run.
  #[error("{0}")]
  Config(String),
}
