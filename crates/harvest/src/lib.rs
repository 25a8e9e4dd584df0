//! arXiv search harvesting and PDF download library.
//!
//! `harvest` runs a small, linear pipeline against the public arXiv API:
//!
//! - One metadata query against the Atom search endpoint
//! - Sequential PDF downloads into a local directory
//! - Existence-check skipping, so re-runs only fetch what is missing
//! - A courtesy delay between successful downloads
//!
//! # Getting Started
//!
//! ```no_run
//! use harvest::{pipeline::Pipeline, prelude::*, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::default().with_query("cat:cs.LG").with_max_results(10);
//!   let pipeline = Pipeline::new(config)?;
//!
//!   // Any `Reporter` receives the progress events, `()` discards them.
//!   let summary = pipeline.run(&mut ()).await?;
//!   println!("{} PDFs in {}", summary.downloaded, summary.output_dir.display());
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`config`]: Immutable run configuration and TOML loading
//! - [`paper`]: The [`PaperRecord`](paper::PaperRecord) data model
//! - [`retriever`]: Metadata query and Atom feed parsing
//! - [`download`]: Streaming PDF downloads
//! - [`outcome`]: Tagged results of network operations
//! - [`pacer`]: Courtesy delays between downloads
//! - [`pipeline`]: The driving loop tying it all together
//! - [`error`]: Error type and `Result` alias

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  time::Duration,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod config;
pub mod download;
pub mod error;
pub mod outcome;
pub mod pacer;
pub mod paper;
pub mod pipeline;
pub mod retriever;

pub use config::Config;

use crate::{error::*, outcome::*, paper::PaperRecord};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use harvest::prelude::*;
///
/// fn handle(result: Result<(), HarvestError>) {
///   if let Err(HarvestError::Network(e)) = result {
///     eprintln!("network trouble: {e}");
///   }
/// }
/// ```
pub mod prelude {
  pub use crate::{
    error::HarvestError,
    outcome::{Outcome, Rejection},
    pacer::Pacer,
    pipeline::{Progress, Reporter},
  };
}
