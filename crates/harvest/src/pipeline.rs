//! The driving loop of a harvest.
//!
//! A [`Pipeline`] owns a validated [`Config`], an HTTP client shared by its
//! [`Retriever`] and [`Downloader`], and a [`Pacer`]. [`Pipeline::run`] performs one
//! complete harvest:
//!
//! 1. Make sure the output directory exists
//! 2. Fetch the metadata once
//! 3. Walk the records in feed order, skipping those already on disk and downloading the rest
//! 4. Hand back a [`Summary`] of what happened
//!
//! Everything a user would want to see along the way is emitted as a [`Progress`]
//! event to a [`Reporter`]; the pipeline itself never prints.
//!
//! Only one request is in flight at any time. After a successful download the
//! configured courtesy delay is observed before the *next* download request, so it
//! is never paid before the first download, after the last one, after a skip, or
//! after a rejected download.

use super::*;
use crate::{
  download::Downloader,
  pacer::{Courtesy, Pacer},
  retriever::Retriever,
};

/// Events emitted while a pipeline runs.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
  /// The metadata query is about to be sent.
  FetchStarted {
    /// Number of results requested
    max_results: u32,
  },
  /// The metadata query was answered with a non-success status.
  FetchRejected {
    /// Details of the rejected request
    rejection: &'a Rejection,
  },
  /// The metadata query completed.
  Found {
    /// Number of records to process
    count: usize,
  },
  /// A record's file was already present and was left alone.
  Skipped {
    /// 1-based position of the record
    index:    usize,
    /// Number of records in this run
    total:    usize,
    /// File name the record is stored under
    filename: &'a Path,
  },
  /// A record is about to be downloaded.
  Downloading {
    /// 1-based position of the record
    index: usize,
    /// Number of records in this run
    total: usize,
    /// Shortened title, see [`PaperRecord::title_preview`]
    title: &'a str,
  },
  /// A record was downloaded and written to disk.
  Saved {
    /// 1-based position of the record
    index: usize,
    /// Number of records in this run
    total: usize,
    /// Where the file was written
    path:  &'a Path,
    /// Size of the file
    bytes: u64,
  },
  /// A record's download was answered with a non-success status.
  Failed {
    /// 1-based position of the record
    index:     usize,
    /// Number of records in this run
    total:     usize,
    /// Details of the rejected request
    rejection: &'a Rejection,
  },
  /// The run is over.
  Finished {
    /// Final counts
    summary: &'a Summary,
  },
}

/// Receiver for [`Progress`] events.
pub trait Reporter {
  /// Handles one event.
  fn report(&mut self, progress: Progress<'_>);
}

/// The silent reporter.
impl Reporter for () {
  fn report(&mut self, _progress: Progress<'_>) {}
}

/// Counts describing a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
  /// Records returned by the metadata query
  pub found:      usize,
  /// Records whose file is on disk at the end of the run, `saved + skipped`
  pub downloaded: usize,
  /// Files written during this run
  pub saved:      usize,
  /// Records whose file already existed
  pub skipped:    usize,
  /// Downloads answered with a non-success status
  pub failed:     usize,
  /// Directory the files live in
  pub output_dir: PathBuf,
  /// Set when the metadata query itself was rejected
  pub rejection:  Option<Rejection>,
}

/// One configured harvest, ready to run.
#[derive(Debug)]
pub struct Pipeline<P = Courtesy> {
  /// The configuration this pipeline was built from
  config:     Config,
  /// Metadata side of the API
  retriever:  Retriever,
  /// PDF side of the API
  downloader: Downloader,
  /// Implementation of the courtesy delay
  pacer:      P,
}

impl Pipeline<Courtesy> {
  /// Validates `config` and builds a pipeline that sleeps between downloads.
  ///
  /// # Errors
  ///
  /// Returns an error if the configuration does not validate or the HTTP client
  /// cannot be constructed.
  pub fn new(config: Config) -> Result<Self> {
    config.validate()?;
    let client = build_client(&config)?;
    Ok(Self {
      retriever: Retriever::new(client.clone(), config.api_base_url.clone()),
      downloader: Downloader::new(client),
      pacer: Courtesy,
      config,
    })
  }
}

impl<P: Pacer> Pipeline<P> {
  /// Replaces the pacer.
  pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> Pipeline<Q> {
    Pipeline { config: self.config, retriever: self.retriever, downloader: self.downloader, pacer }
  }

  /// The configuration this pipeline runs with.
  pub fn config(&self) -> &Config { &self.config }

  /// Runs only the metadata query.
  ///
  /// Reports [`Progress::FetchStarted`] and then either [`Progress::Found`] or
  /// [`Progress::FetchRejected`]. The output directory is not touched.
  pub async fn discover(&self, reporter: &mut impl Reporter) -> Result<Outcome<Vec<PaperRecord>>> {
    reporter.report(Progress::FetchStarted { max_results: self.config.max_results });
    let outcome = self.retriever.fetch(&self.config.query, self.config.max_results).await?;
    match &outcome {
      Outcome::Completed(papers) => reporter.report(Progress::Found { count: papers.len() }),
      Outcome::Rejected(rejection) => reporter.report(Progress::FetchRejected { rejection }),
    }
    Ok(outcome)
  }

  /// Runs a complete harvest.
  ///
  /// A rejected metadata query or a rejected download is reported and the run carries
  /// on; see [`Summary`] for how they are counted.
  ///
  /// # Errors
  ///
  /// This function will return an error, abandoning the rest of the run, if:
  /// - The output directory cannot be created or a file cannot be written
  /// - Any request fails at the transport level
  /// - The metadata response cannot be parsed
  pub async fn run(&self, reporter: &mut impl Reporter) -> Result<Summary> {
    let output_dir = &self.config.output_dir;
    tokio::fs::create_dir_all(output_dir).await?;
    debug!("Output directory ready: {}", output_dir.display());

    let mut summary = Summary { output_dir: output_dir.clone(), ..Summary::default() };

    let papers = match self.discover(reporter).await? {
      Outcome::Completed(papers) => papers,
      Outcome::Rejected(rejection) => {
        summary.rejection = Some(rejection);
        reporter.report(Progress::Found { count: 0 });
        Vec::new()
      },
    };
    summary.found = papers.len();

    let total = papers.len();
    let delay = self.config.courtesy_delay();
    let mut spacing_due = false;

    for (index, paper) in (1..).zip(&papers) {
      let filename = paper.filename();
      let dest = output_dir.join(&filename);

      if tokio::fs::try_exists(&dest).await? {
        trace!("{} already present", dest.display());
        summary.skipped += 1;
        summary.downloaded += 1;
        reporter.report(Progress::Skipped { index, total, filename: &filename });
        continue;
      }

      if spacing_due && !delay.is_zero() {
        self.pacer.pause(delay).await;
      }
      spacing_due = false;

      let title = paper.title_preview();
      reporter.report(Progress::Downloading { index, total, title: &title });
      match self.downloader.download(&paper.pdf_url, &dest).await? {
        Outcome::Completed(bytes) => {
          summary.saved += 1;
          summary.downloaded += 1;
          spacing_due = true;
          reporter.report(Progress::Saved { index, total, path: &dest, bytes });
        },
        Outcome::Rejected(rejection) => {
          summary.failed += 1;
          reporter.report(Progress::Failed { index, total, rejection: &rejection });
        },
      }
    }

    info!(
      "Harvest finished: {} found, {} saved, {} skipped, {} failed",
      summary.found, summary.saved, summary.skipped, summary.failed
    );
    reporter.report(Progress::Finished { summary: &summary });
    Ok(summary)
  }
}

/// Builds the HTTP client shared by the retriever and the downloader.
fn build_client(config: &Config) -> Result<reqwest::Client> {
  let mut builder = reqwest::Client::builder()
    .user_agent(config.user_agent.as_str())
    .connect_timeout(config.connect_timeout());
  if let Some(timeout) = config.request_timeout() {
    builder = builder.timeout(timeout);
  }
  Ok(builder.build()?)
}
