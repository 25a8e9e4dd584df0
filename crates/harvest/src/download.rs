//! Streaming PDF downloads.
//!
//! The [`Downloader`] fetches one URL and streams the body to a file, never holding
//! more than one network chunk in memory. Bytes are written in order, in pieces of
//! at most [`CHUNK_SIZE`], and nothing is verified afterwards: what the server sent
//! is what ends up on disk.

use tokio::{fs::File, io::AsyncWriteExt};

use super::*;

/// Largest single write issued while streaming a body to disk.
pub const CHUNK_SIZE: usize = 1024;

/// Client for fetching PDF documents.
#[derive(Debug, Clone)]
pub struct Downloader {
  /// Internal web client used for the downloads.
  client: reqwest::Client,
}

impl Downloader {
  /// Creates a downloader on top of an existing HTTP client.
  pub fn new(client: reqwest::Client) -> Self { Self { client } }

  /// Downloads `url` into the file at `dest`.
  ///
  /// The destination is created, or truncated if it exists, only once the server has
  /// answered with a success status.
  ///
  /// # Returns
  ///
  /// - [`Outcome::Completed`] with the number of bytes written
  /// - [`Outcome::Rejected`] if the server answered with a non-success status, in
  ///   which case the filesystem was not touched
  ///
  /// # Errors
  ///
  /// This function will return an error if the request or the body stream fails, or
  /// the file cannot be written. A file left behind by a failure midway through the
  /// body is removed first, so a later run does not take it for a finished download.
  pub async fn download(&self, url: &str, dest: &Path) -> Result<Outcome<u64>> {
    debug!("Downloading {url} to {}", dest.display());

    let mut response = self.client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
      trace!("pdf_url response: {response:?}");
      warn!("Download of {url} answered {status}");
      return Ok(Outcome::Rejected(Rejection::new(url, status)));
    }

    let file = File::create(dest).await?;
    match write_body(&mut response, file).await {
      Ok(written) => {
        debug!("Wrote {written} bytes to {}", dest.display());
        Ok(Outcome::Completed(written))
      },
      Err(e) => {
        if let Err(remove_err) = tokio::fs::remove_file(dest).await {
          warn!("Could not remove partial file {}: {remove_err}", dest.display());
        }
        Err(e)
      },
    }
  }
}

/// Streams the response body into `file`, returning the number of bytes written.
async fn write_body(response: &mut reqwest::Response, mut file: File) -> Result<u64> {
  let mut written = 0;
  while let Some(chunk) = response.chunk().await? {
    for piece in chunk.chunks(CHUNK_SIZE) {
      file.write_all(piece).await?;
      written += piece.len() as u64;
    }
  }
  file.flush().await?;
  Ok(written)
}
