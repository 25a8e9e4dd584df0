//! Metadata retrieval from the arXiv query API.
//!
//! The [`Retriever`] sends one search request, newest submissions first, and turns the
//! Atom feed it gets back into an ordered list of [`PaperRecord`]s. Only the `title`
//! and `id` of each `entry` are read; everything else in the feed is ignored.
//!
//! # Examples
//!
//! ```no_run
//! use harvest::{outcome::Outcome, retriever::Retriever};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let retriever = Retriever::new(reqwest::Client::new(), "http://export.arxiv.org/api/query");
//! match retriever.fetch("cat:cs.AI", 10).await? {
//!   Outcome::Completed(papers) => println!("{} papers", papers.len()),
//!   Outcome::Rejected(rejection) => println!("Error fetching metadata: {}", rejection.status),
//! }
//! # Ok(())
//! # }
//! ```

use super::*;

/// Internal representation of the Atom feed returned by the query endpoint.
///
/// Elements are matched by local name, whatever their namespace. The arXiv feed
/// declares Atom as its default namespace and its `arxiv:`/`opensearch:` extensions
/// never use the names `entry`, `title` or `id`, so nothing foreign is picked up.
#[derive(Debug, Deserialize)]
struct Feed {
  /// Search results, in the order the API ranked them
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// Internal representation of a single feed `entry`.
#[derive(Debug, Deserialize)]
struct Entry {
  /// Paper title, possibly wrapped over several indented lines
  title: String,
  /// Canonical abstract URL (e.g. "http://arxiv.org/abs/2401.12345v1")
  id:    String,
}

/// Client for the search half of the arXiv API.
#[derive(Debug, Clone)]
pub struct Retriever {
  /// Internal web client used to connect to the API.
  client:   reqwest::Client,
  /// Endpoint the query parameters are appended to.
  base_url: String,
}

impl Retriever {
  /// Creates a retriever that sends its queries to `base_url`.
  pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
    Self { client, base_url: base_url.into() }
  }

  /// Builds the full request URL for a query.
  ///
  /// The parameters always ask for the first page, sorted by submission date with
  /// the newest first.
  pub fn query_url(&self, query: &str, max_results: u32) -> Result<url::Url> {
    let max_results = max_results.to_string();
    Ok(url::Url::parse_with_params(&self.base_url, [
      ("search_query", query),
      ("start", "0"),
      ("max_results", max_results.as_str()),
      ("sortBy", "submittedDate"),
      ("sortOrder", "descending"),
    ])?)
  }

  /// Runs the search and parses the resulting feed.
  ///
  /// # Returns
  ///
  /// - [`Outcome::Completed`] with the papers in feed order (possibly none)
  /// - [`Outcome::Rejected`] if the API answered with a non-success status
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - The request fails at the transport level
  /// - The response is not a well-formed feed, or an entry lacks `title` or `id`
  pub async fn fetch(&self, query: &str, max_results: u32) -> Result<Outcome<Vec<PaperRecord>>> {
    let url = self.query_url(query, max_results)?;
    debug!("Fetching metadata via: {url}");

    let response = self.client.get(url.as_str()).send().await?;
    let status = response.status();
    if !status.is_success() {
      warn!("Metadata query answered {status}");
      return Ok(Outcome::Rejected(Rejection::new(url.as_str(), status)));
    }

    let data = response.bytes().await?;
    trace!("arXiv response: {}", String::from_utf8_lossy(&data));

    let papers = parse_feed(&data)?;
    info!("Metadata query returned {} entries", papers.len());
    Ok(Outcome::Completed(papers))
  }
}

/// Parses an Atom feed into paper records, preserving entry order.
///
/// # Errors
///
/// Returns [`HarvestError::Xml`] for malformed XML or an entry missing its `title`
/// or `id` element.
pub fn parse_feed(data: &[u8]) -> Result<Vec<PaperRecord>> {
  let feed: Feed = quick_xml::de::from_reader(data)?;
  Ok(feed.entries.iter().map(|entry| PaperRecord::from_entry(&entry.title, &entry.id)).collect())
}
