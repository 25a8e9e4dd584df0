//! The paper record produced by a metadata query.
//!
//! A [`PaperRecord`] is everything the pipeline needs to know about one search
//! result: a title for progress output, a short identifier that doubles as the
//! file stem on disk, and the URL of the PDF itself. All three are derived from
//! the Atom entry's `title` and `id` elements.
//!
//! # Examples
//!
//! ```
//! use harvest::paper::PaperRecord;
//!
//! let paper = PaperRecord::from_entry("  Attention Is All You Need\n", "http://arxiv.org/abs/1706.03762v7");
//! assert_eq!(paper.title, "Attention Is All You Need");
//! assert_eq!(paper.id, "1706.03762v7");
//! assert_eq!(paper.pdf_url, "http://arxiv.org/pdf/1706.03762v7");
//! assert_eq!(paper.filename().to_str(), Some("1706.03762v7.pdf"));
//! ```

use super::*;

/// Number of title characters shown in progress output.
pub const TITLE_PREVIEW_CHARS: usize = 50;

/// One paper discovered by a metadata query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
  /// Display title, trimmed of surrounding whitespace
  pub title:   String,
  /// Short identifier, the final path segment of the entry URL (e.g. `2401.12345v1`)
  pub id:      String,
  /// Location of the PDF document
  pub pdf_url: String,
}

impl PaperRecord {
  /// Builds a record from the raw text of an entry's `title` and `id` elements.
  ///
  /// The short identifier is whatever follows the last `/` of `entry_url` (the
  /// whole string if it has none), and the PDF URL is `entry_url` with every
  /// `abs` replaced by `pdf`.
  pub fn from_entry(title: &str, entry_url: &str) -> Self {
    let entry_url = entry_url.trim();
    let id = entry_url.rsplit('/').next().unwrap_or(entry_url);
    Self {
      title:   title.trim().to_string(),
      id:      id.to_string(),
      pdf_url: entry_url.replace("abs", "pdf"),
    }
  }

  /// File name the PDF is stored under, `<id>.pdf`.
  pub fn filename(&self) -> PathBuf { PathBuf::from(format!("{}.pdf", self.id)) }

  /// The first [`TITLE_PREVIEW_CHARS`] characters of the title.
  pub fn title_preview(&self) -> String { self.title.chars().take(TITLE_PREVIEW_CHARS).collect() }
}
