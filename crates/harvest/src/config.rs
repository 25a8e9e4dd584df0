//! Run configuration.
//!
//! A [`Config`] is built once, validated, and handed to the
//! [`Pipeline`](crate::pipeline::Pipeline) by value. Nothing reads global state:
//! every knob of a run lives here.
//!
//! Configuration can come from three places, later ones winning:
//!
//! 1. [`Config::default`], which reproduces the classic `cat:cs.AI` harvest into `data/raw`
//! 2. A TOML file (see `config/harvest.toml` at the repository root)
//! 3. The `with_*` builder methods, which is how the CLI applies its flags
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use harvest::Config;
//!
//! let config = Config::from_toml_str(
//!   r#"
//!   query = "cat:math.AG"
//!   max_results = 25
//!   "#,
//! )?
//! .with_courtesy_delay(Duration::from_secs(5));
//!
//! assert_eq!(config.max_results, 25);
//! assert_eq!(config.output_dir.to_str(), Some("data/raw"));
//! # Ok::<(), harvest::error::HarvestError>(())
//! ```

use super::*;

/// Search expression used when none is configured.
pub const DEFAULT_QUERY: &str = "cat:cs.AI";
/// Result cap used when none is configured.
pub const DEFAULT_MAX_RESULTS: u32 = 100;
/// Directory PDFs land in when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "data/raw";
/// The public arXiv query endpoint.
pub const DEFAULT_API_BASE_URL: &str = "http://export.arxiv.org/api/query";
/// Pause between successful downloads, in seconds.
pub const DEFAULT_COURTESY_DELAY_SECS: u64 = 3;
/// Connect timeout for every request, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Immutable description of a harvesting run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Search expression in the upstream query syntax (e.g. `cat:cs.AI`)
  pub query:                String,
  /// Maximum number of results requested from the API
  pub max_results:          u32,
  /// Directory downloaded PDFs are written to
  pub output_dir:           PathBuf,
  /// Endpoint the metadata query is sent to
  pub api_base_url:         String,
  /// Seconds to wait after a successful download before the next one
  pub courtesy_delay_secs:  u64,
  /// Seconds allowed for establishing a connection
  pub connect_timeout_secs: u64,
  /// Optional limit, in seconds, on a whole request including its body
  pub request_timeout_secs: Option<u64>,
  /// `User-Agent` header sent with every request
  pub user_agent:           String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      query:                DEFAULT_QUERY.to_string(),
      max_results:          DEFAULT_MAX_RESULTS,
      output_dir:           PathBuf::from(DEFAULT_OUTPUT_DIR),
      api_base_url:         DEFAULT_API_BASE_URL.to_string(),
      courtesy_delay_secs:  DEFAULT_COURTESY_DELAY_SECS,
      connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
      request_timeout_secs: None,
      user_agent:           format!("harvest/{}", env!("CARGO_PKG_VERSION")),
    }
  }
}

impl Config {
  /// Default location of the configuration file, `<config dir>/harvest/config.toml`.
  ///
  /// Falls back to `./harvest.toml` on platforms without a configuration directory.
  pub fn default_path() -> PathBuf {
    dirs::config_dir()
      .map(|dir| dir.join("harvest").join("config.toml"))
      .unwrap_or_else(|| PathBuf::from("harvest.toml"))
  }

  /// Parses a configuration from TOML text. Missing keys take their defaults.
  pub fn from_toml_str(toml_str: &str) -> Result<Self> { Ok(toml::from_str(toml_str)?) }

  /// Reads a configuration from a TOML file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Reading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Self::from_toml_str(&content)
  }

  /// Loads the configuration for a run.
  ///
  /// An explicit `path` must exist. Without one, [`Config::default_path`] is used
  /// when present and the built-in defaults otherwise.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => Self::from_file(path),
      None => {
        let default_path = Self::default_path();
        if default_path.is_file() {
          Self::from_file(default_path)
        } else {
          trace!("No configuration at {}, using defaults", default_path.display());
          Ok(Self::default())
        }
      },
    }
  }

  /// Sets the search expression.
  pub fn with_query(mut self, query: impl Into<String>) -> Self {
    self.query = query.into();
    self
  }

  /// Sets the result cap.
  pub fn with_max_results(mut self, max_results: u32) -> Self {
    self.max_results = max_results;
    self
  }

  /// Sets the download directory.
  pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
    self.output_dir = output_dir.into();
    self
  }

  /// Sets the metadata endpoint.
  pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
    self.api_base_url = api_base_url.into();
    self
  }

  /// Sets the pause between successful downloads. Sub-second parts are dropped.
  pub fn with_courtesy_delay(mut self, delay: Duration) -> Self {
    self.courtesy_delay_secs = delay.as_secs();
    self
  }

  /// Sets the connect timeout. Sub-second parts are dropped.
  pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
    self.connect_timeout_secs = timeout.as_secs();
    self
  }

  /// Sets or clears the whole-request timeout. Sub-second parts are dropped.
  pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.request_timeout_secs = timeout.map(|t| t.as_secs());
    self
  }

  /// Sets the `User-Agent` header.
  pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = user_agent.into();
    self
  }

  /// Pause between successful downloads.
  pub fn courtesy_delay(&self) -> Duration { Duration::from_secs(self.courtesy_delay_secs) }

  /// Connect timeout for every request.
  pub fn connect_timeout(&self) -> Duration { Duration::from_secs(self.connect_timeout_secs) }

  /// Whole-request timeout, if any.
  pub fn request_timeout(&self) -> Option<Duration> {
    self.request_timeout_secs.map(Duration::from_secs)
  }

  /// Checks that the configuration describes a run that can happen.
  ///
  /// # Errors
  ///
  /// - [`HarvestError::Config`] for an empty query, a zero result cap or a zero connect timeout
  /// - [`HarvestError::Url`] if the API base URL does not parse
  pub fn validate(&self) -> Result<()> {
    if self.query.trim().is_empty() {
      return Err(HarvestError::Config("The search query must not be empty".into()));
    }
    if self.max_results == 0 {
      return Err(HarvestError::Config("max_results must be at least 1".into()));
    }
    if self.connect_timeout_secs == 0 {
      return Err(HarvestError::Config("connect_timeout_secs must be at least 1".into()));
    }
    url::Url::parse(&self.api_base_url)?;
    Ok(())
  }
}
