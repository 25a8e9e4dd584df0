//! Tagged results for operations that talk to an upstream service.
//!
//! A request can end three ways: it works, the server answers with a non-success
//! status, or the transport (or what we do with the body) fails. The first two are
//! expressed by [`Outcome`], the third by [`HarvestError`]. Callers therefore handle
//! rejections explicitly while `?` keeps propagating the fatal cases.

use super::*;

/// Result of a network operation that reached the upstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
  /// The request succeeded and produced a value.
  Completed(T),
  /// The upstream service answered with a non-success status.
  Rejected(Rejection),
}

/// A non-success HTTP answer from the upstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
  /// The URL that was requested
  pub url:    String,
  /// The status the server answered with
  pub status: StatusCode,
}

impl<T> Outcome<T> {
  /// Returns `true` when the request completed.
  pub fn is_completed(&self) -> bool { matches!(self, Outcome::Completed(_)) }

  /// Converts into the completed value, discarding a rejection.
  pub fn completed(self) -> Option<T> {
    match self {
      Outcome::Completed(value) => Some(value),
      Outcome::Rejected(_) => None,
    }
  }

  /// Maps the completed value, leaving a rejection untouched.
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
    match self {
      Outcome::Completed(value) => Outcome::Completed(f(value)),
      Outcome::Rejected(rejection) => Outcome::Rejected(rejection),
    }
  }
}

impl Rejection {
  /// Builds a rejection for a request to `url` answered with `status`.
  pub fn new(url: impl Into<String>, status: StatusCode) -> Self {
    Self { url: url.into(), status }
  }
}

impl Display for Rejection {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} answered {}", self.url, self.status)
  }
}
