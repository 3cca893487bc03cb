//! Error taxonomy for the rate service.
//!
//! Only document-level and fetch-level failures exist here. Per-candidate
//! numeric failures inside the extraction cascade are absorbed silently —
//! a fragment that does not parse is "no match", never an error.

use thiserror::Error;

/// Failure of one extraction attempt.
#[derive(Error, Debug)]
pub enum RateError {
    /// Upstream fetch failed: network, TLS, timeout, or a non-success
    /// status from the source site. Not retried at this layer.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The document could not be parsed into a queryable structure at all.
    #[error("parse failed: {0}")]
    Parse(String),
}

impl RateError {
    /// Stable machine-readable code for the JSON error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch_error",
            Self::Parse(_) => "parse_error",
        }
    }
}

impl From<reqwest::Error> for RateError {
    fn from(e: reqwest::Error) -> Self {
        Self::Fetch(e.to_string())
    }
}
