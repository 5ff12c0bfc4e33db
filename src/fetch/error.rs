//! Errors raised while loading a content resource.

use thiserror::Error;

/// Failure of one fetch-parse-render pass.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Fetch { status: u16, message: String },

    /// The body was not JSON of the expected shape.
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The resource path cannot be resolved against the site.
    #[error("Invalid resource path: {0}")]
    InvalidPath(String),
}

impl LoadError {
    /// Check if this is a non-success status rather than a transport or parse failure.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, LoadError::Fetch { .. })
    }

    /// Check if this is a body decoding failure.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, LoadError::Parse(_))
    }
}
