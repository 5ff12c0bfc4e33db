//! Fetching site data files.
//!
//! A [`Fetcher`] resolves a site-relative resource path (for example
//! `assets/data/news.json`) to a status and a body. Loaders only look at the
//! status and the bytes, so the same pipeline runs against the filesystem,
//! a live site over HTTP, or an in-memory table in tests.

mod error;
mod fs;
mod http;
mod memory;

pub use error::LoadError;
pub use fs::FsFetcher;
pub use http::{HttpFetcher, USER_AGENT};
pub use memory::MemoryFetcher;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Status and body of a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    /// A 404 response with an empty body.
    pub fn not_found() -> Self {
        Self::new(404, Vec::new())
    }

    /// Check if the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON, ignoring a leading UTF-8 byte order mark.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, LoadError> {
        let body = self.body.strip_prefix(UTF8_BOM).unwrap_or(self.body.as_slice());
        Ok(serde_json::from_slice(body)?)
    }
}

/// Source of site resources.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a site-relative resource path.
    ///
    /// A non-success status is a normal return; errors are reserved for
    /// requests that produced no response at all.
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError>;
}
