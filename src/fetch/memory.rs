//! In-memory fetcher.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{FetchResponse, Fetcher, LoadError};

/// Answers from a fixed table of responses; unknown paths are 404.
///
/// Counts requests so callers can check how many fetches a pass issued.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, FetchResponse>,
    requests: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `path`.
    pub fn with_body(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .insert(path.to_string(), FetchResponse::ok(body));
        self
    }

    /// Serve an arbitrary response at `path`.
    pub fn with_response(mut self, path: &str, response: FetchResponse) -> Self {
        self.responses.insert(path.to_string(), response);
        self
    }

    /// Number of fetches issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .responses
            .get(path)
            .cloned()
            .unwrap_or_else(FetchResponse::not_found))
    }
}
