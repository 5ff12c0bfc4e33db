//! HTTP fetcher for resources served by a live site.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{FetchResponse, Fetcher, LoadError};

pub const USER_AGENT: &str = concat!("sitecontent/", env!("CARGO_PKG_VERSION"));

/// Fetches resources relative to a site base URL.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher for `base_url` with the default user agent.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LoadError> {
        Self::with_user_agent(base_url, timeout, None)
    }

    /// Create a fetcher with a custom user agent.
    /// - None: Use the default sitecontent user agent
    /// - Some(custom): Use the given string
    pub fn with_user_agent(
        base_url: &str,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, LoadError> {
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a site-relative path against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, LoadError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| LoadError::InvalidPath(format!("{}: {}", path, e)))
    }
}

/// Parse the base URL, making sure relative joins land under its path.
fn normalize_base(base_url: &str) -> Result<Url, LoadError> {
    let mut url =
        Url::parse(base_url).map_err(|e| LoadError::InvalidPath(format!("{}: {}", base_url, e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        let url = self.resolve(path)?;
        debug!("Fetching: {}", url);

        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(
            "HTTP {} for {} ({} bytes, {}ms)",
            status,
            url,
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(FetchResponse::new(status, body))
    }
}
