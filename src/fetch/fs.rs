//! Filesystem fetcher rooted at a site directory.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{FetchResponse, Fetcher, LoadError};

/// Serves resources from a local copy of the site.
///
/// Missing files answer 404 the way a static file server would.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a site-relative path onto the root, refusing anything that could
    /// leave it.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, LoadError> {
        let relative = path.trim_start_matches("./");
        let relative = Path::new(relative);

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(LoadError::InvalidPath(path.to_string()));
                }
            }
        }

        if resolved == self.root {
            return Err(LoadError::InvalidPath(path.to_string()));
        }
        Ok(resolved)
    }
}

#[async_trait]
impl Fetcher for FsFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, LoadError> {
        let file = self.resolve(path)?;
        debug!("Reading: {}", file.display());

        match tokio::fs::read(&file).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No such file: {}", file.display());
                Ok(FetchResponse::not_found())
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                Ok(FetchResponse::new(403, Vec::new()))
            }
            Err(e) => Err(LoadError::Io(e)),
        }
    }
}
