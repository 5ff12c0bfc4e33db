//! HTML page with splice-in-place content containers.

use std::ops::Range;
use std::path::{Path, PathBuf};

use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use super::locate::locate;
use super::{Container, Document};
use crate::content::ContentKind;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A content container found in an [`HtmlPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContainer {
    id: String,
    limit: Option<String>,
    range: Range<usize>,
    content: String,
    replaced: bool,
}

impl PageContainer {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether a loader has replaced this container's markup.
    pub fn is_replaced(&self) -> bool {
        self.replaced
    }
}

impl Container for PageContainer {
    fn limit_attr(&self) -> Option<&str> {
        self.limit.as_deref()
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn replace_content(&mut self, html: String) {
        self.content = html;
        self.replaced = true;
    }
}

/// An HTML document whose content containers can be refilled.
///
/// Serialization only touches the inner markup of replaced containers;
/// every other byte of the source is written back unchanged.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    source: String,
    containers: Vec<PageContainer>,
}

impl HtmlPage {
    /// Parse a page and discover the standard content containers.
    pub fn parse(source: impl Into<String>) -> Self {
        let ids: Vec<&str> = ContentKind::ALL.iter().map(|k| k.container_id()).collect();
        Self::parse_with_ids(source, &ids)
    }

    /// Parse a page and discover containers with the given element ids.
    pub fn parse_with_ids(source: impl Into<String>, ids: &[&str]) -> Self {
        let source = source.into();
        let document = Html::parse_document(&source);

        let mut containers = Vec::new();
        for id in ids {
            let Ok(selector) = Selector::parse(&format!("[id=\"{}\"]", id)) else {
                warn!("Unusable container id: {}", id);
                continue;
            };
            if document.select(&selector).next().is_none() {
                continue;
            }
            let Some(found) = locate(&source, id) else {
                warn!("Container #{} has no replaceable content", id);
                continue;
            };

            let range = found.inner.clone();
            debug!("Found container #{} at {:?}", id, range);
            containers.push(PageContainer {
                id: id.to_string(),
                limit: found.attr("data-limit").map(str::to_string),
                content: source[range.clone()].to_string(),
                range,
                replaced: false,
            });
        }

        Self { source, containers }
    }

    /// Read and parse a page from disk.
    pub async fn read(path: &Path) -> Result<Self, PageError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PageError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(source))
    }

    /// Write the rendered page, replacing `path` atomically.
    pub fn write(&self, path: &Path) -> Result<(), PageError> {
        let to_err = |source| PageError::Write {
            path: path.to_path_buf(),
            source,
        };
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        std::fs::create_dir_all(dir).map_err(to_err)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(to_err)?;
        std::io::Write::write_all(&mut tmp, self.to_html().as_bytes()).map_err(to_err)?;
        tmp.persist(path).map_err(|e| to_err(e.error))?;
        Ok(())
    }

    pub fn containers(&self) -> &[PageContainer] {
        &self.containers
    }

    pub fn container(&self, id: &str) -> Option<&PageContainer> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Whether any container was replaced since parsing.
    pub fn is_modified(&self) -> bool {
        self.containers.iter().any(|c| c.replaced)
    }

    /// Original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Serialize the page with replaced containers spliced in.
    pub fn to_html(&self) -> String {
        let mut replaced: Vec<&PageContainer> =
            self.containers.iter().filter(|c| c.replaced).collect();
        replaced.sort_by_key(|c| c.range.start);

        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for container in replaced {
            // Nested inside a container that was already replaced wholesale.
            if container.range.start < cursor {
                continue;
            }
            out.push_str(&self.source[cursor..container.range.start]);
            out.push_str(&container.content);
            cursor = container.range.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

impl Document for HtmlPage {
    type Container = PageContainer;

    fn container_mut(&mut self, id: &str) -> Option<&mut PageContainer> {
        self.containers.iter_mut().find(|c| c.id == id)
    }
}
