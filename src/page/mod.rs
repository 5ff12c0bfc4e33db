//! Render targets for loaded content.
//!
//! A [`Container`] is the element a loader fills; a [`Document`] hands out
//! containers by id. Loaders only ever see these traits, so they run the same
//! against a parsed HTML file ([`HtmlPage`]) or a bare in-memory container.

mod html;
mod locate;

pub use html::{HtmlPage, PageContainer, PageError};

use std::path::{Component, Path};

/// Element that receives a loader's rendered markup.
pub trait Container: Send {
    /// Raw `data-limit` attribute text, if the element carries one.
    fn limit_attr(&self) -> Option<&str>;

    /// Current inner markup.
    fn content(&self) -> &str;

    /// Replace the entire inner markup.
    fn replace_content(&mut self, html: String);
}

/// Collection of containers addressable by element id.
pub trait Document: Send {
    type Container: Container;

    /// Look up the container with the given id, if the page has one.
    fn container_mut(&mut self, id: &str) -> Option<&mut Self::Container>;
}

/// Container held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryContainer {
    pub id: String,
    pub limit: Option<String>,
    pub content: String,
}

impl MemoryContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the `data-limit` attribute.
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Set the initial (fallback) markup.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

impl Container for MemoryContainer {
    fn limit_attr(&self) -> Option<&str> {
        self.limit.as_deref()
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn replace_content(&mut self, html: String) {
        self.content = html;
    }
}

/// A set of in-memory containers.
impl Document for Vec<MemoryContainer> {
    type Container = MemoryContainer;

    fn container_mut(&mut self, id: &str) -> Option<&mut MemoryContainer> {
        self.iter_mut().find(|c| c.id == id)
    }
}

/// Directory of `page` relative to `site_root`, `/`-separated.
///
/// Empty for pages at the root and for pages outside it.
pub fn site_relative_dir(page: &Path, site_root: &Path) -> String {
    let parent = page.parent().unwrap_or(Path::new(""));
    let relative = match (parent.canonicalize(), site_root.canonicalize()) {
        (Ok(dir), Ok(root)) => dir.strip_prefix(&root).ok().map(Path::to_path_buf),
        _ => parent.strip_prefix(site_root).ok().map(Path::to_path_buf),
    };

    relative
        .map(|rel| {
            rel.components()
                .filter_map(|c| match c {
                    Component::Normal(part) => part.to_str(),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}
