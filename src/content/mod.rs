//! Dynamic content pipeline: fetch -> parse -> template -> inject.
//!
//! Each [`ContentKind`] pairs a container id with a JSON data file and a card
//! template. One generic loader handles all four kinds; only the item type,
//! the template, and (for news) the truncation policy differ.

mod limit;
mod loader;
mod models;
mod templates;

pub use limit::{parse_limit, Limit};
pub use loader::{load_content, load_dynamic_content, ContentLoader, LoadSummary, RenderOptions};
pub use models::{Event, Field, NewsItem, Program, Resource};
pub use templates::CardTemplate;

use serde::{Deserialize, Serialize};

/// Default site-relative directory holding the JSON data files.
pub const DEFAULT_DATA_DIR: &str = "assets/data";

/// The four kinds of dynamically loaded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    News,
    Programs,
    Events,
    Resources,
}

impl ContentKind {
    /// All kinds, in page load order.
    pub const ALL: [ContentKind; 4] = [
        ContentKind::News,
        ContentKind::Programs,
        ContentKind::Events,
        ContentKind::Resources,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::News => "news",
            ContentKind::Programs => "programs",
            ContentKind::Events => "events",
            ContentKind::Resources => "resources",
        }
    }

    /// Id of the page element this kind renders into.
    pub fn container_id(&self) -> &'static str {
        match self {
            ContentKind::News => "news-container",
            ContentKind::Programs => "programs-container",
            ContentKind::Events => "events-container",
            ContentKind::Resources => "resources-container",
        }
    }

    /// File name of the JSON data file.
    pub fn resource_file(&self) -> &'static str {
        match self {
            ContentKind::News => "news.json",
            ContentKind::Programs => "programs.json",
            ContentKind::Events => "events.json",
            ContentKind::Resources => "resources.json",
        }
    }

    /// Site-relative path of the data file under `data_dir`.
    pub fn resource_path(&self, data_dir: &str) -> String {
        let dir = data_dir.trim_matches('/');
        if dir.is_empty() {
            self.resource_file().to_string()
        } else {
            format!("{}/{}", dir, self.resource_file())
        }
    }

    /// Whether the container's `data-limit` attribute truncates the list.
    pub fn honors_limit(&self) -> bool {
        matches!(self, ContentKind::News)
    }

    pub fn from_container_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.container_id() == id)
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
