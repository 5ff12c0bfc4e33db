//! Generic fetch-map-render loader.

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::limit::{parse_limit, Limit};
use super::models::{Event, NewsItem, Program, Resource};
use super::templates::CardTemplate;
use super::{ContentKind, DEFAULT_DATA_DIR};
use crate::diagnostics::DiagnosticSink;
use crate::fetch::{Fetcher, LoadError};
use crate::page::{Container, Document};

/// Options shared by every loader in a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Directory of the JSON data files. Relative to the page being
    /// rendered, like the page script's `fetch`, unless it starts with `/`.
    pub data_dir: String,
    /// Escape item field values before interpolating them.
    pub escape_fields: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            escape_fields: false,
        }
    }
}

impl RenderOptions {
    /// Options for a page in the site-relative directory `page_dir`
    /// (`/`-separated, empty for the site root).
    pub fn for_page_dir(&self, page_dir: &str) -> Self {
        let page_dir = page_dir.trim_matches('/');
        if page_dir.is_empty() || self.data_dir.starts_with('/') {
            return self.clone();
        }
        Self {
            data_dir: format!("{}/{}", page_dir, self.data_dir.trim_end_matches('/')),
            ..self.clone()
        }
    }
}

/// Outcome of loading one page's containers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Kinds whose container was replaced.
    pub rendered: Vec<ContentKind>,
    /// Kinds whose container was present but left untouched after a failure.
    pub failed: Vec<ContentKind>,
}

impl LoadSummary {
    /// Number of containers the page had.
    pub fn attempted(&self) -> usize {
        self.rendered.len() + self.failed.len()
    }
}

/// Loads content kinds into containers.
///
/// Failures never propagate: each is reported once to the diagnostic sink
/// and the container keeps whatever markup it had before.
pub struct ContentLoader<'a> {
    fetcher: &'a dyn Fetcher,
    sink: &'a dyn DiagnosticSink,
    options: RenderOptions,
}

impl<'a> ContentLoader<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            fetcher,
            sink,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Load one kind into `container`. Returns whether the container was replaced.
    pub async fn load<C: Container + ?Sized>(&self, kind: ContentKind, container: &mut C) -> bool {
        let result = match kind {
            ContentKind::News => self.render_into::<NewsItem, C>(kind, container).await,
            ContentKind::Programs => self.render_into::<Program, C>(kind, container).await,
            ContentKind::Events => self.render_into::<Event, C>(kind, container).await,
            ContentKind::Resources => self.render_into::<Resource, C>(kind, container).await,
        };

        match result {
            Ok(count) => {
                info!("Rendered {} {} item(s) into #{}", count, kind, kind.container_id());
                true
            }
            Err(e) => {
                self.sink.report(kind, &e);
                false
            }
        }
    }

    /// Load every kind whose container exists in `document`, in page order.
    pub async fn load_document<D: Document>(&self, document: &mut D) -> LoadSummary {
        let mut summary = LoadSummary::default();
        for kind in ContentKind::ALL {
            let Some(container) = document.container_mut(kind.container_id()) else {
                debug!("No #{} on page", kind.container_id());
                continue;
            };
            if self.load(kind, container).await {
                summary.rendered.push(kind);
            } else {
                summary.failed.push(kind);
            }
        }
        summary
    }

    /// Fetch and decode the item list for `kind`.
    pub async fn fetch_items<T: DeserializeOwned>(
        &self,
        kind: ContentKind,
    ) -> Result<Vec<T>, LoadError> {
        let path = kind.resource_path(&self.options.data_dir);
        let response = self.fetcher.fetch(&path).await?;
        if !response.is_success() {
            return Err(LoadError::Fetch {
                status: response.status,
                message: format!("Failed to load {}", kind),
            });
        }
        response.json()
    }

    /// Fetch, truncate, and render one kind into `container`.
    ///
    /// Every entry must decode as an object. A list holding anything else
    /// (`[1]`, `["a"]`) fails as a whole and the container is left alone,
    /// where a browser would render a card of `undefined` fields per entry.
    async fn render_into<T, C>(
        &self,
        kind: ContentKind,
        container: &mut C,
    ) -> Result<usize, LoadError>
    where
        T: DeserializeOwned + CardTemplate,
        C: Container + ?Sized,
    {
        let mut items: Vec<T> = self.fetch_items(kind).await?;

        let limit = if kind.honors_limit() {
            parse_limit(container.limit_attr())
        } else {
            Limit::All
        };
        limit.apply(&mut items);

        let html: String = items
            .iter()
            .map(|item| item.render_card(self.options.escape_fields))
            .collect();
        container.replace_content(html);
        Ok(items.len())
    }
}

/// Load one kind into `container` with default options.
pub async fn load_content<C: Container + ?Sized>(
    kind: ContentKind,
    container: &mut C,
    fetcher: &dyn Fetcher,
    sink: &dyn DiagnosticSink,
) -> bool {
    ContentLoader::new(fetcher, sink).load(kind, container).await
}

/// Load every content kind present in `document` with default options.
pub async fn load_dynamic_content<D: Document>(
    document: &mut D,
    fetcher: &dyn Fetcher,
    sink: &dyn DiagnosticSink,
) -> LoadSummary {
    ContentLoader::new(fetcher, sink)
        .load_document(document)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::fetch::{FetchResponse, MemoryFetcher};
    use crate::page::MemoryContainer;
    use serde_json::json;

    const FALLBACK: &str = "<article class=\"card\">Sample</article>";

    fn news_json(count: usize) -> String {
        let items: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "title": format!("Story {}", i),
                    "excerpt": "...",
                    "image": "img.jpg",
                    "category": "News",
                    "date": "2024-03-15",
                    "link": format!("news/{}.html", i)
                })
            })
            .collect();
        serde_json::to_string(&items).unwrap()
    }

    #[tokio::test]
    async fn test_news_limit_renders_first_n_in_order() {
        let fetcher = MemoryFetcher::new().with_body("assets/data/news.json", news_json(5));
        let sink = MemorySink::new();
        let mut container = MemoryContainer::new("news-container")
            .with_limit("3")
            .with_content(FALLBACK);

        assert!(load_content(ContentKind::News, &mut container, &fetcher, &sink).await);

        assert_eq!(container.content.matches("<article class=\"card\">").count(), 3);
        let first = container.content.find("Story 0").unwrap();
        let second = container.content.find("Story 1").unwrap();
        let third = container.content.find("Story 2").unwrap();
        assert!(first < second && second < third);
        assert!(!container.content.contains("Story 3"));
        assert!(!container.content.contains("Sample"));
        assert!(sink.is_empty());
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn test_limit_is_news_only() {
        let events = json!([
            { "title": "A" }, { "title": "B" }, { "title": "C" }
        ]);
        let fetcher =
            MemoryFetcher::new().with_body("assets/data/events.json", events.to_string());
        let sink = MemorySink::new();
        let mut container = MemoryContainer::new("events-container").with_limit("1");

        assert!(load_content(ContentKind::Events, &mut container, &fetcher, &sink).await);
        assert_eq!(container.content.matches("Register Now").count(), 3);
    }

    #[tokio::test]
    async fn test_failure_status_leaves_container_untouched() {
        for kind in ContentKind::ALL {
            let fetcher = MemoryFetcher::new().with_response(
                &kind.resource_path(DEFAULT_DATA_DIR),
                FetchResponse::new(500, "oops"),
            );
            let sink = MemorySink::new();
            let mut container = MemoryContainer::new(kind.container_id()).with_content(FALLBACK);

            assert!(!load_content(kind, &mut container, &fetcher, &sink).await);

            assert_eq!(container.content, FALLBACK);
            let entries = sink.entries();
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].kind, kind);
            assert!(entries[0]
                .message
                .contains(&format!("Failed to load {}", kind.label())));
        }
    }

    #[tokio::test]
    async fn test_malformed_json_leaves_container_untouched() {
        for kind in ContentKind::ALL {
            let fetcher = MemoryFetcher::new()
                .with_body(&kind.resource_path(DEFAULT_DATA_DIR), "[{\"title\": ");
            let sink = MemorySink::new();
            let mut container = MemoryContainer::new(kind.container_id()).with_content(FALLBACK);

            assert!(!load_content(kind, &mut container, &fetcher, &sink).await);

            assert_eq!(container.content, FALLBACK);
            assert_eq!(sink.len(), 1);
            assert!(sink.entries()[0].message.contains("Invalid JSON"));
        }
    }

    #[tokio::test]
    async fn test_byte_order_mark_is_ignored() {
        let mut body = b"\xEF\xBB\xBF".to_vec();
        body.extend_from_slice(br#"[{"title": "Gala"}]"#);
        let fetcher = MemoryFetcher::new().with_body("assets/data/programs.json", body);
        let sink = MemorySink::new();
        let mut container = MemoryContainer::new("programs-container").with_content(FALLBACK);

        assert!(load_content(ContentKind::Programs, &mut container, &fetcher, &sink).await);
        assert!(container.content.contains(r#"<h3 class="card-title">Gala</h3>"#));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_non_object_items_are_a_parse_failure() {
        let fetcher = MemoryFetcher::new().with_body("assets/data/news.json", "[1]");
        let sink = MemorySink::new();
        let mut container = MemoryContainer::new("news-container").with_content(FALLBACK);

        assert!(!load_content(ContentKind::News, &mut container, &fetcher, &sink).await);
        assert_eq!(container.content, FALLBACK);
        assert_eq!(sink.len(), 1);
        assert!(sink.entries()[0].message.contains("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_non_array_body_is_a_parse_failure() {
        let fetcher = MemoryFetcher::new().with_body("assets/data/programs.json", "{\"items\": []}");
        let sink = MemorySink::new();
        let mut container = MemoryContainer::new("programs-container").with_content(FALLBACK);

        assert!(!load_content(ContentKind::Programs, &mut container, &fetcher, &sink).await);
        assert_eq!(container.content, FALLBACK);
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_array_clears_container() {
        let fetcher = MemoryFetcher::new().with_body("assets/data/resources.json", "[]");
        let sink = MemorySink::new();
        let mut container = MemoryContainer::new("resources-container").with_content(FALLBACK);

        assert!(load_content(ContentKind::Resources, &mut container, &fetcher, &sink).await);
        assert_eq!(container.content, "");
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_rendering_is_deterministic() {
        let fetcher = MemoryFetcher::new().with_body("assets/data/news.json", news_json(2));
        let sink = MemorySink::new();
        let mut a = MemoryContainer::new("news-container");
        let mut b = MemoryContainer::new("news-container").with_content("stale");

        load_content(ContentKind::News, &mut a, &fetcher, &sink).await;
        load_content(ContentKind::News, &mut b, &fetcher, &sink).await;
        assert_eq!(a.content, b.content);
    }

    #[tokio::test]
    async fn test_load_document_skips_absent_containers() {
        let fetcher = MemoryFetcher::new()
            .with_body("assets/data/news.json", news_json(1))
            .with_body("assets/data/programs.json", "[{\"title\": \"Mentorship\"}]");
        let sink = MemorySink::new();
        let mut page = vec![
            MemoryContainer::new("programs-container"),
            MemoryContainer::new("events-container").with_content(FALLBACK),
            MemoryContainer::new("unrelated"),
        ];

        let summary = load_dynamic_content(&mut page, &fetcher, &sink).await;

        assert_eq!(summary.rendered, vec![ContentKind::Programs]);
        assert_eq!(summary.failed, vec![ContentKind::Events]);
        assert_eq!(summary.attempted(), 2);
        // news.json is never requested without a news container
        assert_eq!(fetcher.request_count(), 2);
        assert!(page[0].content.contains("Mentorship"));
        assert_eq!(page[1].content, FALLBACK);
        assert_eq!(page[2].content, "");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_data_dir_follows_the_page() {
        let options = RenderOptions::default();
        assert_eq!(options.for_page_dir(""), options);
        assert_eq!(options.for_page_dir("news").data_dir, "news/assets/data");
        assert_eq!(options.for_page_dir("/a/b/").data_dir, "a/b/assets/data");

        let rooted = RenderOptions {
            data_dir: "/assets/data".to_string(),
            escape_fields: true,
        };
        assert_eq!(rooted.for_page_dir("news"), rooted);
    }

    #[tokio::test]
    async fn test_custom_data_dir_and_escaping() {
        let fetcher = MemoryFetcher::new()
            .with_body("data/programs.json", "[{\"title\": \"<script>x</script>\"}]");
        let sink = MemorySink::new();
        let loader = ContentLoader::new(&fetcher, &sink).with_options(RenderOptions {
            data_dir: "data".to_string(),
            escape_fields: true,
        });
        let mut container = MemoryContainer::new("programs-container");

        assert!(loader.load(ContentKind::Programs, &mut container).await);
        assert!(container.content.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!container.content.contains("<script>"));
    }
}
