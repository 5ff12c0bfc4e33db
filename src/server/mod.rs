//! Preview server for a local site.
//!
//! Serves the site directory as-is, except that HTML pages are run through
//! the content loader first, so they show what a browser would see once the
//! page script has filled the content containers.

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::content::RenderOptions;
use crate::fetch::Fetcher;

/// Shared state for the preview server.
///
/// `options.data_dir` is resolved against each page's directory, so a page in
/// a subdirectory loads the same data files its live copy would request.
#[derive(Clone)]
pub struct AppState {
    pub site_root: PathBuf,
    pub fetcher: Arc<dyn Fetcher>,
    pub options: RenderOptions,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            site_root: settings.site_root.clone(),
            fetcher: Arc::from(settings.fetcher()?),
            options: settings.render_options(),
        })
    }
}

/// Start the preview server.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = settings.bind.parse()?;
    tracing::info!("Serving {} at http://{}", settings.site_root.display(), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::fetch::FsFetcher;

    const INDEX: &str = r#"<html><body><div id="news-container" data-limit="1"><p>sample</p></div></body></html>"#;

    fn setup_site() -> (axum::Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let data = dir.path().join("assets/data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
        std::fs::write(dir.path().join("about.html"), "<p>about</p>").unwrap();
        std::fs::write(dir.path().join("style.css"), "body {}").unwrap();
        std::fs::write(
            data.join("news.json"),
            r#"[{"title": "First"}, {"title": "Second"}]"#,
        )
        .unwrap();

        let state = AppState {
            site_root: dir.path().to_path_buf(),
            fetcher: Arc::new(FsFetcher::new(dir.path())),
            options: RenderOptions::default(),
        };
        (create_router(state), dir)
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_is_rendered() {
        let (app, _dir) = setup_site();
        let (status, content_type, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.contains("First"));
        assert!(!body.contains("Second"));
        assert!(!body.contains("<p>sample</p>"));
    }

    #[tokio::test]
    async fn test_page_without_containers_is_unchanged() {
        let (app, _dir) = setup_site();
        let (status, _, body) = get(app, "/about.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<p>about</p>");
    }

    #[tokio::test]
    async fn test_static_files_keep_their_type() {
        let (app, _dir) = setup_site();
        let (status, content_type, body) = get(app, "/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/css"));
        assert_eq!(body, "body {}");
    }

    #[tokio::test]
    async fn test_missing_and_escaping_paths_are_404() {
        let (app, _dir) = setup_site();
        let (status, _, _) = get(app.clone(), "/missing.html").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = get(app, "/../secret.txt").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_nested_page_uses_its_own_data_dir() {
        let (app, dir) = setup_site();
        std::fs::create_dir_all(dir.path().join("news")).unwrap();
        std::fs::write(dir.path().join("news/index.html"), INDEX).unwrap();

        let (status, _, body) = get(app.clone(), "/news/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INDEX);

        std::fs::create_dir_all(dir.path().join("news/assets/data")).unwrap();
        std::fs::write(
            dir.path().join("news/assets/data/news.json"),
            r#"[{"title": "Nested"}]"#,
        )
        .unwrap();
        let (_, _, body) = get(app, "/news/index.html").await;
        assert!(body.contains("Nested"));
        assert!(!body.contains("First"));
    }

    #[tokio::test]
    async fn test_failed_data_keeps_fallback_markup() {
        let (app, dir) = setup_site();
        std::fs::remove_file(dir.path().join("assets/data/news.json")).unwrap();

        let (status, _, body) = get(app, "/index.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INDEX);
    }
}
