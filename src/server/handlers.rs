//! Request handlers for the preview server.

use std::path::{Path as FsPath, PathBuf};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, warn};

use super::AppState;
use crate::content::ContentLoader;
use crate::diagnostics::TracingSink;
use crate::page::{site_relative_dir, HtmlPage};

/// `GET /`: the rendered site index.
pub async fn index(State(state): State<AppState>) -> Response {
    site_path(State(state), Path(String::new())).await
}

/// `GET /*path`: rendered pages, raw files for everything else.
pub async fn site_path(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let Some(file) = resolve_site_file(&state.site_root, &path) else {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    };

    if is_page(&file) {
        render_page(&state, &file).await
    } else {
        serve_file(&file).await
    }
}

/// Map a request path onto a file under the site root.
///
/// Directories resolve to their `index.html`. Anything that does not exist
/// or lands outside the root resolves to `None`.
fn resolve_site_file(site_root: &FsPath, path: &str) -> Option<PathBuf> {
    let path = path.trim_start_matches('/');
    if path.contains("..") || path.contains('\\') {
        return None;
    }

    let canonical_root = site_root.canonicalize().ok()?;
    let mut candidate = canonical_root.join(path);
    if candidate.is_dir() {
        candidate = candidate.join("index.html");
    }

    let canonical_file = candidate.canonicalize().ok()?;
    let inside = canonical_file.starts_with(&canonical_root) && canonical_file.is_file();
    inside.then_some(canonical_file)
}

fn is_page(file: &FsPath) -> bool {
    file.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

async fn render_page(state: &AppState, file: &FsPath) -> Response {
    let mut page = match HtmlPage::read(file).await {
        Ok(page) => page,
        Err(e) => {
            warn!("{}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read page").into_response();
        }
    };

    let sink = TracingSink;
    let page_dir = site_relative_dir(file, &state.site_root);
    let loader = ContentLoader::new(state.fetcher.as_ref(), &sink)
        .with_options(state.options.for_page_dir(&page_dir));
    let summary = loader.load_document(&mut page).await;
    debug!(
        "Rendered {} ({} of {} containers)",
        file.display(),
        summary.rendered.len(),
        summary.attempted()
    );

    Html(page.to_html()).into_response()
}

async fn serve_file(file: &FsPath) -> Response {
    let content = match tokio::fs::read(file).await {
        Ok(c) => c,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response();
        }
    };

    let mime = mime_guess::from_path(file)
        .first_or_octet_stream()
        .to_string();

    ([(header::CONTENT_TYPE, mime)], content).into_response()
}
