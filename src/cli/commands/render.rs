//! Render command: prerender content containers into pages.

use std::path::{Path, PathBuf};

use console::style;
use futures::future::join_all;
use tracing::info;

use crate::config::Settings;
use crate::content::{ContentLoader, LoadSummary};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::fetch::Fetcher;
use crate::page::{site_relative_dir, HtmlPage};

/// Render every page, writing each in place or under `out_dir`.
pub async fn cmd_render(
    settings: &Settings,
    pages: &[PathBuf],
    out_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let fetcher = settings.fetcher()?;
    let sink = TracingSink;

    match &settings.base_url {
        Some(url) => info!("Loading data from {}", url),
        None => info!("Loading data from {}", settings.site_root.display()),
    }

    let results = join_all(pages.iter().map(|page| {
        let target = output_path(page, &settings.site_root, out_dir);
        render_one(fetcher.as_ref(), &sink, settings, page, target)
    }))
    .await;

    let mut failures = 0;
    for (page, result) in pages.iter().zip(results) {
        match result {
            Ok(summary) => print_summary(page, &summary),
            Err(e) => {
                failures += 1;
                eprintln!("  {} {}: {}", style("✗").red(), page.display(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} page(s) could not be rendered", failures, pages.len());
    }
    Ok(())
}

/// Render one page, fetching data relative to the page's own directory.
async fn render_one(
    fetcher: &dyn Fetcher,
    sink: &dyn DiagnosticSink,
    settings: &Settings,
    page_path: &Path,
    target: Option<PathBuf>,
) -> anyhow::Result<LoadSummary> {
    let mut page = HtmlPage::read(page_path).await?;
    let page_dir = site_relative_dir(page_path, &settings.site_root);
    let options = settings.render_options().for_page_dir(&page_dir);
    let summary = ContentLoader::new(fetcher, sink)
        .with_options(options)
        .load_document(&mut page)
        .await;

    match target {
        Some(out) => page.write(&out)?,
        None if page.is_modified() => page.write(page_path)?,
        None => {}
    }
    Ok(summary)
}

/// Where a rendered page goes: `None` means in place.
///
/// Pages under the site root keep their relative layout inside `out_dir`;
/// anything else lands at the top of it.
fn output_path(page: &Path, site_root: &Path, out_dir: Option<&Path>) -> Option<PathBuf> {
    let out_dir = out_dir?;
    let relative = page
        .strip_prefix(site_root)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| page.file_name().map(PathBuf::from))?;
    Some(out_dir.join(relative))
}

fn print_summary(page: &Path, summary: &LoadSummary) {
    if summary.attempted() == 0 {
        println!("  {} {} (no content containers)", style("-").dim(), page.display());
        return;
    }

    let rendered: Vec<&str> = summary.rendered.iter().map(|k| k.label()).collect();
    let failed: Vec<&str> = summary.failed.iter().map(|k| k.label()).collect();
    if failed.is_empty() {
        println!(
            "  {} {} ({})",
            style("✓").green(),
            page.display(),
            rendered.join(", ")
        );
    } else {
        println!(
            "  {} {} (rendered: {}; kept fallback: {})",
            style("!").yellow(),
            page.display(),
            if rendered.is_empty() {
                "none".to_string()
            } else {
                rendered.join(", ")
            },
            failed.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let root = Path::new("public");
        assert_eq!(output_path(Path::new("public/index.html"), root, None), None);
        assert_eq!(
            output_path(Path::new("public/news/index.html"), root, Some(Path::new("dist"))),
            Some(PathBuf::from("dist/news/index.html"))
        );
        assert_eq!(
            output_path(Path::new("elsewhere/page.html"), root, Some(Path::new("dist"))),
            Some(PathBuf::from("dist/page.html"))
        );
    }

    #[tokio::test]
    async fn test_render_in_place_and_to_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("assets/data")).unwrap();
        std::fs::write(
            root.join("assets/data/programs.json"),
            r#"[{"title": "Mentorship", "description": "Pairs", "image": "m.jpg"}]"#,
        )
        .unwrap();
        let page = root.join("programs.html");
        std::fs::write(&page, r#"<div id="programs-container">sample</div>"#).unwrap();

        let settings = Settings {
            site_root: root.to_path_buf(),
            ..Settings::default()
        };

        let out = root.join("dist");
        cmd_render(&settings, &[page.clone()], Some(&out)).await.unwrap();
        let rendered = std::fs::read_to_string(out.join("programs.html")).unwrap();
        assert!(rendered.contains("Mentorship"));
        assert_eq!(
            std::fs::read_to_string(&page).unwrap(),
            r#"<div id="programs-container">sample</div>"#
        );

        cmd_render(&settings, &[page.clone()], None).await.unwrap();
        assert!(std::fs::read_to_string(&page).unwrap().contains("Mentorship"));
    }

    #[tokio::test]
    async fn test_nested_page_reads_data_beside_it() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("assets/data")).unwrap();
        std::fs::create_dir_all(root.join("news/assets/data")).unwrap();
        std::fs::write(root.join("assets/data/news.json"), r#"[{"title": "Root"}]"#).unwrap();
        std::fs::write(
            root.join("news/assets/data/news.json"),
            r#"[{"title": "Nested"}]"#,
        )
        .unwrap();
        let page = root.join("news/index.html");
        std::fs::write(&page, r#"<div id="news-container">sample</div>"#).unwrap();

        let settings = Settings {
            site_root: root.to_path_buf(),
            ..Settings::default()
        };
        cmd_render(&settings, &[page.clone()], None).await.unwrap();

        let rendered = std::fs::read_to_string(&page).unwrap();
        assert!(rendered.contains("Nested"));
        assert!(!rendered.contains("Root"));
    }

    #[tokio::test]
    async fn test_missing_page_fails_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            site_root: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let result = cmd_render(&settings, &[dir.path().join("missing.html")], None).await;
        assert!(result.is_err());
    }
}
