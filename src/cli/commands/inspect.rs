//! Inspect command.

use std::path::Path;

use console::style;

use crate::content::{parse_limit, ContentKind, Limit};
use crate::page::{Container, HtmlPage};

/// List the content containers found in a page.
pub async fn cmd_inspect(path: &Path) -> anyhow::Result<()> {
    let page = HtmlPage::read(path).await?;

    println!("{} {}", style("Page:").bold(), path.display());
    for kind in ContentKind::ALL {
        match page.container(kind.container_id()) {
            Some(container) => println!(
                "  {} #{} ({})",
                style("✓").green(),
                kind.container_id(),
                describe_limit(kind, container.limit_attr())
            ),
            None => println!("  {} #{}", style("-").dim(), kind.container_id()),
        }
    }

    Ok(())
}

fn describe_limit(kind: ContentKind, attr: Option<&str>) -> String {
    if !kind.honors_limit() {
        return format!("all {}", kind);
    }
    match parse_limit(attr) {
        Limit::All => format!("all {}", kind),
        Limit::First(n) if n >= 0 => format!("first {} {}", n, kind),
        Limit::First(n) => format!("all but the last {} {}", n.unsigned_abs(), kind),
    }
}
