//! Byte-range lookup of an element's inner markup in HTML source.
//!
//! Tree parsers normalize whatever they serialize, so splicing new content
//! into the original text needs the exact source offsets of the element's
//! children. This is a tag scanner, not a parser: it understands quoted
//! attributes, comments, void elements, and raw-text elements, and pairs
//! open/close tags of the element's own name. The element's attributes are
//! read from the same open tag, so they always belong to the spliced element.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .unwrap()
});

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)([^\s"'=<>/`]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .unwrap()
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title", "noscript"];

struct Tag<'a> {
    closing: bool,
    name: String,
    attrs: &'a str,
    span: Range<usize>,
}

impl Tag<'_> {
    fn self_closing(&self) -> bool {
        self.attrs.trim_end().ends_with('/')
    }
}

fn read_tag<'a>(caps: &Captures<'a>) -> Option<Tag<'a>> {
    let whole = caps.get(0)?;
    let name = caps.get(2)?;
    Some(Tag {
        closing: caps.get(1).is_some_and(|m| !m.as_str().is_empty()),
        name: name.as_str().to_ascii_lowercase(),
        attrs: caps.get(3).map_or("", |m| m.as_str()),
        span: whole.range(),
    })
}

/// Value of the attribute `name` (case-insensitive) in a tag's attribute text.
///
/// Attributes written without a value read as the empty string.
pub fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    ATTR.captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .map(|caps| {
            caps.get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str())
        })
}

/// An element found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<'a> {
    /// Byte range of the element's inner markup.
    pub inner: Range<usize>,
    /// Raw attribute text of the element's open tag.
    pub attrs: &'a str,
}

impl<'a> Located<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attr_value(self.attrs, name)
    }
}

/// Offset of the `</name` that ends a raw-text element whose content starts at `pos`.
fn raw_text_end(source: &str, pos: usize, name: &str) -> Option<usize> {
    let needle = format!("</{}", name);
    source[pos..]
        .to_ascii_lowercase()
        .find(&needle)
        .map(|i| pos + i)
}

/// Find the first element whose `id` is exactly `id`.
///
/// Returns `None` when no such element exists, when it is a void or
/// self-closing element, or when it is never closed.
pub fn locate<'a>(source: &'a str, id: &str) -> Option<Located<'a>> {
    let mut pos = 0;

    let open = loop {
        let caps = TAG.captures_at(source, pos)?;
        let Some(tag) = read_tag(&caps) else {
            pos = caps.get(0)?.end();
            continue;
        };
        pos = tag.span.end;

        if !tag.closing && attr_value(tag.attrs, "id") == Some(id) {
            break tag;
        }
        if !tag.closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            pos = raw_text_end(source, pos, &tag.name)?;
        }
    };

    if VOID_ELEMENTS.contains(&open.name.as_str()) || open.self_closing() {
        return None;
    }

    let start = open.span.end;
    let found = |end: usize| Located {
        inner: start..end,
        attrs: open.attrs,
    };
    if RAW_TEXT_ELEMENTS.contains(&open.name.as_str()) {
        return raw_text_end(source, start, &open.name).map(found);
    }

    let mut depth = 1usize;
    loop {
        let caps = TAG.captures_at(source, pos)?;
        let Some(tag) = read_tag(&caps) else {
            pos = caps.get(0)?.end();
            continue;
        };
        pos = tag.span.end;

        if tag.name == open.name {
            if tag.closing {
                depth -= 1;
                if depth == 0 {
                    return Some(found(tag.span.start));
                }
            } else if !tag.self_closing() {
                depth += 1;
            }
        } else if !tag.closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            pos = raw_text_end(source, pos, &tag.name)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inner<'a>(source: &'a str, id: &str) -> Option<&'a str> {
        locate(source, id).map(|found| &source[found.inner])
    }

    #[test]
    fn test_simple_element() {
        let html = r#"<main><div id="news-container" class="grid"><p>sample</p></div></main>"#;
        assert_eq!(inner(html, "news-container"), Some("<p>sample</p>"));
    }

    #[test]
    fn test_nested_same_name() {
        let html = r#"<div id="a"><div><div>x</div></div><span>y</span></div><div>after</div>"#;
        assert_eq!(inner(html, "a"), Some("<div><div>x</div></div><span>y</span>"));
    }

    #[test]
    fn test_id_quoting_styles() {
        assert_eq!(inner("<section id='s'>x</section>", "s"), Some("x"));
        assert_eq!(inner("<section id=s>x</section>", "s"), Some("x"));
        assert_eq!(inner("<section ID = \"s\">x</section>", "s"), Some("x"));
    }

    #[test]
    fn test_ignores_lookalike_attributes() {
        let html = r#"<div data-id="news-container">no</div><div id="news-container">yes</div>"#;
        assert_eq!(inner(html, "news-container"), Some("yes"));
    }

    #[test]
    fn test_ignores_comments_and_scripts() {
        let html = concat!(
            "<!-- <div id=\"x\">commented</div> -->",
            "<script>var s = '<div id=\"x\">';</script>",
            "<div id=\"x\"><script>document.write('</div>')</script>real</div>"
        );
        assert_eq!(
            inner(html, "x"),
            Some("<script>document.write('</div>')</script>real")
        );
    }

    #[test]
    fn test_quoted_gt_in_attribute() {
        let html = r#"<div id="x" title="a > b"><b>bold</b></div>"#;
        assert_eq!(inner(html, "x"), Some("<b>bold</b>"));
    }

    #[test]
    fn test_missing_void_and_unclosed() {
        assert_eq!(inner("<div>nothing</div>", "x"), None);
        assert_eq!(inner(r#"<img id="x" src="a.png">"#, "x"), None);
        assert_eq!(inner(r#"<div id="x">never closed"#, "x"), None);
    }

    #[test]
    fn test_empty_inner() {
        let html = r#"<div id="x"></div>"#;
        let range = locate(html, "x").unwrap().inner;
        assert!(range.is_empty());
        assert_eq!(range.start, html.find("</div>").unwrap());
    }

    #[test]
    fn test_skips_noscript_copies() {
        let html = concat!(
            "<noscript><div id=\"x\" data-limit=\"9\">fallback</div></noscript>",
            "<div id=\"x\" data-limit=\"2\">real</div>"
        );
        let found = locate(html, "x").unwrap();
        assert_eq!(&html[found.inner.clone()], "real");
        assert_eq!(found.attr("data-limit"), Some("2"));
    }

    #[test]
    fn test_attr_value() {
        let attrs = r#" id="news" hidden DATA-LIMIT='3' class=grid"#;
        assert_eq!(attr_value(attrs, "id"), Some("news"));
        assert_eq!(attr_value(attrs, "data-limit"), Some("3"));
        assert_eq!(attr_value(attrs, "class"), Some("grid"));
        assert_eq!(attr_value(attrs, "hidden"), Some(""));
        assert_eq!(attr_value(attrs, "title"), None);
        assert_eq!(attr_value(r#" data-id="x""#, "id"), None);
    }
}
