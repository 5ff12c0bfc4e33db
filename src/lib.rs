//! sitecontent - dynamic content loading for static informational sites.
//!
//! Fetches the site's JSON data files, renders them into card markup, and
//! injects the markup into the page containers that ask for it. The same
//! pipeline prerenders pages on disk, feeds the preview server, and can be
//! driven against in-memory containers in tests.

pub mod cli;
pub mod config;
pub mod content;
pub mod diagnostics;
pub mod effects;
pub mod fetch;
pub mod page;
pub mod server;
pub mod utils;

pub use content::{load_content, load_dynamic_content, ContentKind};
pub use diagnostics::{DiagnosticSink, MemorySink, TracingSink};
pub use fetch::{FetchResponse, Fetcher, FsFetcher, HttpFetcher, LoadError};
pub use page::{Container, Document, HtmlPage, MemoryContainer};
