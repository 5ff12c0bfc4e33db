//! Diagnostic sinks for non-fatal load failures.
//!
//! Loaders never surface failures to the page. They hand each one to a sink
//! exactly once and leave the container as it was.

use std::sync::Mutex;

use tracing::error;

use crate::content::ContentKind;
use crate::fetch::LoadError;

/// Destination for load failures.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, kind: ContentKind, error: &LoadError);
}

/// Logs failures through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, kind: ContentKind, err: &LoadError) {
        error!(
            kind = kind.label(),
            resource = kind.resource_file(),
            "Error loading {}: {}",
            kind.label(),
            err
        );
    }
}

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ContentKind,
    pub message: String,
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded failures, oldest first.
    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, kind: ContentKind, err: &LoadError) {
        let entry = Diagnostic {
            kind,
            message: format!("Error loading {}: {}", kind.label(), err),
        };
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
