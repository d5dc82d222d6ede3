//! Diagnostic events emitted while crawling
//!
//! The walker reports progress through an injected [`DiagnosticSink`] rather
//! than writing to a fixed stream. The binary renders events through
//! `tracing`; tests collect them with [`MemorySink`].

use crate::crawler::FetchError;
use crate::resource::{LinkIssue, ResourceId};
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// One progress event
#[derive(Debug, Clone, PartialEq)]
pub enum CrawlEvent {
    /// A GET is about to be sent
    Requesting { id: ResourceId },

    /// The document arrived and decoded
    Fetched { id: ResourceId },

    /// The fetch failed
    FetchFailed { id: ResourceId, error: FetchError },

    /// The document was written to disk
    Stored { id: ResourceId, path: PathBuf },

    /// The document could not be written
    StoreFailed { id: ResourceId, message: String },

    /// A link value could not be turned into an identifier
    LinkSkipped {
        source: ResourceId,
        pointer: String,
        issue: LinkIssue,
    },

    /// A link was filtered out by the crawl scope
    OutOfScope {
        source: ResourceId,
        target: ResourceId,
    },

    /// The stop signal was observed with work still queued
    Cancelled { pending: usize },
}

impl CrawlEvent {
    /// Returns true for events describing something that went wrong
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. } | Self::StoreFailed { .. } | Self::LinkSkipped { .. }
        )
    }
}

impl fmt::Display for CrawlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requesting { id } => write!(f, "GET {}", id),
            Self::Fetched { id } => write!(f, "Fetched {}", id),
            Self::FetchFailed { error, .. } => write!(f, "{}", error),
            Self::Stored { id, path } => write!(f, "Saved {} to {}", id, path.display()),
            Self::StoreFailed { id, message } => write!(f, "Failed to save {}: {}", id, message),
            Self::LinkSkipped {
                source,
                pointer,
                issue,
            } => write!(f, "Skipped link in {} at {}: {}", source, pointer, issue),
            Self::OutOfScope { source, target } => {
                write!(f, "Not following {} from {} (out of scope)", target, source)
            }
            Self::Cancelled { pending } => {
                write!(f, "Crawl stopped with {} resources still queued", pending)
            }
        }
    }
}

/// Receives diagnostic events from the walker
pub trait DiagnosticSink: Send + Sync {
    /// Handles one event
    fn emit(&self, event: &CrawlEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _event: &CrawlEvent) {}
}

/// Renders events as `tracing` log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: &CrawlEvent) {
        if event.is_problem() {
            tracing::warn!("{}", event);
        } else {
            tracing::info!("{}", event);
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<CrawlEvent>>,
}

impl MemorySink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events received so far
    pub fn events(&self) -> Vec<CrawlEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, event: &CrawlEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
