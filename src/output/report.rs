//! Crawl report types
//!
//! This module defines the aggregate outcome of one crawl: what was stored,
//! what failed and which links could not be followed.

use crate::resource::{LinkIssue, ResourceId};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt;

/// Category of a per-resource failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection, DNS, timeout or body read failure
    Transport,

    /// The server answered with a non-success status
    HttpStatus { status: u16 },

    /// The body was not valid JSON
    Decode,

    /// The document could not be written to disk
    Io,
}

impl FailureKind {
    /// Returns true if the failure happened while fetching
    pub fn is_fetch(&self) -> bool {
        !matches!(self, Self::Io)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::HttpStatus { status } => write!(f, "HTTP {}", status),
            Self::Decode => write!(f, "decode"),
            Self::Io => write!(f, "io"),
        }
    }
}

/// A resource that could not be fetched or stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub identifier: ResourceId,
    #[serde(flatten)]
    pub kind: FailureKind,
    pub message: String,
}

/// A link value that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkWarning {
    /// The document the link was found in
    pub source: ResourceId,

    /// JSON pointer of the offending member
    pub pointer: String,

    #[serde(flatten)]
    pub issue: LinkIssue,
}

/// Outcome of one crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// Where the crawl started
    pub start: ResourceId,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Hash of the configuration file, when the crawl came from one
    pub config_hash: Option<String>,

    /// Documents successfully fetched and decoded
    pub fetched: usize,

    /// Documents successfully written
    pub stored: usize,

    /// Every identifier enqueued, in discovery order
    pub visited: Vec<ResourceId>,

    /// Fetch and persist failures, in discovery order
    pub failures: Vec<Failure>,

    /// Skipped link values
    pub warnings: Vec<LinkWarning>,

    /// Distinct identifiers not followed because of the crawl scope
    pub out_of_scope: usize,

    /// True if the stop signal ended the crawl early
    pub cancelled: bool,
}

impl CrawlReport {
    /// Starts a report for a crawl beginning now
    pub fn begin(start: ResourceId) -> Self {
        Self {
            start,
            started_at: Utc::now(),
            finished_at: None,
            config_hash: None,
            fetched: 0,
            stored: 0,
            visited: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
            out_of_scope: 0,
            cancelled: false,
        }
    }

    /// Records a failure for one identifier
    pub fn record_failure(&mut self, identifier: ResourceId, kind: FailureKind, message: String) {
        self.failures.push(Failure {
            identifier,
            kind,
            message,
        });
    }

    /// Records a skipped link
    pub fn record_warning(&mut self, source: ResourceId, pointer: String, issue: LinkIssue) {
        self.warnings.push(LinkWarning {
            source,
            pointer,
            issue,
        });
    }

    /// Closes the report with the final visited set
    pub fn finish(&mut self, visited: Vec<ResourceId>) {
        self.visited = visited;
        self.finished_at = Some(Utc::now());
    }

    /// Returns true if any resource failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of identifiers whose fetch failed
    pub fn failed_fetches(&self) -> usize {
        self.failures.iter().filter(|f| f.kind.is_fetch()).count()
    }

    /// Number of fetched documents that could not be written
    pub fn failed_persists(&self) -> usize {
        self.failures.iter().filter(|f| !f.kind.is_fetch()).count()
    }

    /// Wall-clock duration, once finished
    pub fn duration(&self) -> Option<Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}
