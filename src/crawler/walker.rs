//! Walker - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Draining the frontier one identifier at a time
//! - Fetching and persisting each document
//! - Extracting, normalizing and scoping discovered links
//! - Recording per-resource failures without aborting the crawl
//! - Observing an external stop signal between iterations

use crate::config::CrawlSettings;
use crate::crawler::events::{CrawlEvent, DiagnosticSink, TracingSink};
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::links::extract_links;
use crate::output::{CrawlReport, FailureKind};
use crate::resource::{LinkIssue, LinkNormalizer, LinkScope, ResourceId};
use crate::storage::{FsPersister, Persist};
use crate::WalkerError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag asking a running crawl to stop
///
/// The walker checks it once per loop iteration, never in the middle of a
/// fetch.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Creates a handle that has not been triggered
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the crawl to stop
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once `stop` has been called
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Walks the `@odata.id` graph from one start resource
pub struct Walker<F, P> {
    start: ResourceId,
    fetcher: F,
    persister: P,
    normalizer: LinkNormalizer,
    scope: LinkScope,
    sink: Arc<dyn DiagnosticSink>,
    debug: bool,
    stop: StopHandle,
    config_hash: Option<String>,
}

impl Walker<HttpFetcher, FsPersister> {
    /// Creates a walker that fetches over HTTP and writes to the filesystem
    ///
    /// # Arguments
    ///
    /// * `settings` - Host, start resource, output directory, credentials and
    ///   debug flag
    ///
    /// # Returns
    ///
    /// * `Ok(Walker)` - Ready to crawl
    /// * `Err(WalkerError)` - Invalid settings or HTTP client setup failure
    pub fn from_settings(settings: &CrawlSettings) -> Result<Self, WalkerError> {
        let start = settings.start()?;
        let fetcher_config = settings.fetcher_config()?;
        let normalizer = LinkNormalizer::new(fetcher_config.origin.clone());
        let fetcher = HttpFetcher::new(fetcher_config)?;
        let persister = FsPersister::new(&settings.output_dir);

        Ok(Walker::new(start, fetcher, persister)
            .with_normalizer(normalizer)
            .with_scope(settings.scope.clone())
            .with_debug(settings.debug))
    }
}

impl<F: Fetch, P: Persist> Walker<F, P> {
    /// Creates a walker around any fetcher and persister
    ///
    /// Defaults: paths-only link normalization, unrestricted scope, debug
    /// output off, diagnostics rendered through `tracing` once enabled.
    pub fn new(start: ResourceId, fetcher: F, persister: P) -> Self {
        Self {
            start,
            fetcher,
            persister,
            normalizer: LinkNormalizer::paths_only(),
            scope: LinkScope::default(),
            sink: Arc::new(TracingSink),
            debug: false,
            stop: StopHandle::new(),
            config_hash: None,
        }
    }

    /// Sets how raw link values become identifiers
    pub fn with_normalizer(mut self, normalizer: LinkNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Restricts which links are followed
    pub fn with_scope(mut self, scope: LinkScope) -> Self {
        self.scope = scope;
        self
    }

    /// Replaces the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Turns progress events on or off
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Uses an existing stop handle
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    /// Records the configuration hash in every report
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Returns a handle that stops this walker's crawls
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Returns the start resource
    pub fn start(&self) -> &ResourceId {
        &self.start
    }

    /// Runs one crawl from the start resource until the queue is empty
    ///
    /// Never fails: every per-resource problem ends up in the report.
    pub async fn crawl(&self) -> CrawlReport {
        let mut frontier = Frontier::new(self.start.clone());
        let mut report = CrawlReport::begin(self.start.clone());
        report.config_hash = self.config_hash.clone();

        tracing::info!("Starting crawl at {}", self.start);

        loop {
            if self.stop.is_stopped() {
                tracing::info!("Stop requested, {} resources left in queue", frontier.pending());
                self.emit(CrawlEvent::Cancelled {
                    pending: frontier.pending(),
                });
                report.cancelled = true;
                break;
            }

            let id = match frontier.next() {
                Some(id) => id,
                None => {
                    tracing::debug!("Work queue is empty, crawl complete");
                    break;
                }
            };

            self.process(&id, &mut frontier, &mut report).await;

            if report.fetched > 0 && report.fetched % 50 == 0 {
                tracing::info!(
                    "Progress: {} fetched, {} stored, {} queued",
                    report.fetched,
                    report.stored,
                    frontier.pending()
                );
            }
        }

        report.finish(frontier.into_visited());

        tracing::info!(
            "Crawl finished: {} stored, {} failed, {} skipped links",
            report.stored,
            report.failures.len(),
            report.warnings.len()
        );

        report
    }

    /// Fetches, stores and expands one identifier
    async fn process(&self, id: &ResourceId, frontier: &mut Frontier, report: &mut CrawlReport) {
        self.emit(CrawlEvent::Requesting { id: id.clone() });

        let document = match self.fetcher.fetch(id).await {
            Ok(document) => document,
            Err(error) => {
                tracing::debug!("Fetch failed for {}: {}", id, error);
                report.record_failure(id.clone(), error.kind(), error.to_string());
                self.emit(CrawlEvent::FetchFailed {
                    id: id.clone(),
                    error,
                });
                return;
            }
        };

        report.fetched += 1;
        self.emit(CrawlEvent::Fetched { id: id.clone() });

        match self.persister.store(id, &document) {
            Ok(path) => {
                report.stored += 1;
                self.emit(CrawlEvent::Stored {
                    id: id.clone(),
                    path,
                });
            }
            Err(error) => {
                // The document is still in memory, so its links are followed
                tracing::debug!("Persist failed for {}: {}", id, error);
                report.record_failure(id.clone(), FailureKind::Io, error.to_string());
                self.emit(CrawlEvent::StoreFailed {
                    id: id.clone(),
                    message: error.to_string(),
                });
            }
        }

        for link in extract_links(&document) {
            let normalized = match link.value.as_str() {
                Some(raw) => self.normalizer.normalize(raw),
                None => Err(LinkIssue::not_a_string(link.value)),
            };

            let child = match normalized {
                Ok(child) => child,
                Err(issue) => {
                    self.emit(CrawlEvent::LinkSkipped {
                        source: id.clone(),
                        pointer: link.pointer.clone(),
                        issue: issue.clone(),
                    });
                    report.record_warning(id.clone(), link.pointer, issue);
                    continue;
                }
            };

            // Self-references and back-references end here
            if frontier.contains(&child) {
                continue;
            }

            if !self.scope.admits(id, &child) {
                if frontier.reject(child.clone()) {
                    report.out_of_scope += 1;
                }
                self.emit(CrawlEvent::OutOfScope {
                    source: id.clone(),
                    target: child,
                });
                continue;
            }

            frontier.offer(child);
        }

        tracing::debug!(
            "Processed {} ({} visited, {} queued)",
            id,
            frontier.visited_count(),
            frontier.pending()
        );
    }

    fn emit(&self, event: CrawlEvent) {
        if self.debug {
            self.sink.emit(&event);
        }
    }
}
