//! Crawler module for walking a Redfish resource tree
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with typed failures
//! - `@odata.id` link extraction from arbitrary JSON
//! - The visited set and work queue
//! - Diagnostic events for debug output
//! - Overall crawl coordination

mod events;
mod fetcher;
mod frontier;
mod links;
mod walker;

pub use events::{CrawlEvent, DiagnosticSink, MemorySink, NullSink, TracingSink};
pub use fetcher::{build_http_client, resource_url, Fetch, FetchError, FetcherConfig, HttpFetcher};
pub use frontier::Frontier;
pub use links::{extract_links, FoundLink, LINK_KEY};
pub use walker::{StopHandle, Walker};

use crate::config::CrawlSettings;
use crate::output::CrawlReport;
use crate::WalkerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for taking a snapshot. It will:
/// 1. Validate the settings and build the HTTP client
/// 2. Walk every resource reachable from the start resource
/// 3. Write each document under the output directory
/// 4. Return the aggregate report
///
/// # Arguments
///
/// * `settings` - Host, credentials, start resource and output directory
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran; individual failures are in the report
/// * `Err(WalkerError)` - The crawl could not be set up
///
/// # Example
///
/// ```no_run
/// use redfish_walker::{crawl, CrawlSettings};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = CrawlSettings::new("10.0.0.5", "/redfish/v1/Chassis", "redfish_mock_data");
/// let report = crawl(&settings).await?;
/// println!("Stored {} resources", report.stored);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(settings: &CrawlSettings) -> Result<CrawlReport, WalkerError> {
    let walker = Walker::from_settings(settings)?;
    Ok(walker.crawl().await)
}
