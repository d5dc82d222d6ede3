//! Output module for crawl reports
//!
//! This module handles:
//! - The aggregate [`CrawlReport`] returned by every crawl
//! - Printing a plain-text summary
//! - Exporting the report as JSON

mod report;
mod summary;

pub use report::{CrawlReport, Failure, FailureKind, LinkWarning};
pub use summary::{format_summary, print_summary, write_report};
