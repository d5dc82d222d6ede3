//! Human-readable and JSON renderings of a crawl report

use crate::output::CrawlReport;
use crate::WalkerError;
use std::path::Path;

/// Formats a crawl report as a plain-text summary
pub fn format_summary(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");
    out.push_str(&format!("Start resource: {}\n", report.start));
    if let Some(duration) = report.duration() {
        out.push_str(&format!(
            "Duration: {:.1}s\n",
            duration.num_milliseconds() as f64 / 1000.0
        ));
    }
    if report.cancelled {
        out.push_str("Status: stopped before the queue was empty\n");
    }
    out.push('\n');

    out.push_str("Overview:\n");
    out.push_str(&format!("  Resources discovered: {}\n", report.visited.len()));
    out.push_str(&format!("  Resources fetched: {}\n", report.fetched));
    out.push_str(&format!("  Resources stored: {}\n", report.stored));
    out.push_str(&format!("  Failed fetches: {}\n", report.failed_fetches()));
    out.push_str(&format!("  Failed writes: {}\n", report.failed_persists()));
    out.push_str(&format!("  Skipped links: {}\n", report.warnings.len()));
    if report.out_of_scope > 0 {
        out.push_str(&format!("  Out-of-scope resources: {}\n", report.out_of_scope));
    }

    if !report.failures.is_empty() {
        out.push_str(&format!("\nFailures ({}):\n", report.failures.len()));
        for failure in &report.failures {
            out.push_str(&format!(
                "  - {} [{}]: {}\n",
                failure.identifier, failure.kind, failure.message
            ));
        }
    }

    if !report.warnings.is_empty() {
        out.push_str(&format!("\nSkipped links ({}):\n", report.warnings.len()));
        for warning in &report.warnings {
            out.push_str(&format!(
                "  - {} at {}: {}\n",
                warning.source, warning.pointer, warning.issue
            ));
        }
    }

    out
}

/// Prints the summary to stdout
pub fn print_summary(report: &CrawlReport) {
    print!("{}", format_summary(report));
}

/// Writes the report as pretty JSON, creating parent directories as needed
pub fn write_report(report: &CrawlReport, path: &Path) -> Result<(), WalkerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;

    tracing::info!("Crawl report written to {}", path.display());
    Ok(())
}
