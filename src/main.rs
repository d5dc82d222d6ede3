//! Redfish-Walker main entry point
//!
//! This is the command-line interface for the Redfish-Walker snapshot tool.

use anyhow::Context;
use clap::Parser;
use redfish_walker::config::{load_config_with_hash, Config};
use redfish_walker::output::{print_summary, write_report};
use redfish_walker::Walker;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Redfish-Walker: snapshot a Redfish resource tree to disk
///
/// Redfish-Walker follows every `@odata.id` link reachable from a start
/// resource and stores each document as `<output>/<path>/index.json`, ready
/// to be served back as a mock.
#[derive(Parser, Debug)]
#[command(name = "redfish-walker")]
#[command(version)]
#[command(about = "Snapshot a Redfish resource tree to disk", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print a line per request and written file
    #[arg(long)]
    debug: bool,

    /// Write the snapshot here instead of the configured directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("redfish_walker=info,warn"),
            1 => EnvFilter::new("redfish_walker=debug,info"),
            2 => EnvFilter::new("redfish_walker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let mut settings = config.settings();
    if cli.debug {
        settings.debug = true;
    }
    if let Some(output_dir) = cli.output_dir {
        settings.output_dir = output_dir;
    }

    if cli.dry_run {
        handle_dry_run(&config, &settings);
        return Ok(ExitCode::SUCCESS);
    }

    let walker = Walker::from_settings(&settings)
        .context("Failed to set up the crawl")?
        .with_config_hash(config_hash);

    let stop = walker.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current resource");
            stop.stop();
        }
    });

    tracing::info!(
        "Crawling {}://{}{} into {}",
        settings.scheme,
        settings.host,
        settings.start_resource,
        settings.output_dir.display()
    );

    let report = walker.crawl().await;

    if !cli.quiet {
        print_summary(&report);
    }

    if let Some(report_path) = &config.output.report_path {
        write_report(&report, Path::new(report_path)).context("Failed to write crawl report")?;
    }

    if report.has_failures() || report.cancelled {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, settings: &redfish_walker::CrawlSettings) {
    println!("=== Redfish-Walker Dry Run ===\n");

    println!("Target:");
    println!("  URL: {}://{}{}", settings.scheme, settings.host, settings.start_resource);
    println!(
        "  Authentication: {}",
        if settings.credentials().is_some() {
            "basic"
        } else {
            "none"
        }
    );
    println!("  Verify TLS: {}", settings.verify_tls);
    println!("  Request timeout: {}s", settings.request_timeout.as_secs());

    println!("\nScope:");
    match &settings.scope.prefix {
        Some(prefix) => println!("  Link prefix: {}", prefix),
        None => println!("  Link prefix: (any)"),
    }
    println!("  Subtree only: {}", settings.scope.subtree_only);

    println!("\nOutput:");
    println!("  Directory: {}", settings.output_dir.display());
    if let Some(report_path) = &config.output.report_path {
        println!("  Report: {}", report_path);
    }
    println!("  Debug: {}", settings.debug);

    println!("\n✓ Configuration is valid");
}
