//! Configuration module for Redfish-Walker
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and turning them into the [`CrawlSettings`] a crawl runs with.
//!
//! # Example
//!
//! ```no_run
//! use redfish_walker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("walker.toml")).unwrap();
//! println!("Crawl will start at: {}", config.target.start_resource);
//! ```

mod parser;
mod settings;
mod types;
mod validation;

// Re-export types
pub use settings::CrawlSettings;
pub use types::{Config, CrawlerConfig, OutputConfig, TargetConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
