//! Redfish-Walker: a resource tree snapshotter for Redfish services
//!
//! This crate walks the `@odata.id` link graph of a Redfish-style management
//! API, starting from one resource, and mirrors every reachable JSON document
//! onto disk as `<output>/<resource path>/index.json`. The resulting tree can be
//! served back later for offline replay or mocking.

pub mod config;
pub mod crawler;
pub mod output;
pub mod resource;
pub mod storage;

use thiserror::Error;

/// Main error type for Redfish-Walker operations
///
/// Only setup problems surface here. Failures while processing a single
/// resource are recorded in the [`output::CrawlReport`] instead.
#[derive(Debug, Error)]
pub enum WalkerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid resource identifier: {0}")]
    Identifier(#[from] IdentifierError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid host in config: {0}")]
    InvalidHost(String),

    #[error("Invalid start resource: {0}")]
    InvalidIdentifier(#[from] IdentifierError),
}

/// Resource identifier errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier '{0}' does not start with '/'")]
    NotAPath(String),
}

/// Result type alias for Redfish-Walker operations
pub type Result<T> = std::result::Result<T, WalkerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlSettings};
pub use crawler::{crawl, StopHandle, Walker};
pub use output::CrawlReport;
pub use resource::ResourceId;
