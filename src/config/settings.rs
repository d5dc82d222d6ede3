use crate::config::types::Config;
use crate::config::validation::validate_host;
use crate::crawler::FetcherConfig;
use crate::resource::{LinkScope, ResourceId};
use crate::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Everything a single crawl needs, independent of where it came from
///
/// Built from a [`Config`] file by the binary, or directly by library users.
///
/// # Example
///
/// ```
/// use redfish_walker::CrawlSettings;
///
/// let mut settings = CrawlSettings::new("10.0.0.5", "/redfish/v1/Chassis", "redfish_mock_data");
/// settings.debug = true;
/// settings.username = Some("admin".to_string());
/// settings.password = Some("secret".to_string());
/// ```
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub host: String,
    pub start_resource: String,
    pub output_dir: PathBuf,
    pub debug: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub scheme: String,
    pub verify_tls: bool,
    pub request_timeout: Duration,
    pub scope: LinkScope,
}

impl CrawlSettings {
    /// Creates settings with HTTPS, no credentials, no TLS verification and
    /// an unrestricted scope
    pub fn new(
        host: impl Into<String>,
        start_resource: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            host: host.into(),
            start_resource: start_resource.into(),
            output_dir: output_dir.into(),
            debug: false,
            username: None,
            password: None,
            scheme: "https".to_string(),
            verify_tls: false,
            request_timeout: Duration::from_secs(30),
            scope: LinkScope::default(),
        }
    }

    /// Parses the start resource
    pub fn start(&self) -> Result<ResourceId, ConfigError> {
        Ok(ResourceId::parse(&self.start_resource)?)
    }

    /// Returns the `scheme://host/` origin every request is made against
    pub fn origin(&self) -> Result<Url, ConfigError> {
        validate_host(&self.scheme, &self.host)
    }

    /// Returns the credentials, present only when both halves are set
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            _ => None,
        }
    }

    /// Builds the immutable fetcher configuration
    pub fn fetcher_config(&self) -> Result<FetcherConfig, ConfigError> {
        Ok(FetcherConfig {
            origin: self.origin()?,
            credentials: self.credentials(),
            verify_tls: self.verify_tls,
            timeout: self.request_timeout,
        })
    }
}

impl Config {
    /// Converts the file configuration into crawl settings
    pub fn settings(&self) -> CrawlSettings {
        CrawlSettings {
            host: self.target.host.clone(),
            start_resource: self.target.start_resource.clone(),
            output_dir: PathBuf::from(&self.output.directory),
            debug: self.output.debug,
            username: self.target.username.clone(),
            password: self.target.password.clone(),
            scheme: self.target.scheme.clone(),
            verify_tls: self.target.verify_tls,
            request_timeout: Duration::from_secs(self.target.request_timeout_secs),
            scope: LinkScope {
                prefix: self.crawler.link_prefix.clone(),
                subtree_only: self.crawler.subtree_only,
            },
        }
    }
}
