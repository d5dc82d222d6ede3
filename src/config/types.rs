use serde::Deserialize;

/// Main configuration structure for Redfish-Walker
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub target: TargetConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// The Redfish service to snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Host name or IP address, optionally with `:port`
    pub host: String,

    /// Resource path the crawl starts from
    #[serde(rename = "start-resource", default = "default_start_resource")]
    pub start_resource: String,

    /// URL scheme, "https" or "http"
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Basic-auth user name
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password
    #[serde(default)]
    pub password: Option<String>,

    /// Whether to verify the service's TLS certificate
    #[serde(rename = "verify-tls", default)]
    pub verify_tls: bool,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the resource tree is mirrored into
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Emit a progress line per request and written file
    #[serde(default)]
    pub debug: bool,

    /// Where to write the JSON crawl report, if anywhere
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            debug: false,
            report_path: None,
        }
    }
}

/// Link-following configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlerConfig {
    /// Only follow links at or below this path
    #[serde(rename = "link-prefix", default)]
    pub link_prefix: Option<String>,

    /// Only follow links at or below the resource they appear in
    #[serde(rename = "subtree-only", default)]
    pub subtree_only: bool,
}

fn default_start_resource() -> String {
    "/redfish/v1".to_string()
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_directory() -> String {
    "redfish_mock_data".to_string()
}
