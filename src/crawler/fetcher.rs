//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the walker, including:
//! - Building HTTP clients with the configured TLS policy and timeouts
//! - Mapping resource identifiers onto request URLs
//! - GET requests with optional basic authentication
//! - Error classification (transport, HTTP status, JSON decoding)

use crate::output::FailureKind;
use crate::resource::ResourceId;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a single resource could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request failed for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to fetch {url}. Status code: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse JSON response for {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// Returns the report category of this error
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport { .. } => FailureKind::Transport,
            Self::HttpStatus { status, .. } => FailureKind::HttpStatus { status: *status },
            Self::Decode { .. } => FailureKind::Decode,
        }
    }

    fn transport(url: &Url, error: &reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "Request timeout".to_string()
        } else if error.is_connect() {
            format!("Connection failed: {}", error)
        } else {
            error.to_string()
        };

        Self::Transport {
            url: url.to_string(),
            message,
        }
    }
}

/// The capability the walker needs: JSON for a resource path, or an error
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches and decodes one resource
    async fn fetch(&self, id: &ResourceId) -> Result<Value, FetchError>;
}

/// Immutable connection settings for [`HttpFetcher`]
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// `scheme://host[:port]/` every identifier is resolved against
    pub origin: Url,

    /// Basic-auth user name and password
    pub credentials: Option<(String, String)>,

    /// Whether to verify the server certificate
    pub verify_tls: bool,

    /// Whole-request timeout
    pub timeout: Duration,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("redfish-walker/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(config.timeout)
        .connect_timeout(Duration::from_secs(10))
        // Management controllers usually ship self-signed certificates
        .danger_accept_invalid_certs(!config.verify_tls)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Resolves a resource identifier against the origin
///
/// The identifier always replaces the path, so a value like `//other/x` stays
/// on the configured host instead of being read as a network-path reference.
///
/// # Examples
///
/// ```
/// use redfish_walker::crawler::resource_url;
/// use redfish_walker::ResourceId;
/// use url::Url;
///
/// let origin = Url::parse("https://10.0.0.5/").unwrap();
/// let id = ResourceId::parse("/redfish/v1/Systems?$top=1").unwrap();
/// assert_eq!(
///     resource_url(&origin, &id).as_str(),
///     "https://10.0.0.5/redfish/v1/Systems?$top=1"
/// );
/// ```
pub fn resource_url(origin: &Url, id: &ResourceId) -> Url {
    let mut url = origin.clone();
    match id.as_str().split_once('?') {
        Some((path, query)) => {
            url.set_path(path);
            url.set_query(Some(query));
        }
        None => {
            url.set_path(id.as_str());
            url.set_query(None);
        }
    }
    url
}

/// Fetches resources over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetcherConfig,
}

impl HttpFetcher {
    /// Creates a fetcher with its own client
    pub fn new(config: FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    /// Returns the configuration this fetcher was built with
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, id: &ResourceId) -> Result<Value, FetchError> {
        let url = resource_url(&self.config.origin, id);

        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");

        if let Some((username, password)) = &self.config.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::transport(&url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(&url, &e))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
