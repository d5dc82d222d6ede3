use crate::resource::ResourceId;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Why a discovered `@odata.id` value could not be followed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum LinkIssue {
    #[error("link value is {found}, expected a string")]
    NotAString { found: String },

    #[error("link value is empty")]
    Empty,

    #[error("link '{value}' is not a resource path")]
    NotAPath { value: String },

    #[error("link '{value}' points outside the target host")]
    ForeignOrigin { value: String },
}

impl LinkIssue {
    /// Builds a `NotAString` issue describing the JSON type that was found
    pub fn not_a_string(value: &Value) -> Self {
        let found = match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        };
        Self::NotAString {
            found: found.to_string(),
        }
    }
}

/// Turns raw `@odata.id` strings into resource identifiers
///
/// # Normalization Rules
///
/// 1. Strip any `#fragment` (it addresses a member inside a document)
/// 2. Values starting with `/` are used verbatim
/// 3. Absolute URLs are reduced to path and query when scheme, host and port
///    all match the target origin
/// 4. Everything else is rejected with a [`LinkIssue`]
///
/// Trailing slashes and letter case are preserved.
#[derive(Debug, Clone)]
pub struct LinkNormalizer {
    origin: Option<Url>,
}

impl LinkNormalizer {
    /// Creates a normalizer that also accepts absolute URLs on `origin`
    pub fn new(origin: Url) -> Self {
        Self {
            origin: Some(origin),
        }
    }

    /// Creates a normalizer that accepts only paths
    pub fn paths_only() -> Self {
        Self { origin: None }
    }

    /// Normalizes a raw link value
    ///
    /// # Examples
    ///
    /// ```
    /// use redfish_walker::resource::LinkNormalizer;
    /// use url::Url;
    ///
    /// let normalizer = LinkNormalizer::new(Url::parse("https://10.0.0.5/").unwrap());
    ///
    /// let id = normalizer.normalize("https://10.0.0.5/redfish/v1/Chassis#/Members/0").unwrap();
    /// assert_eq!(id.as_str(), "/redfish/v1/Chassis");
    ///
    /// assert!(normalizer.normalize("https://192.168.1.1/redfish/v1").is_err());
    /// ```
    pub fn normalize(&self, raw: &str) -> Result<ResourceId, LinkIssue> {
        if raw.is_empty() {
            return Err(LinkIssue::Empty);
        }

        let without_fragment = match raw.find('#') {
            Some(index) => &raw[..index],
            None => raw,
        };

        if without_fragment.starts_with('/') {
            return ResourceId::parse(without_fragment).map_err(|_| LinkIssue::NotAPath {
                value: raw.to_string(),
            });
        }

        // Relative references and garbage fail here
        let url = Url::parse(without_fragment).map_err(|_| LinkIssue::NotAPath {
            value: raw.to_string(),
        })?;

        if !self.is_same_origin(&url) {
            return Err(LinkIssue::ForeignOrigin {
                value: raw.to_string(),
            });
        }

        let path = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };

        ResourceId::parse(&path).map_err(|_| LinkIssue::NotAPath {
            value: raw.to_string(),
        })
    }

    fn is_same_origin(&self, url: &Url) -> bool {
        match &self.origin {
            Some(origin) => {
                url.scheme() == origin.scheme()
                    && url.host_str().map(str::to_lowercase)
                        == origin.host_str().map(str::to_lowercase)
                    && url.port_or_known_default() == origin.port_or_known_default()
            }
            None => false,
        }
    }
}
