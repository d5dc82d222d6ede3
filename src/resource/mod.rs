//! Resource identifier handling for Redfish-Walker
//!
//! This module provides the [`ResourceId`] type, link normalization, and the
//! optional scope filters that decide which discovered links are followed.

mod normalize;
mod scope;

pub use normalize::{LinkIssue, LinkNormalizer};
pub use scope::{is_within, LinkScope};

use crate::IdentifierError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A path naming one resource on the target host, e.g. `/redfish/v1/Chassis/1`
///
/// Identifiers are compared by exact string equality. The only guarantee the
/// type carries is that the path is non-empty and starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Parses a resource path
    ///
    /// # Examples
    ///
    /// ```
    /// use redfish_walker::ResourceId;
    ///
    /// let id = ResourceId::parse("/redfish/v1/Chassis/1").unwrap();
    /// assert_eq!(id.segments().collect::<Vec<_>>(), ["redfish", "v1", "Chassis", "1"]);
    ///
    /// assert!(ResourceId::parse("").is_err());
    /// assert!(ResourceId::parse("redfish/v1").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self, IdentifierError> {
        if path.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if !path.starts_with('/') {
            return Err(IdentifierError::NotAPath(path.to_string()));
        }

        Ok(Self(path.to_string()))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the non-empty path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ResourceId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
