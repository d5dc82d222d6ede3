//! Storage traits and error types
//!
//! This module defines the trait interface for artifact persistence and
//! associated error types.

use crate::resource::ResourceId;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a document
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Cannot map {identifier} to a path: {reason}")]
    InvalidPath { identifier: String, reason: String },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for persistence operations
pub type PersistResult<T> = Result<T, PersistError>;

/// Trait for artifact persistence backends
///
/// Implementations hold no crawl-scoped state; the walker calls `store` once
/// per successfully fetched identifier.
pub trait Persist: Send + Sync {
    /// Writes one document
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier the document was fetched from
    /// * `document` - The decoded document
    ///
    /// # Returns
    ///
    /// The path of the written artifact
    fn store(&self, id: &ResourceId, document: &Value) -> PersistResult<PathBuf>;
}
