//! Storage module for persisting fetched resources
//!
//! This module handles writing each fetched document to disk, including:
//! - Mapping resource identifiers onto a directory layout
//! - Idempotent directory creation
//! - Stable pretty-printed JSON output

mod fs;
mod traits;

pub use fs::{render_document, FsPersister, ARTIFACT_FILE_NAME};
pub use traits::{Persist, PersistError, PersistResult};
