//! Filesystem artifact storage
//!
//! Every resource becomes `<root>/<path segments...>/index.json`, holding the
//! document as 4-space indented JSON.

use crate::resource::ResourceId;
use crate::storage::traits::{Persist, PersistError, PersistResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Name of the file written inside each resource directory
pub const ARTIFACT_FILE_NAME: &str = "index.json";

/// Writes documents into a directory tree mirroring their identifiers
#[derive(Debug, Clone)]
pub struct FsPersister {
    root: PathBuf,
}

impl FsPersister {
    /// Creates a persister rooted at `root`
    ///
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the output root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps an identifier to its artifact directory
    ///
    /// # Examples
    ///
    /// ```
    /// use redfish_walker::storage::FsPersister;
    /// use redfish_walker::ResourceId;
    /// use std::path::Path;
    ///
    /// let persister = FsPersister::new("out");
    /// let id = ResourceId::parse("/redfish/v1/Chassis/1").unwrap();
    /// assert_eq!(
    ///     persister.artifact_dir(&id).unwrap(),
    ///     Path::new("out/redfish/v1/Chassis/1")
    /// );
    /// ```
    pub fn artifact_dir(&self, id: &ResourceId) -> PersistResult<PathBuf> {
        let mut dir = self.root.clone();

        for segment in id.segments() {
            if segment == "." || segment == ".." {
                return Err(PersistError::InvalidPath {
                    identifier: id.to_string(),
                    reason: format!("segment '{}' would leave the output directory", segment),
                });
            }

            if segment.contains('\\') || segment.contains('\0') {
                return Err(PersistError::InvalidPath {
                    identifier: id.to_string(),
                    reason: format!("segment '{}' contains a forbidden character", segment),
                });
            }

            dir.push(segment);
        }

        Ok(dir)
    }

    /// Maps an identifier to its artifact file
    pub fn artifact_path(&self, id: &ResourceId) -> PersistResult<PathBuf> {
        Ok(self.artifact_dir(id)?.join(ARTIFACT_FILE_NAME))
    }
}

impl Persist for FsPersister {
    fn store(&self, id: &ResourceId, document: &Value) -> PersistResult<PathBuf> {
        let dir = self.artifact_dir(id)?;
        let contents = render_document(document)?;

        std::fs::create_dir_all(&dir).map_err(|source| PersistError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(ARTIFACT_FILE_NAME);
        std::fs::write(&path, contents).map_err(|source| PersistError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {} ({})", path.display(), id);
        Ok(path)
    }
}

/// Serializes a document with 4-space indentation
pub fn render_document(document: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document.serialize(&mut serializer)?;
    Ok(buffer)
}
