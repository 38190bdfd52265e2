//! Artifact source adapters.
//!
//! Two implementations of the [`ArtifactSource`] port: a directory of
//! `<name>.json` files for deployments where the frozen artifacts ship with
//! the application, and an in-memory map used by tests and embedders that
//! fetch bytes through their own transport.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::ports::ArtifactSource;

/// Error type for artifact access.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact '{0}' not found")]
    NotFound(String),

    #[error("Failed to read artifact '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Artifact source backed by a local directory of `<name>.json` files.
pub struct FileArtifactSource {
    root: PathBuf,
}

impl FileArtifactSource {
    /// Create a source rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl ArtifactSource for FileArtifactSource {
    type Error = ArtifactError;

    fn fetch(&self, name: &str) -> Result<Vec<u8>, Self::Error> {
        let path = self.artifact_path(name);
        if !path.exists() {
            return Err(ArtifactError::NotFound(name.to_string()));
        }
        std::fs::read(&path).map_err(|source| ArtifactError::Io {
            name: name.to_string(),
            source,
        })
    }
}

/// In-memory artifact source.
///
/// Useful for tests and for callers that already hold the artifact bytes
/// (e.g. fetched over their own transport at startup).
#[derive(Default)]
pub struct MemoryArtifactSource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryArtifactSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an artifact by name, replacing any previous bytes.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }

    /// Remove an artifact by name.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.entries.remove(name)
    }
}

impl ArtifactSource for MemoryArtifactSource {
    type Error = ArtifactError;

    fn fetch(&self, name: &str) -> Result<Vec<u8>, Self::Error> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| ArtifactError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_source_reads_named_json() {
        let temp = tempdir().expect("tempdir");
        std::fs::write(temp.path().join("svm1.json"), b"{}").expect("write artifact");

        let source = FileArtifactSource::new(temp.path());
        assert_eq!(source.fetch("svm1").expect("should read"), b"{}");

        let err = source.fetch("svm2").expect_err("missing artifact");
        assert!(matches!(err, ArtifactError::NotFound(name) if name == "svm2"));
    }

    #[test]
    fn test_memory_source() {
        let mut source = MemoryArtifactSource::new();
        source.insert("cb1", vec![1, 2, 3]);

        assert_eq!(source.fetch("cb1").expect("present"), vec![1, 2, 3]);
        assert!(source.fetch("cb2").is_err());

        source.remove("cb1");
        assert!(source.fetch("cb1").is_err());
    }
}
