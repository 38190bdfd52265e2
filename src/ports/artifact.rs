//! Artifact source port: Trait for fetching model artifact bytes.
//!
//! This trait abstracts where the frozen model artifacts live (local
//! directory, bundled fixtures, a remote bucket behind a thin shim) from
//! the registry that deserializes them.

/// Trait for read-only, name-keyed artifact byte access.
///
/// Used exactly once per process, at registry load time. A source never
/// retries or substitutes a fallback artifact; a failed fetch is fatal to
/// the load.
pub trait ArtifactSource: Send + Sync {
    /// Error type for fetch operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the raw bytes of the named artifact.
    ///
    /// # Errors
    /// Returns error if the artifact is missing or unreadable.
    fn fetch(&self, name: &str) -> Result<Vec<u8>, Self::Error>;
}
