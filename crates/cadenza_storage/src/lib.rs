//! Artifact storage for generated media.
//!
//! The pipeline produces binary artifacts (audio, images) that must outlive
//! the request. This crate provides the [`ArtifactStore`] seam the
//! orchestrator persists through, plus a filesystem backend. Artifacts are
//! addressed by a `(context, component, area, item, path, filename)`
//! location and identified afterwards by an opaque [`ArtifactReference`].
//!
//! # Example
//!
//! ```no_run
//! use cadenza_storage::{ArtifactLocation, ArtifactStore, FileSystemStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemStore::new("/var/cadenza/artifacts")?;
//! let location = ArtifactLocation::new(1, "cadenza_provider", "generatedaudio", 0, "/", "speech.mp3");
//!
//! let reference = store.create(&location, b"...mp3 bytes...", "audio/mpeg").await?;
//! let bytes = store.retrieve(&reference).await?;
//! # Ok(())
//! # }
//! ```

use cadenza_error::CadenzaResult;
use uuid::Uuid;

mod filesystem;
mod location;

pub use cadenza_error::{StorageError, StorageErrorKind};
pub use filesystem::FileSystemStore;
pub use location::ArtifactLocation;

/// Reference to a stored artifact.
///
/// Contains everything needed to retrieve the bytes again, plus the
/// metadata the pipeline reports to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactReference {
    /// Unique identifier for this artifact.
    pub id: Uuid,
    /// SHA-256 hash of the content, verified on retrieval.
    pub content_hash: String,
    /// Backend-specific path/key to the artifact.
    pub storage_path: String,
    /// Size of the artifact in bytes.
    pub size_bytes: u64,
    /// MIME type supplied at creation time.
    pub mime_type: String,
    /// Filename the artifact was stored under.
    pub filename: String,
}

/// Trait for pluggable artifact storage backends.
///
/// From the pipeline's perspective `create` is atomic: afterwards the
/// artifact either exists with full content or does not exist at all.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist bytes under the given location and return a reference.
    async fn create(
        &self,
        location: &ArtifactLocation,
        data: &[u8],
        mime_type: &str,
    ) -> CadenzaResult<ArtifactReference>;

    /// Retrieve artifact bytes by reference.
    async fn retrieve(&self, reference: &ArtifactReference) -> CadenzaResult<Vec<u8>>;

    /// Check whether the artifact still exists.
    async fn exists(&self, reference: &ArtifactReference) -> CadenzaResult<bool>;

    /// Delete the artifact.
    async fn delete(&self, reference: &ArtifactReference) -> CadenzaResult<()>;
}
