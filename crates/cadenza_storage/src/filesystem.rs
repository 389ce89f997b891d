//! Filesystem-based artifact storage implementation.

use crate::{ArtifactLocation, ArtifactReference, ArtifactStore};
use cadenza_error::{CadenzaResult, StorageError, StorageErrorKind};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem storage backend.
///
/// Stores artifacts under the location's addressing scheme:
/// `{base_path}/{context_id}/{component}/{file_area}/{item_id}{file_path}{filename}`
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write never leaves a partial artifact at the final path. Content is
/// hashed with SHA-256 at creation and verified again on retrieval.
pub struct FileSystemStore {
    base_path: PathBuf,
}

impl FileSystemStore {
    /// Create a new filesystem store, creating the base directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> CadenzaResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem artifact store");
        Ok(Self { base_path })
    }

    /// Compute SHA-256 hash of data.
    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Resolve the filesystem path for a location.
    fn resolve_path(&self, location: &ArtifactLocation) -> CadenzaResult<PathBuf> {
        // The path segment comes from callers; refuse traversal.
        if location.file_path.contains("..") || location.filename.contains('/') {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{}{}",
                location.file_path, location.filename
            )))
            .into());
        }

        let mut path = self
            .base_path
            .join(location.context_id.to_string())
            .join(&location.component)
            .join(&location.file_area)
            .join(location.item_id.to_string());
        for segment in location.file_path.split('/').filter(|s| !s.is_empty()) {
            path = path.join(segment);
        }
        Ok(path.join(&location.filename))
    }

    /// Verify content hash matches the reference.
    fn verify_hash(data: &[u8], expected_hash: &str) -> CadenzaResult<()> {
        let actual_hash = Self::compute_hash(data);
        if actual_hash != expected_hash {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "Hash mismatch: expected {}, got {}",
                expected_hash, actual_hash
            )))
            .into());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ArtifactStore for FileSystemStore {
    #[tracing::instrument(skip(self, location, data), fields(size = data.len(), filename = %location.filename))]
    async fn create(
        &self,
        location: &ArtifactLocation,
        data: &[u8],
        mime_type: &str,
    ) -> CadenzaResult<ArtifactReference> {
        let path = self.resolve_path(location)?;
        let hash = Self::compute_hash(data);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            hash = %hash,
            path = %path.display(),
            size = data.len(),
            mime_type = %mime_type,
            "Stored artifact"
        );

        Ok(ArtifactReference {
            id: Uuid::new_v4(),
            content_hash: hash,
            storage_path: path.to_string_lossy().to_string(),
            size_bytes: data.len() as u64,
            mime_type: mime_type.to_string(),
            filename: location.filename.clone(),
        })
    }

    #[tracing::instrument(skip(self, reference), fields(path = %reference.storage_path))]
    async fn retrieve(&self, reference: &ArtifactReference) -> CadenzaResult<Vec<u8>> {
        let path = Path::new(&reference.storage_path);

        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.storage_path.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        Self::verify_hash(&data, &reference.content_hash)?;

        tracing::debug!(
            hash = %reference.content_hash,
            size = data.len(),
            "Retrieved artifact"
        );

        Ok(data)
    }

    async fn exists(&self, reference: &ArtifactReference) -> CadenzaResult<bool> {
        let path = Path::new(&reference.storage_path);
        Ok(tokio::fs::try_exists(path).await.unwrap_or(false))
    }

    #[tracing::instrument(skip(self, reference), fields(path = %reference.storage_path))]
    async fn delete(&self, reference: &ArtifactReference) -> CadenzaResult<()> {
        let path = Path::new(&reference.storage_path);

        tokio::fs::remove_file(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.storage_path.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "delete {}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::info!("Deleted artifact");
        Ok(())
    }
}
