use std::io;

use bytes::Bytes;

use crate::domain::StoragePath;

/// Flat-file storage for uploads and generated results.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Replaces any existing object at `path` in one step.
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<u64, ArtifactStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, ArtifactStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), ArtifactStoreError>;

    /// Filesystem location of `path`, when the store is backed by one.
    fn local_path(&self, path: &StoragePath) -> Option<std::path::PathBuf>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
