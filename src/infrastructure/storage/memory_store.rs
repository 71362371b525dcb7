use std::path::PathBuf;

use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::domain::StoragePath;

/// Process-local store for tests and headless runs that keep nothing on disk.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    inner: InMemory,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<u64, ArtifactStoreError> {
        let size = data.len() as u64;
        self.inner
            .put(&StorePath::from(path.as_str()), PutPayload::from(data))
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(size)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, ArtifactStoreError> {
        let result = self
            .inner
            .get(&StorePath::from(path.as_str()))
            .await
            .map_err(|e| ArtifactStoreError::NotFound(e.to_string()))?;
        let bytes = result
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::ReadFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), ArtifactStoreError> {
        self.inner
            .delete(&StorePath::from(path.as_str()))
            .await
            .map_err(|e| ArtifactStoreError::DeleteFailed(e.to_string()))
    }

    fn local_path(&self, _path: &StoragePath) -> Option<PathBuf> {
        None
    }
}
