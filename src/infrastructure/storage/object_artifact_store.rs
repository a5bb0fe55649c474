use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ArtifactStore, ArtifactStoreError, Screenshot};
use crate::domain::{ArtifactRef, JobId};

/// Artifact store over any `object_store` backend.
pub struct ObjectArtifactStore {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectArtifactStore {
    pub fn new(inner: Arc<dyn ObjectStore>) -> Self {
        Self { inner }
    }

    /// Files under `base_path`, created if missing.
    pub fn local(base_path: PathBuf) -> Result<Self, ArtifactStoreError> {
        std::fs::create_dir_all(&base_path).map_err(ArtifactStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ArtifactStoreError::UploadFailed(e.to_string()))?;
        Ok(Self::new(Arc::new(fs)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }
}

#[async_trait::async_trait]
impl ArtifactStore for ObjectArtifactStore {
    async fn put(
        &self,
        job_id: JobId,
        screenshot: &Screenshot,
    ) -> Result<ArtifactRef, ArtifactStoreError> {
        let reference = ArtifactRef::new(&job_id, screenshot.format);
        let store_path = StorePath::from(reference.as_str());
        let payload = PutPayload::from(Bytes::copy_from_slice(&screenshot.data));

        self.inner
            .put(&store_path, payload)
            .await
            .map_err(|e| ArtifactStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(artifact = %reference, bytes = screenshot.data.len(), "Artifact stored");
        Ok(reference)
    }

    async fn get(&self, reference: &ArtifactRef) -> Result<Vec<u8>, ArtifactStoreError> {
        let store_path = StorePath::from(reference.as_str());
        let result = self.inner.get(&store_path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => ArtifactStoreError::NotFound(e.to_string()),
            other => ArtifactStoreError::DownloadFailed(other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, reference: &ArtifactRef) -> Result<(), ArtifactStoreError> {
        let store_path = StorePath::from(reference.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| ArtifactStoreError::DeleteFailed(e.to_string()))
    }
}
