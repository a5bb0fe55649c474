use crate::domain::{ArtifactRef, JobId};

use super::Screenshot;

#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(
        &self,
        job_id: JobId,
        screenshot: &Screenshot,
    ) -> Result<ArtifactRef, ArtifactStoreError>;

    async fn get(&self, reference: &ArtifactRef) -> Result<Vec<u8>, ArtifactStoreError>;

    async fn delete(&self, reference: &ArtifactRef) -> Result<(), ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
