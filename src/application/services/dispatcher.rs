use std::sync::Arc;

use crate::application::ports::{ArtifactStore, ArtifactStoreError, JobRepository, RepositoryError};
use crate::domain::{ImageFormat, Job, JobId, JobStatus, JobUrl, JobUrlError};
use crate::infrastructure::observability::redact_url;

use super::work_queue::{CaptureMessage, QueueError, WorkQueue};

/// Entry point for the HTTP layer: accepts submissions and answers lookups.
pub struct Dispatcher {
    job_repository: Arc<dyn JobRepository>,
    artifact_store: Arc<dyn ArtifactStore>,
    queue: WorkQueue,
}

impl Dispatcher {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        artifact_store: Arc<dyn ArtifactStore>,
        queue: WorkQueue,
    ) -> Self {
        Self {
            job_repository,
            artifact_store,
            queue,
        }
    }

    /// Validates `raw_url`, records a queued job and enqueues it.
    ///
    /// Queue capacity is reserved before the record is created, so a rejected
    /// submission leaves nothing behind in the store.
    pub async fn submit(&self, raw_url: &str) -> Result<JobId, DispatchError> {
        let url = JobUrl::parse(raw_url)?;
        let permit = self.queue.try_reserve()?;

        let job = Job::new(url);
        self.job_repository.create(&job).await?;

        permit.send(CaptureMessage {
            job_id: job.id,
            url: job.url.clone(),
        });

        tracing::info!(
            job_id = %job.id,
            url = %redact_url(job.url.as_url()),
            queue_depth = self.queue.depth(),
            "Capture job enqueued"
        );

        Ok(job.id)
    }

    pub async fn check(&self, id: JobId) -> Result<Job, DispatchError> {
        Ok(self.job_repository.get_by_id(id).await?)
    }

    pub async fn info(&self, id: JobId) -> Result<Job, DispatchError> {
        self.check(id).await
    }

    /// Image bytes of a finished job.
    pub async fn artifact(&self, id: JobId) -> Result<(Vec<u8>, ImageFormat), DispatchError> {
        let job = self.job_repository.get_by_id(id).await?;

        let result = match (job.status, job.result) {
            (JobStatus::Done, Some(result)) => result,
            _ => return Err(DispatchError::NotReady(id)),
        };

        let data = self
            .artifact_store
            .get(&result.artifact)
            .await
            .map_err(DispatchError::ArtifactStore)?;

        Ok((data, result.format))
    }

    pub fn queue_depth(&self) -> usize {
        self.queue.depth()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] JobUrlError),
    #[error("queue full")]
    QueueFull,
    #[error("queue closed")]
    QueueClosed,
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("job {0} has no artifact yet")]
    NotReady(JobId),
    #[error("repository: {0}")]
    Repository(RepositoryError),
    #[error("artifact store: {0}")]
    ArtifactStore(ArtifactStoreError),
}

impl From<QueueError> for DispatchError {
    fn from(error: QueueError) -> Self {
        match error {
            QueueError::Full => DispatchError::QueueFull,
            QueueError::Closed => DispatchError::QueueClosed,
        }
    }
}

impl From<RepositoryError> for DispatchError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(id) => DispatchError::NotFound(id),
            other => DispatchError::Repository(other),
        }
    }
}
