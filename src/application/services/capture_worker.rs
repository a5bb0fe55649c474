use std::sync::Arc;

use tracing::Instrument;

use crate::application::ports::{
    ArtifactStore, CaptureError, CaptureRequest, JobRepository, Renderer, RepositoryError,
};
use crate::domain::{CaptureResult, FailureKind, Job, JobError, JobId, JobTransition};
use crate::infrastructure::observability::redact_url;

use super::pool_config::PoolConfig;
use super::work_queue::{CaptureMessage, WorkQueue};

/// Why one attempt did not produce an artifact, and whether another attempt may help.
struct AttemptFailure {
    error: JobError,
    transient: bool,
}

impl From<CaptureError> for AttemptFailure {
    fn from(error: CaptureError) -> Self {
        let kind = error.kind();
        Self {
            error: JobError::new(kind, error.to_string()),
            transient: kind.is_transient(),
        }
    }
}

pub struct CaptureWorker {
    index: usize,
    queue: WorkQueue,
    job_repository: Arc<dyn JobRepository>,
    renderer: Arc<dyn Renderer>,
    artifact_store: Arc<dyn ArtifactStore>,
    config: PoolConfig,
}

impl CaptureWorker {
    pub fn new(
        index: usize,
        queue: WorkQueue,
        job_repository: Arc<dyn JobRepository>,
        renderer: Arc<dyn Renderer>,
        artifact_store: Arc<dyn ArtifactStore>,
        config: PoolConfig,
    ) -> Self {
        Self {
            index,
            queue,
            job_repository,
            renderer,
            artifact_store,
            config,
        }
    }

    pub async fn run(self) {
        tracing::debug!(worker = self.index, "Capture worker started");
        while let Some(msg) = self.queue.next().await {
            let job_id = msg.job_id;
            if let Err(e) = self.process_job(msg).await {
                tracing::error!(worker = self.index, job_id = %job_id, error = %e, "Capture job failed");
            }
        }
        tracing::debug!(worker = self.index, "Capture worker stopped: queue closed");
    }

    async fn process_job(&self, msg: CaptureMessage) -> Result<(), CaptureWorkerError> {
        let job = self.transition(msg.job_id, JobTransition::Start).await?;

        let span = tracing::info_span!(
            "capture_job",
            worker = self.index,
            job_id = %job.id,
            attempt = job.attempt,
            url = %redact_url(job.url.as_url()),
        );

        self.finish_attempt(msg, &job).instrument(span).await
    }

    async fn finish_attempt(&self, msg: CaptureMessage, job: &Job) -> Result<(), CaptureWorkerError> {
        match self.attempt_capture(job).await {
            Ok(result) => {
                let size_bytes = result.size_bytes;
                let duration_ms = result.duration_ms;
                self.transition(job.id, JobTransition::Complete(result))
                    .await?;
                tracing::info!(size_bytes, duration_ms, "Capture completed");
            }
            Err(failure) if failure.transient && job.attempt < self.config.max_attempts => {
                self.transition(job.id, JobTransition::Retry).await?;
                let delay = self.config.retry_delay(job.attempt);
                tracing::warn!(
                    error = %failure.error.message,
                    kind = %failure.error.kind,
                    retry_in_ms = delay.as_millis() as u64,
                    "Transient capture failure, requeueing"
                );
                self.queue.requeue(msg, delay);
            }
            Err(failure) => {
                tracing::warn!(
                    error = %failure.error.message,
                    kind = %failure.error.kind,
                    transient = failure.transient,
                    "Capture failed permanently"
                );
                self.transition(job.id, JobTransition::Fail(failure.error))
                    .await?;
            }
        }
        Ok(())
    }

    /// Runs capture, size check and upload in their own task, so a panic anywhere in the
    /// attempt comes back as a failure on this job instead of taking the worker down.
    async fn attempt_capture(&self, job: &Job) -> Result<CaptureResult, AttemptFailure> {
        let attempt = run_attempt(
            job.id,
            CaptureRequest {
                url: job.url.clone(),
                viewport: self.config.viewport,
                format: self.config.format,
                timeout: self.config.capture_timeout,
            },
            Arc::clone(&self.renderer),
            Arc::clone(&self.artifact_store),
            self.config.max_artifact_bytes,
        );

        match tokio::spawn(attempt).await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                tracing::error!(error = %join_error, "Capture attempt crashed");
                Err(AttemptFailure {
                    error: JobError::new(FailureKind::RenderError, "renderer crashed"),
                    transient: true,
                })
            }
        }
    }

    async fn transition(
        &self,
        job_id: JobId,
        transition: JobTransition,
    ) -> Result<Job, CaptureWorkerError> {
        tracing::debug!(transition = transition.name(), "Job status transition");
        self.job_repository
            .update(job_id, transition)
            .await
            .map_err(CaptureWorkerError::Repository)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureWorkerError {
    #[error("repository: {0}")]
    Repository(RepositoryError),
}

async fn run_attempt(
    job_id: JobId,
    request: CaptureRequest,
    renderer: Arc<dyn Renderer>,
    artifact_store: Arc<dyn ArtifactStore>,
    max_artifact_bytes: u64,
) -> Result<CaptureResult, AttemptFailure> {
    let timeout = request.timeout;
    let started = tokio::time::Instant::now();

    let screenshot = tokio::time::timeout(timeout, renderer.capture(&request))
        .await
        .map_err(|_elapsed| CaptureError::Timeout(timeout))??;
    let duration_ms = started.elapsed().as_millis() as u64;

    let size_bytes = screenshot.size_bytes();
    if size_bytes > max_artifact_bytes {
        return Err(CaptureError::TooLarge {
            size: size_bytes,
            limit: max_artifact_bytes,
        }
        .into());
    }

    let artifact = artifact_store
        .put(job_id, &screenshot)
        .await
        .map_err(|e| AttemptFailure {
            error: JobError::new(FailureKind::StorageError, e.to_string()),
            transient: true,
        })?;

    Ok(CaptureResult {
        artifact,
        size_bytes,
        width: screenshot.width,
        height: screenshot.height,
        format: screenshot.format,
        duration_ms,
    })
}
