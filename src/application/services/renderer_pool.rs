use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::ports::{ArtifactStore, JobRepository, Renderer};

use super::capture_worker::CaptureWorker;
use super::pool_config::PoolConfig;
use super::work_queue::WorkQueue;

/// Fixed set of capture workers pulling from one shared [`WorkQueue`].
pub struct RendererPool {
    queue: WorkQueue,
    job_repository: Arc<dyn JobRepository>,
    renderer: Arc<dyn Renderer>,
    artifact_store: Arc<dyn ArtifactStore>,
    config: PoolConfig,
}

/// Running pool. Dropping it leaves the workers running; call [`PoolHandle::shutdown`].
pub struct PoolHandle {
    queue: WorkQueue,
    slots: Vec<JoinHandle<()>>,
}

impl RendererPool {
    pub fn new(
        queue: WorkQueue,
        job_repository: Arc<dyn JobRepository>,
        renderer: Arc<dyn Renderer>,
        artifact_store: Arc<dyn ArtifactStore>,
        config: PoolConfig,
    ) -> Self {
        Self {
            queue,
            job_repository,
            renderer,
            artifact_store,
            config,
        }
    }

    pub fn start(self) -> PoolHandle {
        let workers = self.config.workers.max(1);
        let pool = Arc::new(self);

        let slots = (0..workers)
            .map(|index| tokio::spawn(Arc::clone(&pool).supervise_slot(index)))
            .collect();

        tracing::info!(
            workers,
            max_attempts = pool.config.max_attempts,
            capture_timeout_ms = pool.config.capture_timeout.as_millis() as u64,
            "Renderer pool started"
        );

        PoolHandle {
            queue: pool.queue.clone(),
            slots,
        }
    }

    /// Keeps one worker alive in slot `index`, replacing it if it dies before the queue
    /// has drained.
    async fn supervise_slot(self: Arc<Self>, index: usize) {
        loop {
            let worker = CaptureWorker::new(
                index,
                self.queue.clone(),
                Arc::clone(&self.job_repository),
                Arc::clone(&self.renderer),
                Arc::clone(&self.artifact_store),
                self.config.clone(),
            );

            match tokio::spawn(worker.run()).await {
                Ok(()) => break,
                Err(e) if e.is_panic() => {
                    tracing::error!(worker = index, error = %e, "Capture worker died, replacing");
                }
                Err(e) => {
                    tracing::warn!(worker = index, error = %e, "Capture worker ended abnormally");
                    break;
                }
            }
        }
    }
}

impl PoolHandle {
    pub fn worker_count(&self) -> usize {
        self.slots.len()
    }

    /// Stops accepting submissions, then waits for the workers to drain the queue.
    pub async fn shutdown(self) {
        self.queue.close();
        for result in futures::future::join_all(self.slots).await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Worker slot ended with error");
            }
        }
        tracing::info!("Renderer pool stopped");
    }
}
