use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::application::ports::{ArtifactStore, JobRepository, RepositoryError, SweepReport};

/// Periodically drops finished jobs past their retention age, along with their artifacts.
pub struct RetentionSweeper {
    job_repository: Arc<dyn JobRepository>,
    artifact_store: Arc<dyn ArtifactStore>,
    interval: Duration,
    max_age: chrono::Duration,
}

impl RetentionSweeper {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        artifact_store: Arc<dyn ArtifactStore>,
        interval: Duration,
        max_age: chrono::Duration,
    ) -> Self {
        Self {
            job_repository,
            artifact_store,
            interval,
            max_age,
        }
    }

    pub async fn sweep_once(&self) -> Result<SweepReport, RepositoryError> {
        let report = self.job_repository.sweep(self.max_age).await?;

        let deletions = report
            .artifacts
            .iter()
            .map(|artifact| self.artifact_store.delete(artifact));
        for (artifact, result) in report
            .artifacts
            .iter()
            .zip(futures::future::join_all(deletions).await)
        {
            if let Err(e) = result {
                tracing::warn!(error = %e, artifact = %artifact, "Failed to delete expired artifact");
            }
        }

        if report.removed > 0 {
            tracing::info!(
                removed = report.removed,
                artifacts = report.artifacts.len(),
                "Expired jobs swept"
            );
        }
        Ok(report)
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::error!(error = %e, "Retention sweep failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("Retention sweeper stopped");
    }
}
