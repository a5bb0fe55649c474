use async_trait::async_trait;
use chrono::Duration;

use crate::domain::{ArtifactRef, Job, JobId, JobTransition};

use super::RepositoryError;

/// What a retention sweep removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub removed: usize,
    pub artifacts: Vec<ArtifactRef>,
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    /// Returns a snapshot; later transitions are not reflected in it.
    async fn get_by_id(&self, id: JobId) -> Result<Job, RepositoryError>;

    async fn update(&self, id: JobId, transition: JobTransition) -> Result<Job, RepositoryError>;

    /// Removes `Done`/`Failed` jobs that finished more than `max_age` ago.
    async fn sweep(&self, max_age: Duration) -> Result<SweepReport, RepositoryError>;
}
