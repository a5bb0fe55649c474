use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::instrument;

use crate::application::ports::{JobRepository, RepositoryError, SweepReport};
use crate::domain::{Job, JobId, JobTransition};

/// Job store backed by a sharded concurrent map. Each operation locks only the shard
/// holding its record, so unrelated jobs do not contend.
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: DashMap<JobId, Job>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        match self.jobs.entry(job.id) {
            Entry::Occupied(_) => Err(RepositoryError::ConstraintViolation(format!(
                "job {} already exists",
                job.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(job.clone());
                Ok(())
            }
        }
    }

    async fn get_by_id(&self, id: JobId) -> Result<Job, RepositoryError> {
        self.jobs
            .get(&id)
            .map(|job| job.value().clone())
            .ok_or(RepositoryError::NotFound(id))
    }

    #[instrument(skip(self, transition), fields(job_id = %id, transition = transition.name()))]
    async fn update(&self, id: JobId, transition: JobTransition) -> Result<Job, RepositoryError> {
        let mut job = self
            .jobs
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;

        job.apply(transition, Utc::now())
            .map_err(|source| RepositoryError::InvalidTransition { id, source })?;

        Ok(job.value().clone())
    }

    #[instrument(skip(self))]
    async fn sweep(&self, max_age: Duration) -> Result<SweepReport, RepositoryError> {
        let cutoff = Utc::now() - max_age;
        let mut report = SweepReport::default();

        self.jobs.retain(|_, job| {
            let expired = job.status.is_terminal() && job.is_older_than(cutoff);
            if expired {
                report.removed += 1;
                if let Some(result) = &job.result {
                    report.artifacts.push(result.artifact.clone());
                }
            }
            !expired
        });

        Ok(report)
    }
}
