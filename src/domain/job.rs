use chrono::{DateTime, Utc};

use super::{ArtifactRef, ImageFormat, JobError, JobId, JobStatus, JobTransition, JobUrl};

/// Outcome of a successful capture, stored on a `Done` job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    pub artifact: ArtifactRef,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub url: JobUrl,
    pub status: JobStatus,
    pub attempt: u32,
    pub result: Option<CaptureResult>,
    pub error: Option<JobError>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {transition} a job in state {from}")]
pub struct TransitionError {
    pub from: JobStatus,
    pub transition: &'static str,
}

impl Job {
    pub fn new(url: JobUrl) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            url,
            status: JobStatus::Queued,
            attempt: 0,
            result: None,
            error: None,
            created_at: now,
            started_at: None,
            finished_at: None,
            updated_at: now,
        }
    }

    /// Applies one edge of the lifecycle:
    /// `Queued -> Running -> {Done, Failed}`, plus `Running -> Queued` for retries
    /// and `Queued -> Failed` for jobs that can no longer be dispatched.
    pub fn apply(
        &mut self,
        transition: JobTransition,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        let from = self.status;
        let name = transition.name();

        match (from, transition) {
            (JobStatus::Queued, JobTransition::Start) => {
                self.status = JobStatus::Running;
                self.attempt += 1;
                self.started_at.get_or_insert(now);
            }
            (JobStatus::Running, JobTransition::Complete(result)) => {
                self.status = JobStatus::Done;
                self.result = Some(result);
                self.finished_at = Some(now);
            }
            (JobStatus::Running, JobTransition::Retry) => {
                self.status = JobStatus::Queued;
            }
            (JobStatus::Running | JobStatus::Queued, JobTransition::Fail(error)) => {
                self.status = JobStatus::Failed;
                self.error = Some(error);
                self.finished_at = Some(now);
            }
            _ => {
                return Err(TransitionError {
                    from,
                    transition: name,
                });
            }
        }

        self.updated_at = now;
        Ok(())
    }

    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.finished_at.is_some_and(|finished| finished < cutoff)
    }
}
