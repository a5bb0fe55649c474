use crate::domain::{JobId, TransitionError};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("invalid transition for job {id}: {source}")]
    InvalidTransition {
        id: JobId,
        #[source]
        source: TransitionError,
    },
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}
