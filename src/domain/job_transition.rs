use super::{CaptureResult, JobError};

/// A requested state change for a stored job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobTransition {
    Start,
    Complete(CaptureResult),
    Retry,
    Fail(JobError),
}

impl JobTransition {
    pub fn name(&self) -> &'static str {
        match self {
            JobTransition::Start => "start",
            JobTransition::Complete(_) => "complete",
            JobTransition::Retry => "retry",
            JobTransition::Fail(_) => "fail",
        }
    }
}
