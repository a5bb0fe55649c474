mod artifact_ref;
mod image_format;
mod job;
mod job_error;
mod job_id;
mod job_status;
mod job_transition;
mod job_url;

pub use artifact_ref::ArtifactRef;
pub use image_format::{ImageFormat, Viewport};
pub use job::{CaptureResult, Job, TransitionError};
pub use job_error::{FailureKind, JobError};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use job_transition::JobTransition;
pub use job_url::{JobUrl, JobUrlError};
