mod artifact_store;
mod job_repository;
mod renderer;
mod repository_error;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use job_repository::{JobRepository, SweepReport};
pub use renderer::{CaptureError, CaptureRequest, Renderer, Screenshot};
pub use repository_error::RepositoryError;
