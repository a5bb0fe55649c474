use std::fmt;

use super::{ImageFormat, JobId};

/// Storage key of a rendered artifact: `{job_uuid}/screenshot.{ext}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactRef(String);

impl ArtifactRef {
    pub fn new(job_id: &JobId, format: ImageFormat) -> Self {
        Self(format!(
            "{}/screenshot.{}",
            job_id.as_uuid(),
            format.extension()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
