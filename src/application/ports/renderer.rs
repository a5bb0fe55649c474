use std::time::Duration;

use crate::domain::{FailureKind, ImageFormat, JobUrl, Viewport};

#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub url: JobUrl,
    pub viewport: Viewport,
    pub format: ImageFormat,
    pub timeout: Duration,
}

/// Encoded image produced by a renderer.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl Screenshot {
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Renders one page per call. Implementations must not share engine state between
/// concurrent calls.
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    async fn capture(&self, request: &CaptureRequest) -> Result<Screenshot, CaptureError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptureError {
    #[error("capture timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("render error: {0}")]
    Render(String),
    #[error("artifact too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl CaptureError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CaptureError::Timeout(_) => FailureKind::Timeout,
            CaptureError::Network(_) => FailureKind::NetworkError,
            CaptureError::Render(_) => FailureKind::RenderError,
            CaptureError::TooLarge { .. } => FailureKind::TooLarge,
            CaptureError::InvalidUrl(_) => FailureKind::InvalidUrl,
        }
    }
}
