use std::time::Duration;

use crate::domain::{ImageFormat, Viewport};

const MAX_RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// Runtime policy of the renderer pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub workers: usize,
    pub capture_timeout: Duration,
    pub max_attempts: u32,
    pub retry_backoff: Duration,
    pub viewport: Viewport,
    pub format: ImageFormat,
    pub max_artifact_bytes: u64,
}

impl PoolConfig {
    /// Exponential backoff before attempt `attempt + 1`, capped at 30 seconds.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        if self.retry_backoff.is_zero() {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.retry_backoff
            .saturating_mul(factor)
            .min(MAX_RETRY_BACKOFF)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            capture_timeout: Duration::from_secs(30),
            max_attempts: 3,
            retry_backoff: Duration::from_millis(500),
            viewport: Viewport::default(),
            format: ImageFormat::Png,
            max_artifact_bytes: 10 * 1024 * 1024,
        }
    }
}
