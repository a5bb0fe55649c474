use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

use crate::application::services::PoolConfig;
use crate::domain::{ImageFormat, Viewport};

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub pool: PoolSettings,
    pub renderer: RendererSettings,
    pub storage: StorageSettings,
    pub retention: RetentionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolSettings {
    pub workers: usize,
    pub capture_timeout_ms: u64,
    pub max_attempts: u32,
    pub max_queue_depth: usize,
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RendererSettings {
    pub provider: RendererProviderSetting,
    pub chrome_path: String,
    #[serde(default)]
    pub chrome_args: Vec<String>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub format: ImageFormat,
    pub max_artifact_bytes: u64,
    pub mock_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererProviderSetting {
    Chrome,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetentionSettings {
    pub sweep_interval_secs: u64,
    pub max_age_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Settings {
    /// Defaults, then `appsettings.{environment}.toml` if present, then
    /// `APP__SECTION__KEY` environment variables.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let builder = defaults()?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("renderer.chrome_args"),
            );

        Self::build(builder)
    }

    /// Built-in defaults only.
    pub fn defaults() -> Result<Self, SettingsError> {
        Self::build(defaults()?)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |key: &'static str, reason: &str| {
            Err(SettingsError::Invalid {
                key,
                reason: reason.to_string(),
            })
        };

        if self.pool.workers == 0 {
            return invalid("pool.workers", "must be at least 1");
        }
        if self.pool.max_attempts == 0 {
            return invalid("pool.max_attempts", "must be at least 1");
        }
        if self.pool.max_queue_depth == 0 {
            return invalid("pool.max_queue_depth", "must be at least 1");
        }
        if self.pool.capture_timeout_ms == 0 {
            return invalid("pool.capture_timeout_ms", "must be greater than 0");
        }
        if self.renderer.viewport_width == 0 || self.renderer.viewport_height == 0 {
            return invalid("renderer.viewport", "width and height must be non-zero");
        }
        if self.retention.sweep_interval_secs == 0 {
            return invalid("retention.sweep_interval_secs", "must be greater than 0");
        }
        Ok(())
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            workers: self.pool.workers,
            capture_timeout: Duration::from_millis(self.pool.capture_timeout_ms),
            max_attempts: self.pool.max_attempts,
            retry_backoff: Duration::from_millis(self.pool.retry_backoff_ms),
            viewport: Viewport {
                width: self.renderer.viewport_width,
                height: self.renderer.viewport_height,
            },
            format: self.renderer.format,
            max_artifact_bytes: self.renderer.max_artifact_bytes,
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.retention.sweep_interval_secs)
    }

    pub fn max_job_age(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.retention.max_age_secs.min(i64::MAX as u64) as i64)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080_i64)?
        .set_default("pool.workers", 4_i64)?
        .set_default("pool.capture_timeout_ms", 30_000_i64)?
        .set_default("pool.max_attempts", 3_i64)?
        .set_default("pool.max_queue_depth", 1024_i64)?
        .set_default("pool.retry_backoff_ms", 500_i64)?
        .set_default("renderer.provider", "chrome")?
        .set_default("renderer.chrome_path", "chromium")?
        .set_default("renderer.viewport_width", 1280_i64)?
        .set_default("renderer.viewport_height", 800_i64)?
        .set_default("renderer.format", "png")?
        .set_default("renderer.max_artifact_bytes", 10_485_760_i64)?
        .set_default("renderer.mock_delay_ms", 10_i64)?
        .set_default("storage.provider", "local")?
        .set_default("storage.local_path", "./data/artifacts")?
        .set_default("retention.sweep_interval_secs", 300_i64)?
        .set_default("retention.max_age_secs", 86_400_i64)?
        .set_default("logging.level", "info")?
        .set_default("logging.enable_json", false)
}
