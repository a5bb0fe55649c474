mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LoggingSettings, PoolSettings, RendererProviderSetting, RendererSettings, RetentionSettings,
    ServerSettings, Settings, SettingsError, StorageProviderSetting, StorageSettings,
};
