//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted settings (service address, API key, vault name, ...)
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored settings.
    /// A missing file yields an empty config rather than an error.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist the settings, replacing what was stored
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the settings file
    fn path(&self) -> PathBuf;

    /// Whether the settings file exists
    fn exists(&self) -> bool;

    /// Write a settings file with defaults.
    /// Fails if one already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
