//! Application configuration value object

use serde::{Deserialize, Serialize};

use super::conflict::ConflictPolicy;

/// Default address of the Local REST API plugin (insecure HTTP port)
pub const DEFAULT_API_URL: &str = "http://localhost:27123";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub vault_name: Option<String>,
    pub folder: Option<String>,
    pub notify: Option<bool>,
    pub accept_invalid_certs: Option<bool>,
    pub on_conflict: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_url: Some(DEFAULT_API_URL.to_string()),
            api_key: None,
            vault_name: None,
            folder: None,
            notify: Some(false),
            accept_invalid_certs: Some(false),
            on_conflict: Some(ConflictPolicy::default().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_url: other.api_url.or(self.api_url),
            api_key: other.api_key.or(self.api_key),
            vault_name: other.vault_name.or(self.vault_name),
            folder: other.folder.or(self.folder),
            notify: other.notify.or(self.notify),
            accept_invalid_certs: other.accept_invalid_certs.or(self.accept_invalid_certs),
            on_conflict: other.on_conflict.or(self.on_conflict),
        }
    }

    /// Get the API URL, or the plugin default if not set
    pub fn api_url_or_default(&self) -> &str {
        self.api_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get certificate leniency, or false if not set
    pub fn accept_invalid_certs_or_default(&self) -> bool {
        self.accept_invalid_certs.unwrap_or(false)
    }

    /// Get conflict policy as parsed value, or default if not set/invalid
    pub fn on_conflict_or_default(&self) -> ConflictPolicy {
        self.on_conflict
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}
