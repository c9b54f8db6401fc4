//! Connection settings for the note service

use reqwest::Url;

use super::app_config::AppConfig;
use crate::domain::error::ConfigError;

/// Settings a note client is constructed with.
/// Built fresh from the stored configuration on each use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service address without a trailing slash
    pub base_address: String,
    pub vault_name: String,
    pub credential: Option<String>,
    /// Folder inside the vault that notes are written to
    pub folder: Option<String>,
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Create a config with just an address and vault name
    pub fn new(base_address: impl AsRef<str>, vault_name: impl Into<String>) -> Self {
        Self {
            base_address: base_address.as_ref().trim().trim_end_matches('/').to_string(),
            vault_name: vault_name.into(),
            credential: None,
            folder: None,
            accept_invalid_certs: false,
        }
    }

    /// Set the bearer credential. Blank credentials are treated as absent.
    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential.filter(|c| !c.trim().is_empty());
        self
    }

    /// Set the target folder. Blank folders are treated as absent.
    pub fn with_folder(mut self, folder: Option<String>) -> Self {
        self.folder = folder.filter(|f| !f.trim().trim_matches('/').is_empty());
        self
    }

    /// Build from merged application config
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let api_url = config.api_url_or_default();
        validate_api_url(api_url)?;

        let vault_name = config
            .vault_name
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::Missing("vault_name".to_string()))?;

        if let Some(folder) = config.folder.as_deref() {
            validate_folder(folder)?;
        }

        let mut client = Self::new(api_url, vault_name)
            .with_credential(config.api_key.clone())
            .with_folder(config.folder.clone());
        client.accept_invalid_certs = config.accept_invalid_certs_or_default();

        Ok(client)
    }
}

/// Check that a note folder has no `.` or `..` segments
pub fn validate_folder(value: &str) -> Result<(), ConfigError> {
    if value.split('/').any(|segment| matches!(segment.trim(), "." | "..")) {
        return Err(ConfigError::ValidationError {
            key: "folder".to_string(),
            message: "Folder must not contain \".\" or \"..\" segments".to_string(),
        });
    }
    Ok(())
}

/// Check that a service address is an absolute http(s) URL
pub fn validate_api_url(value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: "api_url".to_string(),
        message,
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(format!("{} ({})", e, value)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "Unsupported scheme '{}'. Use http or https",
            url.scheme()
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("URL must not have a query or fragment".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash() {
        let config = ClientConfig::new("http://localhost:27123/", "Main");
        assert_eq!(config.base_address, "http://localhost:27123");
    }

    #[test]
    fn blank_credential_is_absent() {
        let config = ClientConfig::new("http://localhost:27123", "Main")
            .with_credential(Some("  ".to_string()));
        assert!(config.credential.is_none());
    }

    #[test]
    fn from_app_config_requires_vault() {
        let err = ClientConfig::from_app_config(&AppConfig::defaults()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(key) if key == "vault_name"));
    }

    #[test]
    fn from_app_config_uses_defaults() {
        let app = AppConfig {
            vault_name: Some(" Main ".to_string()),
            api_key: Some("secret".to_string()),
            folder: Some("YouTube Notes".to_string()),
            ..AppConfig::defaults()
        };

        let config = ClientConfig::from_app_config(&app).unwrap();
        assert_eq!(config.base_address, "http://localhost:27123");
        assert_eq!(config.vault_name, "Main");
        assert_eq!(config.credential.as_deref(), Some("secret"));
        assert_eq!(config.folder.as_deref(), Some("YouTube Notes"));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn from_app_config_rejects_dot_folder() {
        let app = AppConfig {
            vault_name: Some("Main".to_string()),
            folder: Some("Notes/../Private".to_string()),
            ..AppConfig::defaults()
        };

        let err = ClientConfig::from_app_config(&app).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { key, .. } if key == "folder"));
        assert!(validate_folder("YouTube Notes/2024").is_ok());
    }

    #[test]
    fn validate_api_url_accepts_http_and_https() {
        assert!(validate_api_url("http://localhost:27123").is_ok());
        assert!(validate_api_url("https://127.0.0.1:27124/").is_ok());
    }

    #[test]
    fn validate_api_url_rejects_bad_values() {
        assert!(validate_api_url("localhost:27123").is_err());
        assert!(validate_api_url("ftp://localhost").is_err());
        assert!(validate_api_url("http://localhost?x=1").is_err());
        assert!(validate_api_url("not a url").is_err());
    }
}
