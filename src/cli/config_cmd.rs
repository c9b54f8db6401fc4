//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{validate_api_url, validate_folder, ConflictPolicy};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "api_url" => config.api_url = Some(value.trim().to_string()),
        "api_key" => config.api_key = Some(value.to_string()),
        "vault_name" => config.vault_name = Some(value.trim().to_string()),
        "folder" => config.folder = Some(value.trim().to_string()),
        "notify" => config.notify = Some(parse_bool_for(key, value)?),
        "accept_invalid_certs" => config.accept_invalid_certs = Some(parse_bool_for(key, value)?),
        "on_conflict" => {
            let policy: ConflictPolicy = value.parse()?;
            config.on_conflict = Some(policy.to_string());
        }
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;

    let shown = if key == "api_key" {
        mask_api_key(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;

    let value = match key {
        "api_url" => config.api_url,
        "api_key" => config.api_key.map(|s| mask_api_key(&s)),
        "vault_name" => config.vault_name,
        "folder" => config.folder,
        "notify" => config.notify.map(|b| b.to_string()),
        "accept_invalid_certs" => config.accept_invalid_certs.map(|b| b.to_string()),
        "on_conflict" => config.on_conflict,
        _ => unreachable!(),
    };

    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    let entries: [(&str, Option<String>); 7] = [
        ("api_url", config.api_url),
        ("api_key", config.api_key.map(|s| mask_api_key(&s))),
        ("vault_name", config.vault_name),
        ("folder", config.folder),
        ("notify", config.notify.map(|b| b.to_string())),
        (
            "accept_invalid_certs",
            config.accept_invalid_certs.map(|b| b.to_string()),
        ),
        ("on_conflict", config.on_conflict),
    ];

    for (key, value) in entries {
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "api_url" => validate_api_url(value)?,
        "folder" => validate_folder(value)?,
        "vault_name" => {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Vault name must not be empty".to_string(),
                });
            }
        }
        "notify" | "accept_invalid_certs" => {
            parse_bool_for(key, value)?;
        }
        "on_conflict" => {
            value.parse::<ConflictPolicy>()?;
        }
        _ => {} // api_key accepts any string
    }
    Ok(())
}

fn parse_bool_for(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    })
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
