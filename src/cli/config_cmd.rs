//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, LoggingConfig, OverlayBackend};
use crate::domain::error::ConfigError;
use crate::domain::indicator::DisplayBounds;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS, VALID_LOG_LEVELS};
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

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let mut config = store.load().await?;
    apply_config_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    match config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = config_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate `value` for `key` and store it in `config`
fn apply_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "channel" => {
            if value.trim().is_empty() {
                return Err(invalid("Channel name must not be empty".to_string()));
            }
            config.channel = Some(value.to_string());
        }
        "border_thickness" => {
            let thickness = value
                .parse::<u32>()
                .ok()
                .filter(|t| *t > 0)
                .ok_or_else(|| invalid("Value must be a positive integer".to_string()))?;
            config.border_thickness = Some(thickness);
        }
        "asset" => config.asset = Some(value.to_string()),
        "backend" => {
            let backend = value.parse::<OverlayBackend>().map_err(invalid)?;
            config.backend = Some(backend.to_string());
        }
        "work_area" => {
            let bounds = value
                .parse::<DisplayBounds>()
                .map_err(|e| invalid(e.to_string()))?;
            config.work_area = Some(bounds.to_string());
        }
        "logging.level" => {
            let lower = value.to_lowercase();
            if !VALID_LOG_LEVELS.contains(&lower.as_str()) {
                return Err(invalid(format!(
                    "Invalid value '{}'. Valid options: {}",
                    value,
                    VALID_LOG_LEVELS.join(", ")
                )));
            }
            config.logging.get_or_insert_with(LoggingConfig::default).level = Some(lower);
        }
        "logging.json" => {
            let json = parse_bool(value)
                .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?;
            config.logging.get_or_insert_with(LoggingConfig::default).json = Some(json);
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

/// Stored value of `key` rendered for display
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "channel" => config.channel.clone(),
        "border_thickness" => config.border_thickness.map(|t| t.to_string()),
        "asset" => config.asset.clone(),
        "backend" => config.backend.clone(),
        "work_area" => config.work_area.clone(),
        "logging.level" => config.logging.as_ref().and_then(|l| l.level.clone()),
        "logging.json" => config
            .logging
            .as_ref()
            .and_then(|l| l.json)
            .map(|b| b.to_string()),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
