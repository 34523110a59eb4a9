//! XDG config store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, DEFAULT_ASSET_NAME};
use crate::domain::error::ConfigError;

/// Directory name under the XDG config home
const APP_DIR: &str = "share-indicator";

/// XDG-compliant config store
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Create a new XDG config store with default path
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(APP_DIR);

        Self {
            path: config_dir.join("config.toml"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Strip asset used when the config does not name one.
    ///
    /// Lives next to the config file.
    pub fn default_asset_path(&self) -> PathBuf {
        self.path
            .parent()
            .map(|dir| dir.join(DEFAULT_ASSET_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_NAME))
    }

    /// Parse TOML content into AppConfig
    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize AppConfig to TOML
    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            // Return empty config if file doesn't exist
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::to_toml(config)?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        let defaults = AppConfig::defaults();
        self.save(&defaults).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_xdg() {
        let store = XdgConfigStore::new();
        let path = store.path();
        assert!(path.to_string_lossy().contains("share-indicator"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn custom_path() {
        let store = XdgConfigStore::with_path("/custom/path/config.toml");
        assert_eq!(store.path(), PathBuf::from("/custom/path/config.toml"));
    }

    #[test]
    fn default_asset_sits_next_to_config() {
        let store = XdgConfigStore::with_path("/custom/path/config.toml");
        assert_eq!(
            store.default_asset_path(),
            PathBuf::from("/custom/path/line.png")
        );
    }

    #[test]
    fn parse_toml_with_logging_section() {
        let content = r#"
channel = "markers"
border_thickness = 8
backend = "wayland"
work_area = "0,0,2560,1440"

[logging]
level = "debug"
json = true
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.channel.as_deref(), Some("markers"));
        assert_eq!(config.border_thickness, Some(8));
        assert_eq!(config.backend.as_deref(), Some("wayland"));
        assert_eq!(config.work_area.as_deref(), Some("0,0,2560,1440"));
        assert_eq!(config.log_level_or_default(), "debug");
        assert!(config.log_json_or_default());
    }

    #[test]
    fn parse_toml_rejects_wrong_types() {
        let result = XdgConfigStore::parse_toml("border_thickness = \"thick\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn defaults_survive_serialization() {
        let toml = XdgConfigStore::to_toml(&AppConfig::defaults()).unwrap();
        let parsed = XdgConfigStore::parse_toml(&toml).unwrap();

        assert_eq!(parsed.channel_or_default(), "jitsi-screen-sharing-marker");
        assert_eq!(parsed.border_thickness_or_default(), 5);
        assert_eq!(parsed.log_level_or_default(), "info");
    }

    #[tokio::test]
    async fn init_then_init_again_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested/config.toml"));

        assert!(store.load().await.unwrap().channel.is_none());
        store.init().await.unwrap();
        assert!(store.exists());
        assert!(matches!(
            store.init().await,
            Err(ConfigError::AlreadyExists(_))
        ));

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.border_thickness, Some(5));
    }
}
