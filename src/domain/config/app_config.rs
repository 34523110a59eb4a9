//! Application configuration value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::event::SCREEN_SHARE_EVENTS_CHANNEL;
use crate::domain::indicator::{DisplayBounds, DEFAULT_BORDER_THICKNESS};

/// File name of the strip asset looked up next to the config file
pub const DEFAULT_ASSET_NAME: &str = "line.png";

/// Overlay window backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayBackend {
    /// In-process surfaces, no native windows
    #[default]
    Headless,
    /// wlr-layer-shell surfaces (Linux only)
    Wayland,
}

impl OverlayBackend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Headless => "headless",
            Self::Wayland => "wayland",
        }
    }
}

impl fmt::Display for OverlayBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OverlayBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "headless" => Ok(Self::Headless),
            "wayland" => Ok(Self::Wayland),
            other => Err(format!(
                "Invalid backend \"{}\". Valid backends are: headless, wayland",
                other
            )),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub channel: Option<String>,
    pub border_thickness: Option<u32>,
    pub asset: Option<String>,
    pub backend: Option<String>,
    pub work_area: Option<String>,
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            channel: Some(SCREEN_SHARE_EVENTS_CHANNEL.to_string()),
            border_thickness: Some(DEFAULT_BORDER_THICKNESS),
            asset: None,
            backend: Some(OverlayBackend::default().to_string()),
            work_area: Some(DisplayBounds::default().to_string()),
            logging: Some(LoggingConfig {
                level: Some("info".to_string()),
                json: Some(false),
            }),
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
            channel: other.channel.or(self.channel),
            border_thickness: other.border_thickness.or(self.border_thickness),
            asset: other.asset.or(self.asset),
            backend: other.backend.or(self.backend),
            work_area: other.work_area.or(self.work_area),
            logging: Self::merge_logging_config(self.logging, other.logging),
        }
    }

    /// Merge logging sections
    fn merge_logging_config(
        base: Option<LoggingConfig>,
        other: Option<LoggingConfig>,
    ) -> Option<LoggingConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(LoggingConfig {
                level: o.level.or(b.level),
                json: o.json.or(b.json),
            }),
        }
    }

    /// Get channel name, or the well-known screen-share channel
    pub fn channel_or_default(&self) -> &str {
        self.channel.as_deref().unwrap_or(SCREEN_SHARE_EVENTS_CHANNEL)
    }

    /// Get border thickness, or default if not set/zero
    pub fn border_thickness_or_default(&self) -> u32 {
        self.border_thickness
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_BORDER_THICKNESS)
    }

    /// Get backend as parsed OverlayBackend, or default if not set/invalid
    pub fn backend_or_default(&self) -> OverlayBackend {
        self.backend
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get work area as parsed DisplayBounds, or default if not set/invalid
    pub fn work_area_or_default(&self) -> DisplayBounds {
        self.work_area
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get log level, or "info" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    /// Get JSON log output setting, or false if not set
    pub fn log_json_or_default(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.channel.as_deref(), Some("jitsi-screen-sharing-marker"));
        assert_eq!(config.border_thickness, Some(5));
        assert!(config.asset.is_none());
        assert_eq!(config.backend.as_deref(), Some("headless"));
        assert_eq!(config.work_area.as_deref(), Some("0,0,1920,1080"));
        let logging = config.logging.as_ref().unwrap();
        assert_eq!(logging.level.as_deref(), Some("info"));
        assert_eq!(logging.json, Some(false));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.channel.is_none());
        assert!(config.border_thickness.is_none());
        assert!(config.backend.is_none());
        assert!(config.work_area.is_none());
        assert!(config.logging.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            channel: Some("base".to_string()),
            border_thickness: Some(3),
            backend: Some("wayland".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            channel: Some("other".to_string()),
            border_thickness: None, // Should not override
            backend: Some("headless".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.channel.as_deref(), Some("other"));
        assert_eq!(merged.border_thickness, Some(3)); // Kept from base
        assert_eq!(merged.backend_or_default(), OverlayBackend::Headless);
    }

    #[test]
    fn merge_logging_sections() {
        let base = AppConfig {
            logging: Some(LoggingConfig {
                level: Some("debug".to_string()),
                json: Some(true),
            }),
            ..Default::default()
        };
        let other = AppConfig {
            logging: Some(LoggingConfig {
                level: Some("warn".to_string()),
                json: None,
            }),
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.log_level_or_default(), "warn");
        assert!(merged.log_json_or_default());
    }

    #[test]
    fn thickness_zero_falls_back() {
        let config = AppConfig {
            border_thickness: Some(0),
            ..Default::default()
        };
        assert_eq!(config.border_thickness_or_default(), 5);
    }

    #[test]
    fn work_area_or_default_parses() {
        let config = AppConfig {
            work_area: Some("0,25,2560,1415".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.work_area_or_default(),
            DisplayBounds::new(0, 25, 2560, 1415)
        );
    }

    #[test]
    fn work_area_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            work_area: Some("huge".to_string()),
            ..Default::default()
        };
        assert_eq!(config.work_area_or_default(), DisplayBounds::default());
    }

    #[test]
    fn backend_parsing() {
        assert_eq!("Wayland".parse::<OverlayBackend>(), Ok(OverlayBackend::Wayland));
        assert_eq!("headless".parse::<OverlayBackend>(), Ok(OverlayBackend::Headless));
        assert!("x11".parse::<OverlayBackend>().is_err());
    }

    #[test]
    fn empty_config_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.channel_or_default(), SCREEN_SHARE_EVENTS_CHANNEL);
        assert_eq!(config.backend_or_default(), OverlayBackend::Headless);
        assert_eq!(config.log_level_or_default(), "info");
        assert!(!config.log_json_or_default());
    }
}
