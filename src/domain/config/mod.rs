//! Configuration value objects

mod app_config;

pub use app_config::{AppConfig, LoggingConfig, OverlayBackend, DEFAULT_ASSET_NAME};
