//! Logging and tracing initialization.

use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::config::AppConfig;

/// Resolved logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

impl LogSettings {
    /// Take level and format from the merged config, raising the level to
    /// `debug` when `verbose` is set.
    pub fn from_config(config: &AppConfig, verbose: bool) -> Self {
        let level = if verbose {
            "debug".to_string()
        } else {
            config.log_level_or_default().to_string()
        };
        Self {
            level,
            json: config.log_json_or_default(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Output goes to stderr so that
/// command output on stdout stays clean. Calling this twice is harmless.
pub fn init_logging(settings: &LogSettings) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    if settings.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}
