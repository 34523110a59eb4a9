//! Domain error types

use thiserror::Error;

/// Error when parsing a work-area rectangle
#[derive(Debug, Clone, Error)]
#[error("Invalid work area: \"{input}\". Expected format: X,Y,WIDTH,HEIGHT with non-zero size (e.g., 0,0,1920,1080)")]
pub struct InvalidBoundsError {
    pub input: String,
}

/// Error when decoding or encoding a channel envelope
#[derive(Debug, Clone, Error)]
pub enum EnvelopeError {
    #[error("Malformed envelope: {0}")]
    Malformed(String),

    #[error("Failed to encode envelope: {0}")]
    Encode(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
