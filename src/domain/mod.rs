//! Domain layer - Core indicator logic
//!
//! Contains value objects, the overlay lifecycle, channel events and domain
//! errors. This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod event;
pub mod indicator;
pub mod overlay;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use event::{ChannelEnvelope, ScreenShareEvent, SCREEN_SHARE_EVENTS_CHANNEL};
pub use indicator::{DisplayBounds, IndicatorPosition, IndicatorSet, OverlayGeometry};
pub use overlay::{OverlayLifecycle, OverlayOptions, OverlayState};
