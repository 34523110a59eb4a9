//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod channel;
pub mod config;
pub mod display;
pub mod overlay;
pub mod window;

// Re-export common types
pub use channel::{EventChannel, ListenerId, Subscription};
pub use config::ConfigStore;
pub use display::{DisplayError, DisplayQuery};
pub use overlay::{
    OverlayError, OverlayId, OverlayNotice, OverlayNotifier, OverlaySpec, OverlayWindow,
    OverlayWindowFactory,
};
pub use window::{ApplicationWindow, WindowClosed};
