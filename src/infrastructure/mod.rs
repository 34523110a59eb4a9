//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the in-process
//! event bus, display queries, overlay backends, config storage and logging.

pub mod channel;
pub mod config;
pub mod display;
pub mod logging;
pub mod overlay;

// Re-export adapters
pub use channel::EventBus;
pub use config::XdgConfigStore;
pub use display::StaticDisplay;
pub use logging::{init_logging, LogSettings};
pub use overlay::{create_overlay_factory, HeadlessOverlayFactory, SurfaceInfo};
