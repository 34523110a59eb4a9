//! share-indicator - screen sharing border overlays
//!
//! While the screen is being shared, four thin strips are drawn along the
//! edges of the primary display's work area. A render-side event source
//! opens and closes them over a named channel; closing the host application
//! window tears everything down.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Positions, geometry, overlay lifecycle, channel events, config
//! - **Application**: Indicator manager, coordinator, and port interfaces (traits)
//! - **Infrastructure**: Event bus, display query, overlay backends, config store, logging
//! - **CLI**: Command-line interface, IPC transport, and signal handling
//! - **GUI**: Layer-shell overlay backend (Linux only)

pub mod application;
pub mod cli;
pub mod domain;
#[cfg(target_os = "linux")]
pub mod gui;
pub mod infrastructure;
