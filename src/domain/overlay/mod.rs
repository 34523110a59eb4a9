//! Tracker overlay lifecycle and presentation flags

mod lifecycle;
mod options;

pub use lifecycle::{InvalidOverlayTransition, OverlayLifecycle, OverlayState};
pub use options::OverlayOptions;
