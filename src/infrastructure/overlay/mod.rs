//! Overlay window backends with fallback selection

mod headless;

pub use headless::{HeadlessOverlayFactory, SurfaceInfo};

use crate::application::ports::OverlayWindowFactory;
use crate::domain::config::OverlayBackend;

/// Create the overlay factory for `backend`.
///
/// A native backend that cannot start falls back to headless surfaces with
/// a warning; indicator events keep being handled either way.
pub fn create_overlay_factory(backend: OverlayBackend) -> Box<dyn OverlayWindowFactory> {
    match backend {
        OverlayBackend::Headless => Box::new(HeadlessOverlayFactory::new()),
        OverlayBackend::Wayland => create_wayland_factory(),
    }
}

#[cfg(target_os = "linux")]
fn create_wayland_factory() -> Box<dyn OverlayWindowFactory> {
    match crate::gui::LayerShellOverlayFactory::spawn() {
        Ok(factory) => {
            tracing::info!("Using Wayland layer-shell overlays");
            Box::new(factory)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Layer-shell unavailable, falling back to headless overlays");
            Box::new(HeadlessOverlayFactory::new())
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn create_wayland_factory() -> Box<dyn OverlayWindowFactory> {
    tracing::warn!("Wayland overlays are only supported on Linux, falling back to headless overlays");
    Box::new(HeadlessOverlayFactory::new())
}
