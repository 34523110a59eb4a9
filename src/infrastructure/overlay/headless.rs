//! In-process overlay backend
//!
//! Keeps a registry of live surfaces instead of mapping native windows.
//! Used when no compositor is available and by tests.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::application::ports::{
    OverlayError, OverlayId, OverlayNotifier, OverlaySpec, OverlayWindow, OverlayWindowFactory,
};
use crate::domain::indicator::{IndicatorPosition, OverlayGeometry};

/// Read-only view of one headless surface
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceInfo {
    pub id: OverlayId,
    pub position: IndicatorPosition,
    pub geometry: OverlayGeometry,
    pub asset: PathBuf,
    pub visible: bool,
}

struct Surface {
    info: SurfaceInfo,
    notifier: OverlayNotifier,
}

type Registry = Arc<Mutex<BTreeMap<OverlayId, Surface>>>;

/// Overlay factory backed by an in-memory surface registry
#[derive(Clone, Default)]
pub struct HeadlessOverlayFactory {
    surfaces: Registry,
    defer_ready: bool,
}

impl HeadlessOverlayFactory {
    /// Surfaces report ready as soon as they are created
    pub fn new() -> Self {
        Self::default()
    }

    /// Surfaces stay constructing until [`Self::signal_ready`] is called
    pub fn deferred() -> Self {
        Self {
            surfaces: Registry::default(),
            defer_ready: true,
        }
    }

    /// Snapshot of every surface that has not been destroyed, ordered by id
    pub fn live_surfaces(&self) -> Vec<SurfaceInfo> {
        self.lock().values().map(|s| s.info.clone()).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.lock().values().filter(|s| s.info.visible).count()
    }

    /// Report ready for every live surface at `position`.
    ///
    /// # Returns
    /// The number of notices sent
    pub fn signal_ready(&self, position: IndicatorPosition) -> usize {
        let surfaces = self.lock();
        surfaces
            .values()
            .filter(|s| s.info.position == position)
            .inspect(|s| s.notifier.ready())
            .count()
    }

    /// Destroy the surface at `position` from outside the manager, as a
    /// compositor or user would.
    ///
    /// # Returns
    /// `true` if a surface was destroyed
    pub fn destroy_external(&self, position: IndicatorPosition) -> bool {
        let mut surfaces = self.lock();
        let Some(id) = surfaces
            .values()
            .find(|s| s.info.position == position)
            .map(|s| s.info.id)
        else {
            return false;
        };

        if let Some(surface) = surfaces.remove(&id) {
            tracing::debug!(overlay = %id, %position, "Headless surface destroyed externally");
            surface.notifier.closed();
        }
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<OverlayId, Surface>> {
        self.surfaces.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl OverlayWindowFactory for HeadlessOverlayFactory {
    fn create(
        &self,
        spec: &OverlaySpec,
        notifier: OverlayNotifier,
    ) -> Result<Box<dyn OverlayWindow>, OverlayError> {
        let info = SurfaceInfo {
            id: spec.id,
            position: spec.position,
            geometry: spec.geometry,
            asset: spec.asset.clone(),
            visible: false,
        };
        tracing::debug!(
            overlay = %spec.id,
            position = %spec.position,
            geometry = %spec.geometry,
            "Headless surface created"
        );

        if !self.defer_ready {
            notifier.ready();
        }
        self.lock().insert(spec.id, Surface { info, notifier });

        Ok(Box::new(HeadlessOverlay {
            id: spec.id,
            surfaces: Arc::clone(&self.surfaces),
        }))
    }
}

/// Handle to one registry entry
struct HeadlessOverlay {
    id: OverlayId,
    surfaces: Registry,
}

impl OverlayWindow for HeadlessOverlay {
    fn show_inactive(&mut self) -> Result<(), OverlayError> {
        let mut surfaces = self.surfaces.lock().unwrap_or_else(|e| e.into_inner());
        let surface = surfaces.get_mut(&self.id).ok_or(OverlayError::Destroyed)?;
        surface.info.visible = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), OverlayError> {
        self.surfaces
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.id)
            .map(|_| ())
            .ok_or(OverlayError::Destroyed)
    }

    fn is_destroyed(&self) -> bool {
        !self
            .surfaces
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::OverlayNotice;
    use crate::domain::indicator::DisplayBounds;
    use crate::domain::overlay::OverlayOptions;
    use tokio::sync::mpsc;

    fn spec(id: u64, position: IndicatorPosition) -> OverlaySpec {
        OverlaySpec {
            id: OverlayId(id),
            position,
            geometry: OverlayGeometry::for_position(position, &DisplayBounds::default(), 5).unwrap(),
            options: OverlayOptions::tracker(),
            asset: PathBuf::from("line.png"),
        }
    }

    #[test]
    fn create_reports_ready_immediately() {
        let factory = HeadlessOverlayFactory::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spec = spec(1, IndicatorPosition::Top);

        let mut window = factory
            .create(&spec, OverlayNotifier::new(spec.id, spec.position, tx))
            .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            OverlayNotice::Ready {
                id: OverlayId(1),
                position: IndicatorPosition::Top
            }
        );
        assert_eq!(factory.visible_count(), 0);
        window.show_inactive().unwrap();
        assert_eq!(factory.visible_count(), 1);
        assert_eq!(factory.live_surfaces()[0].geometry.height, 5);
    }

    #[test]
    fn deferred_waits_for_signal() {
        let factory = HeadlessOverlayFactory::deferred();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spec = spec(2, IndicatorPosition::Left);
        let _window = factory
            .create(&spec, OverlayNotifier::new(spec.id, spec.position, tx))
            .unwrap();

        assert!(rx.try_recv().is_err());
        assert_eq!(factory.signal_ready(IndicatorPosition::Left), 1);
        assert!(matches!(rx.try_recv().unwrap(), OverlayNotice::Ready { .. }));
    }

    #[test]
    fn close_removes_without_notice() {
        let factory = HeadlessOverlayFactory::deferred();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spec = spec(3, IndicatorPosition::Right);
        let mut window = factory
            .create(&spec, OverlayNotifier::new(spec.id, spec.position, tx))
            .unwrap();

        window.close().unwrap();
        assert!(window.is_destroyed());
        assert!(factory.live_surfaces().is_empty());
        assert!(rx.try_recv().is_err());
        assert!(matches!(window.close(), Err(OverlayError::Destroyed)));
        assert!(matches!(window.show_inactive(), Err(OverlayError::Destroyed)));
    }

    #[test]
    fn external_destroy_reports_closed() {
        let factory = HeadlessOverlayFactory::deferred();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spec = spec(4, IndicatorPosition::Bottom);
        let window = factory
            .create(&spec, OverlayNotifier::new(spec.id, spec.position, tx))
            .unwrap();

        assert!(factory.destroy_external(IndicatorPosition::Bottom));
        assert!(window.is_destroyed());
        assert_eq!(
            rx.try_recv().unwrap(),
            OverlayNotice::Closed {
                id: OverlayId(4),
                position: IndicatorPosition::Bottom
            }
        );
        assert!(!factory.destroy_external(IndicatorPosition::Bottom));
    }
}
