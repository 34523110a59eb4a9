//! Overlay window port interface

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::indicator::{IndicatorPosition, OverlayGeometry};
use crate::domain::overlay::OverlayOptions;

/// Overlay window errors
#[derive(Debug, Clone, Error)]
pub enum OverlayError {
    #[error("Failed to create overlay window: {0}")]
    CreateFailed(String),

    #[error("Overlay window already destroyed")]
    Destroyed,

    #[error("Overlay backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Identifier of one overlay incarnation.
///
/// A recreated overlay at the same position gets a new id, so late notices
/// from a replaced window can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Everything a backend needs to build one tracker overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    pub id: OverlayId,
    pub position: IndicatorPosition,
    pub geometry: OverlayGeometry,
    pub options: OverlayOptions,
    /// Static strip asset loaded at construction
    pub asset: PathBuf,
}

/// Lifecycle notice emitted by an overlay backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayNotice {
    /// The native surface can be displayed
    Ready {
        id: OverlayId,
        position: IndicatorPosition,
    },
    /// The native surface was destroyed
    Closed {
        id: OverlayId,
        position: IndicatorPosition,
    },
}

impl OverlayNotice {
    pub fn id(&self) -> OverlayId {
        match self {
            Self::Ready { id, .. } | Self::Closed { id, .. } => *id,
        }
    }

    pub fn position(&self) -> IndicatorPosition {
        match self {
            Self::Ready { position, .. } | Self::Closed { position, .. } => *position,
        }
    }
}

/// Sink a backend uses to report "ready" and "closed" for one overlay.
///
/// Sending after the coordinator has stopped is silently dropped.
#[derive(Debug, Clone)]
pub struct OverlayNotifier {
    id: OverlayId,
    position: IndicatorPosition,
    tx: mpsc::UnboundedSender<OverlayNotice>,
}

impl OverlayNotifier {
    pub fn new(
        id: OverlayId,
        position: IndicatorPosition,
        tx: mpsc::UnboundedSender<OverlayNotice>,
    ) -> Self {
        Self { id, position, tx }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Report that the surface is ready to be shown
    pub fn ready(&self) {
        let _ = self.tx.send(OverlayNotice::Ready {
            id: self.id,
            position: self.position,
        });
    }

    /// Report that the surface was destroyed
    pub fn closed(&self) {
        let _ = self.tx.send(OverlayNotice::Closed {
            id: self.id,
            position: self.position,
        });
    }
}

/// Handle to a live tracker overlay
pub trait OverlayWindow: Send {
    /// Make the overlay visible without taking input focus
    fn show_inactive(&mut self) -> Result<(), OverlayError>;

    /// Destroy the overlay.
    ///
    /// Must not report a "closed" notice for a close the manager requested.
    fn close(&mut self) -> Result<(), OverlayError>;

    /// Whether the native resource is already gone
    fn is_destroyed(&self) -> bool;
}

/// Port for creating tracker overlays
pub trait OverlayWindowFactory: Send + Sync {
    /// Start constructing an overlay.
    ///
    /// The returned window is hidden. Readiness and external closes are
    /// reported later through `notifier`.
    fn create(
        &self,
        spec: &OverlaySpec,
        notifier: OverlayNotifier,
    ) -> Result<Box<dyn OverlayWindow>, OverlayError>;
}

/// Blanket implementation for boxed factory types
impl OverlayWindowFactory for Box<dyn OverlayWindowFactory> {
    fn create(
        &self,
        spec: &OverlaySpec,
        notifier: OverlayNotifier,
    ) -> Result<Box<dyn OverlayWindow>, OverlayError> {
        self.as_ref().create(spec, notifier)
    }
}
