//! Indicator window set manager
//!
//! Owns the four border overlays and drives their lifecycle from channel
//! events and backend notices. All methods run to completion on the
//! coordinator's event loop, so slot mutations never interleave.

use std::fmt;
use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::domain::config::DEFAULT_ASSET_NAME;
use crate::domain::event::ScreenShareEvent;
use crate::domain::indicator::{
    IndicatorPosition, IndicatorSet, OverlayGeometry, DEFAULT_BORDER_THICKNESS,
};
use crate::domain::overlay::{OverlayLifecycle, OverlayOptions, OverlayState};

use super::ports::{
    DisplayQuery, OverlayId, OverlayNotice, OverlayNotifier, OverlaySpec, OverlayWindow,
    OverlayWindowFactory,
};

/// Configuration for the indicator set
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    /// Strip thickness in logical units
    pub border_thickness: u32,
    /// Static strip asset handed to every overlay
    pub asset: PathBuf,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            border_thickness: DEFAULT_BORDER_THICKNESS,
            asset: PathBuf::from(DEFAULT_ASSET_NAME),
        }
    }
}

/// What handling one channel event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// OPEN_TRACKER: number of overlays newly requested
    Opened { created: usize },
    /// CLOSE_TRACKER: number of overlays closed
    Closed { closed: usize },
    /// STOP_SCREEN_SHARE: reserved, nothing done
    Reserved,
    /// Unknown tag, logged and ignored
    Unrecognized,
    /// The manager was already torn down
    Inactive,
}

/// Per-position overlay states at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorSnapshot {
    states: [OverlayState; 4],
}

impl IndicatorSnapshot {
    /// State of the overlay at `position`
    pub fn state(&self, position: IndicatorPosition) -> OverlayState {
        self.states[position.index()]
    }

    /// Number of positions holding an overlay
    pub fn live_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s != OverlayState::Absent)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }
}

impl fmt::Display for IndicatorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = IndicatorPosition::ALL
            .iter()
            .map(|p| format!("{}={}", p, self.state(*p)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// One slot's occupant
struct TrackedOverlay {
    id: OverlayId,
    geometry: OverlayGeometry,
    window: Box<dyn OverlayWindow>,
    lifecycle: OverlayLifecycle,
}

/// Indicator window set manager
pub struct IndicatorWindowSetManager<F, D>
where
    F: OverlayWindowFactory,
    D: DisplayQuery,
{
    factory: F,
    display: D,
    config: IndicatorConfig,
    indicators: IndicatorSet<TrackedOverlay>,
    notices: mpsc::UnboundedSender<OverlayNotice>,
    next_id: u64,
    torn_down: bool,
}

impl<F, D> IndicatorWindowSetManager<F, D>
where
    F: OverlayWindowFactory,
    D: DisplayQuery,
{
    /// Create a manager with an empty indicator set.
    ///
    /// Returns the manager and the receiver on which backends report
    /// overlay readiness and external closes.
    pub fn new(
        factory: F,
        display: D,
        config: IndicatorConfig,
    ) -> (Self, mpsc::UnboundedReceiver<OverlayNotice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let manager = Self {
            factory,
            display,
            config,
            indicators: IndicatorSet::new(),
            notices: tx,
            next_id: 1,
            torn_down: false,
        };
        (manager, rx)
    }

    /// React to one channel event
    pub fn handle_event(&mut self, event: &ScreenShareEvent) -> EventOutcome {
        if self.torn_down {
            tracing::debug!(event = %event, "Ignoring event after teardown");
            return EventOutcome::Inactive;
        }

        match event {
            ScreenShareEvent::OpenTracker => EventOutcome::Opened {
                created: self.open_tracker(),
            },
            ScreenShareEvent::CloseTracker => EventOutcome::Closed {
                closed: self.close_all("close requested"),
            },
            ScreenShareEvent::StopScreenShare => {
                // Reserved: capture end is followed by an explicit CLOSE_TRACKER.
                tracing::debug!("Stop screen share received, nothing to do");
                EventOutcome::Reserved
            }
            ScreenShareEvent::Unrecognized(name) => {
                tracing::warn!(event = %name, "Unhandled screen sharing event");
                EventOutcome::Unrecognized
            }
        }
    }

    /// Request an overlay for every vacant position.
    ///
    /// All creations are requested before any overlay is shown; showing
    /// happens when each backend reports ready.
    fn open_tracker(&mut self) -> usize {
        let vacant = self.indicators.vacant_positions();
        if vacant.is_empty() {
            tracing::debug!("Indicators already open");
            return 0;
        }

        let bounds = match self.display.primary_work_area() {
            Ok(bounds) => bounds,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot place screen share indicator");
                return 0;
            }
        };

        let mut created = 0;
        for position in vacant {
            let Some(geometry) =
                OverlayGeometry::for_position(position, &bounds, self.config.border_thickness)
            else {
                tracing::warn!(%position, %bounds, "Work area out of range, indicator not shown");
                continue;
            };
            let id = OverlayId(self.next_id);
            self.next_id += 1;

            let spec = OverlaySpec {
                id,
                position,
                geometry,
                options: OverlayOptions::tracker(),
                asset: self.config.asset.clone(),
            };
            let notifier = OverlayNotifier::new(id, position, self.notices.clone());

            let window = match self.factory.create(&spec, notifier) {
                Ok(window) => window,
                Err(e) => {
                    tracing::warn!(%position, error = %e, "Failed to create indicator overlay");
                    continue;
                }
            };

            let mut lifecycle = OverlayLifecycle::new();
            if let Err(e) = lifecycle.request_create() {
                tracing::warn!(%position, error = %e, "Unexpected overlay state");
                continue;
            }

            let tracked = TrackedOverlay {
                id,
                geometry,
                window,
                lifecycle,
            };
            if let Err(mut rejected) = self.indicators.occupy(position, tracked) {
                // Unreachable while only vacant positions are iterated
                let _ = rejected.window.close();
                continue;
            }

            tracing::debug!(%position, %id, %geometry, "Indicator overlay requested");
            created += 1;
        }
        created
    }

    /// Close every live overlay and clear its slot
    fn close_all(&mut self, reason: &str) -> usize {
        let drained = self.indicators.drain();
        let count = drained.len();

        for (position, mut tracked) in drained {
            let _ = tracked.lifecycle.close();
            if tracked.window.is_destroyed() {
                tracing::debug!(%position, id = %tracked.id, "Overlay already destroyed");
                continue;
            }
            if let Err(e) = tracked.window.close() {
                tracing::warn!(%position, id = %tracked.id, error = %e, "Failed to close overlay");
            }
        }

        if count > 0 {
            tracing::debug!(count, reason, "Indicator overlays closed");
        }
        count
    }

    /// Apply a backend notice.
    ///
    /// Notices whose id no longer matches the slot occupant come from a
    /// replaced overlay and are dropped.
    ///
    /// # Returns
    /// `true` if the indicator set changed
    pub fn handle_notice(&mut self, notice: OverlayNotice) -> bool {
        let position = notice.position();
        let id = notice.id();

        let current = self.indicators.get(position).map(|t| t.id);
        if current != Some(id) {
            tracing::debug!(%position, %id, ?notice, "Dropping stale overlay notice");
            return false;
        }

        match notice {
            OverlayNotice::Ready { .. } => self.show_overlay(position),
            OverlayNotice::Closed { .. } => {
                if let Some(mut tracked) = self.indicators.vacate(position) {
                    let _ = tracked.lifecycle.close();
                    tracing::debug!(%position, %id, "Overlay closed externally");
                }
                true
            }
        }
    }

    /// First ready signal: show without stealing focus
    fn show_overlay(&mut self, position: IndicatorPosition) -> bool {
        let Some(tracked) = self.indicators.get_mut(position) else {
            return false;
        };

        if tracked.window.is_destroyed() {
            let id = tracked.id;
            self.indicators.vacate(position);
            tracing::debug!(%position, %id, "Overlay destroyed before it became ready");
            return true;
        }

        if tracked.lifecycle.mark_ready().is_err() {
            // Already visible; readiness is acted on once
            return false;
        }

        match tracked.window.show_inactive() {
            Ok(()) => {
                tracing::debug!(%position, id = %tracked.id, "Indicator overlay visible");
                true
            }
            Err(e) => {
                tracing::warn!(%position, id = %tracked.id, error = %e, "Failed to show overlay");
                if let Some(mut tracked) = self.indicators.vacate(position) {
                    let _ = tracked.window.close();
                }
                true
            }
        }
    }

    /// Release every overlay and stop reacting to events.
    ///
    /// # Returns
    /// The number of overlays reaped
    pub fn teardown(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;
        self.close_all("teardown")
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// State of the overlay at `position`
    pub fn state(&self, position: IndicatorPosition) -> OverlayState {
        self.indicators
            .get(position)
            .map(|t| t.lifecycle.state())
            .unwrap_or(OverlayState::Absent)
    }

    /// Geometry of the overlay at `position`, if one exists
    pub fn geometry(&self, position: IndicatorPosition) -> Option<OverlayGeometry> {
        self.indicators.get(position).map(|t| t.geometry)
    }

    /// Id of the overlay at `position`, if one exists
    pub fn overlay_id(&self, position: IndicatorPosition) -> Option<OverlayId> {
        self.indicators.get(position).map(|t| t.id)
    }

    /// Number of positions holding an overlay
    pub fn live_count(&self) -> usize {
        self.indicators.len()
    }

    /// Capture the current per-position states
    pub fn snapshot(&self) -> IndicatorSnapshot {
        let mut states = [OverlayState::Absent; 4];
        for (position, tracked) in self.indicators.iter() {
            states[position.index()] = tracked.lifecycle.state();
        }
        IndicatorSnapshot { states }
    }
}
