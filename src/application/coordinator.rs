//! Screen-share indicator coordinator
//!
//! Binds one indicator manager to the event channel for the lifetime of one
//! application window: registers a listener at construction, removes it
//! exactly once when the window closes, and reaps any live overlays.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::sync::oneshot::error::TryRecvError;

use crate::domain::event::ChannelEnvelope;

use super::indicator::{EventOutcome, IndicatorSnapshot, IndicatorWindowSetManager};
use super::ports::{
    ApplicationWindow, DisplayQuery, EventChannel, ListenerId, OverlayNotice,
    OverlayWindowFactory, WindowClosed,
};

/// Counts how often the coordinator's channel listener ran
#[derive(Debug, Clone, Default)]
pub struct ListenerProbe {
    invocations: Arc<AtomicU64>,
}

impl ListenerProbe {
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.invocations.fetch_add(1, Ordering::SeqCst);
    }
}

/// Shared, read-only view of the indicator set for status queries
pub type SharedSnapshot = Arc<Mutex<IndicatorSnapshot>>;

/// Why the coordinator stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The application window signalled closed
    WindowClosed,
    /// The channel stopped delivering
    ChannelClosed,
    /// `shutdown` was called directly
    Requested,
}

/// Summary returned when the coordinator stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorReport {
    pub reason: ShutdownReason,
    pub events_handled: u64,
    pub overlays_reaped: usize,
}

/// Screen-share indicator coordinator
pub struct IndicatorCoordinator<C, F, D>
where
    C: EventChannel + ?Sized,
    F: OverlayWindowFactory,
    D: DisplayQuery,
{
    channel: Arc<C>,
    listener: Option<ListenerId>,
    events: mpsc::UnboundedReceiver<ChannelEnvelope>,
    notices: mpsc::UnboundedReceiver<OverlayNotice>,
    window_closed: WindowClosed,
    manager: IndicatorWindowSetManager<F, D>,
    probe: ListenerProbe,
    snapshot: SharedSnapshot,
    report: Option<CoordinatorReport>,
    overlays_reaped: usize,
}

impl<C, F, D> IndicatorCoordinator<C, F, D>
where
    C: EventChannel + ?Sized,
    F: OverlayWindowFactory,
    D: DisplayQuery,
{
    /// Register on `channel` and key the registration to `window`.
    ///
    /// `notices` is the receiver returned by [`IndicatorWindowSetManager::new`].
    pub fn new<W>(
        channel: Arc<C>,
        window: &W,
        manager: IndicatorWindowSetManager<F, D>,
        notices: mpsc::UnboundedReceiver<OverlayNotice>,
    ) -> Self
    where
        W: ApplicationWindow + ?Sized,
    {
        let subscription = channel.subscribe();
        let window_closed = window.on_closed();
        tracing::info!(
            channel = channel.name(),
            listener = %subscription.id,
            "Listening for screen sharing events"
        );

        let snapshot = Arc::new(Mutex::new(manager.snapshot()));
        Self {
            channel,
            listener: Some(subscription.id),
            events: subscription.receiver,
            notices,
            window_closed,
            manager,
            probe: ListenerProbe::default(),
            snapshot,
            report: None,
            overlays_reaped: 0,
        }
    }

    /// Listener invocation counter
    pub fn probe(&self) -> ListenerProbe {
        self.probe.clone()
    }

    /// Snapshot handle updated after every processed message
    pub fn snapshot_handle(&self) -> SharedSnapshot {
        Arc::clone(&self.snapshot)
    }

    /// Current per-position overlay states
    pub fn snapshot(&self) -> IndicatorSnapshot {
        self.manager.snapshot()
    }

    pub fn manager(&self) -> &IndicatorWindowSetManager<F, D> {
        &self.manager
    }

    /// Whether the coordinator has stopped
    pub fn is_finished(&self) -> bool {
        self.report.is_some()
    }

    /// Process messages until the window closes or the channel ends
    pub async fn run(mut self) -> CoordinatorReport {
        while self.step().await {}
        self.shutdown()
    }

    /// Wait for and process one message.
    ///
    /// Window closure wins over pending notices, and notices over channel
    /// events.
    ///
    /// # Returns
    /// `false` once the coordinator has stopped
    pub async fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        tokio::select! {
            biased;
            _ = &mut self.window_closed => {
                self.finish(ShutdownReason::WindowClosed);
                return false;
            }
            Some(notice) = self.notices.recv() => {
                self.manager.handle_notice(notice);
            }
            envelope = self.events.recv() => match envelope {
                Some(envelope) => {
                    self.dispatch(envelope);
                }
                None => {
                    self.finish(ShutdownReason::ChannelClosed);
                    return false;
                }
            },
        }

        self.publish_snapshot();
        true
    }

    /// Process everything already queued without waiting.
    ///
    /// # Returns
    /// The number of messages processed
    pub fn drain_pending(&mut self) -> usize {
        let mut processed = 0;
        while !self.is_finished() {
            match self.window_closed.try_recv() {
                Ok(()) | Err(TryRecvError::Closed) => {
                    self.finish(ShutdownReason::WindowClosed);
                    break;
                }
                Err(TryRecvError::Empty) => {}
            }

            if let Ok(notice) = self.notices.try_recv() {
                self.manager.handle_notice(notice);
            } else if let Ok(envelope) = self.events.try_recv() {
                self.dispatch(envelope);
            } else {
                break;
            }
            processed += 1;
        }
        self.publish_snapshot();
        processed
    }

    /// Stop the coordinator: remove the listener and reap overlays.
    ///
    /// Safe to call repeatedly; only the first call has an effect.
    pub fn shutdown(&mut self) -> CoordinatorReport {
        self.finish(ShutdownReason::Requested);
        self.report.unwrap_or(CoordinatorReport {
            reason: ShutdownReason::Requested,
            events_handled: self.probe.invocations(),
            overlays_reaped: self.overlays_reaped,
        })
    }

    fn dispatch(&mut self, envelope: ChannelEnvelope) -> EventOutcome {
        self.probe.record();
        let event = envelope.event();
        let outcome = self.manager.handle_event(&event);
        tracing::debug!(event = %event, ?outcome, "Screen sharing event handled");
        outcome
    }

    fn finish(&mut self, reason: ShutdownReason) {
        if self.report.is_some() {
            return;
        }

        if let Some(id) = self.listener.take() {
            self.channel.unsubscribe(id);
        }
        // Envelopes still queued for the removed listener are dropped
        self.events.close();
        self.overlays_reaped = self.manager.teardown();
        self.publish_snapshot();

        let report = CoordinatorReport {
            reason,
            events_handled: self.probe.invocations(),
            overlays_reaped: self.overlays_reaped,
        };
        tracing::info!(
            ?reason,
            events = report.events_handled,
            reaped = report.overlays_reaped,
            "Screen sharing indicator stopped"
        );
        self.report = Some(report);
    }

    fn publish_snapshot(&self) {
        let snapshot = self.manager.snapshot();
        *self.snapshot.lock().unwrap_or_else(|e| e.into_inner()) = snapshot;
    }
}

impl<C, F, D> Drop for IndicatorCoordinator<C, F, D>
where
    C: EventChannel + ?Sized,
    F: OverlayWindowFactory,
    D: DisplayQuery,
{
    fn drop(&mut self) {
        self.finish(ShutdownReason::Requested);
    }
}
