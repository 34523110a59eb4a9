//! Application window port interface

use tokio::sync::oneshot;

/// One-shot notification fired when the application window closes.
///
/// A dropped sender counts as closed.
pub type WindowClosed = oneshot::Receiver<()>;

/// Port for the top-level application window the indicator is attached to
pub trait ApplicationWindow: Send + Sync {
    /// Subscribe to the window's "closed" notification.
    ///
    /// Called exactly once per coordinator.
    fn on_closed(&self) -> WindowClosed;
}
