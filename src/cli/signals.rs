//! Host window lifetime driven by OS shutdown signals

use std::sync::{Arc, Mutex};

use colored::Colorize;
use tokio::sync::oneshot;

use crate::application::ports::{ApplicationWindow, WindowClosed};

#[derive(Default)]
struct WindowState {
    closed: bool,
    subscribers: Vec<oneshot::Sender<()>>,
}

/// The application window the indicator is attached to.
///
/// Closing happens once, either explicitly or on SIGINT/SIGTERM (Ctrl+C on
/// Windows). Every subscriber is notified; subscribing after the close
/// yields an already-fired notification.
#[derive(Clone, Default)]
pub struct HostWindow {
    state: Arc<Mutex<WindowState>>,
}

impl HostWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the window.
    ///
    /// # Returns
    /// `true` on the first call
    pub fn close(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.closed {
            return false;
        }
        state.closed = true;
        for subscriber in state.subscribers.drain(..) {
            let _ = subscriber.send(());
        }
        true
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).closed
    }

    /// Close the window when a shutdown signal arrives
    #[cfg(unix)]
    pub fn close_on_signals(&self) -> Result<(), std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let window = self.clone();
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
            window.close();
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        let window = self.clone();
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
            window.close();
        });

        Ok(())
    }

    /// Close the window when a shutdown signal arrives
    #[cfg(windows)]
    pub fn close_on_signals(&self) -> Result<(), std::io::Error> {
        let window = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("{} Received Ctrl+C (shutdown)", "↓".cyan());
                window.close();
            }
        });
        Ok(())
    }
}

impl ApplicationWindow for HostWindow {
    fn on_closed(&self) -> WindowClosed {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.closed {
            let _ = tx.send(());
        } else {
            state.subscribers.push(tx);
        }
        rx
    }
}
