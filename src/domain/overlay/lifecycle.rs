//! Tracker overlay lifecycle state machine

use std::fmt;
use thiserror::Error;

/// Overlay states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayState {
    #[default]
    Absent,
    Constructing,
    Visible,
}

impl OverlayState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Constructing => "constructing",
            Self::Visible => "visible",
        }
    }
}

impl fmt::Display for OverlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid overlay transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid overlay transition: cannot {action} while {current_state}")]
pub struct InvalidOverlayTransition {
    pub current_state: OverlayState,
    pub action: String,
}

/// Lifecycle of a single tracker overlay.
///
/// State machine:
///   ABSENT -> CONSTRUCTING (request_create)
///   CONSTRUCTING -> VISIBLE (mark_ready)
///   CONSTRUCTING | VISIBLE -> ABSENT (close)
#[derive(Debug, Default)]
pub struct OverlayLifecycle {
    state: OverlayState,
}

impl OverlayLifecycle {
    /// Create a lifecycle in absent state
    pub fn new() -> Self {
        Self {
            state: OverlayState::Absent,
        }
    }

    /// Get the current state
    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_absent(&self) -> bool {
        self.state == OverlayState::Absent
    }

    pub fn is_constructing(&self) -> bool {
        self.state == OverlayState::Constructing
    }

    pub fn is_visible(&self) -> bool {
        self.state == OverlayState::Visible
    }

    /// Transition from ABSENT to CONSTRUCTING
    pub fn request_create(&mut self) -> Result<(), InvalidOverlayTransition> {
        if self.state != OverlayState::Absent {
            return Err(InvalidOverlayTransition {
                current_state: self.state,
                action: "create".to_string(),
            });
        }
        self.state = OverlayState::Constructing;
        Ok(())
    }

    /// Transition from CONSTRUCTING to VISIBLE.
    ///
    /// Only the first ready signal is accepted.
    pub fn mark_ready(&mut self) -> Result<(), InvalidOverlayTransition> {
        if self.state != OverlayState::Constructing {
            return Err(InvalidOverlayTransition {
                current_state: self.state,
                action: "show".to_string(),
            });
        }
        self.state = OverlayState::Visible;
        Ok(())
    }

    /// Transition from CONSTRUCTING or VISIBLE back to ABSENT
    pub fn close(&mut self) -> Result<(), InvalidOverlayTransition> {
        if self.state == OverlayState::Absent {
            return Err(InvalidOverlayTransition {
                current_state: self.state,
                action: "close".to_string(),
            });
        }
        self.state = OverlayState::Absent;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lifecycle_is_absent() {
        let lifecycle = OverlayLifecycle::new();
        assert!(lifecycle.is_absent());
        assert!(!lifecycle.is_constructing());
        assert!(!lifecycle.is_visible());
    }

    #[test]
    fn create_then_ready() {
        let mut lifecycle = OverlayLifecycle::new();
        lifecycle.request_create().unwrap();
        assert!(lifecycle.is_constructing());
        lifecycle.mark_ready().unwrap();
        assert!(lifecycle.is_visible());
    }

    #[test]
    fn create_while_constructing_fails() {
        let mut lifecycle = OverlayLifecycle::new();
        lifecycle.request_create().unwrap();

        let err = lifecycle.request_create().unwrap_err();
        assert_eq!(err.current_state, OverlayState::Constructing);
        assert!(err.action.contains("create"));
    }

    #[test]
    fn ready_only_once() {
        let mut lifecycle = OverlayLifecycle::new();
        lifecycle.request_create().unwrap();
        lifecycle.mark_ready().unwrap();

        let err = lifecycle.mark_ready().unwrap_err();
        assert_eq!(err.current_state, OverlayState::Visible);
    }

    #[test]
    fn ready_from_absent_fails() {
        let mut lifecycle = OverlayLifecycle::new();
        let err = lifecycle.mark_ready().unwrap_err();
        assert_eq!(err.current_state, OverlayState::Absent);
    }

    #[test]
    fn close_from_constructing() {
        let mut lifecycle = OverlayLifecycle::new();
        lifecycle.request_create().unwrap();
        lifecycle.close().unwrap();
        assert!(lifecycle.is_absent());
    }

    #[test]
    fn close_from_absent_fails() {
        let mut lifecycle = OverlayLifecycle::new();
        let err = lifecycle.close().unwrap_err();
        assert_eq!(err.current_state, OverlayState::Absent);
    }

    #[test]
    fn full_cycle() {
        let mut lifecycle = OverlayLifecycle::new();
        lifecycle.request_create().unwrap();
        lifecycle.mark_ready().unwrap();
        lifecycle.close().unwrap();
        assert!(lifecycle.is_absent());

        // A closed overlay can be created again
        lifecycle.request_create().unwrap();
        assert!(lifecycle.is_constructing());
    }

    #[test]
    fn state_display() {
        assert_eq!(OverlayState::Absent.to_string(), "absent");
        assert_eq!(OverlayState::Constructing.to_string(), "constructing");
        assert_eq!(OverlayState::Visible.to_string(), "visible");
    }

    #[test]
    fn error_display() {
        let err = InvalidOverlayTransition {
            current_state: OverlayState::Visible,
            action: "show".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("show"));
        assert!(msg.contains("visible"));
    }
}
