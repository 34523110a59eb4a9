//! Screen-share event tags

use std::fmt;

/// Well-known identifier of the screen-share events channel
pub const SCREEN_SHARE_EVENTS_CHANNEL: &str = "jitsi-screen-sharing-marker";

const OPEN_TRACKER: &str = "open-tracker-window";
const CLOSE_TRACKER: &str = "close-tracker-window";
const STOP_SCREEN_SHARE: &str = "stop-screen-share";

/// Events published by a render surface on the screen-share channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScreenShareEvent {
    /// Capture started: draw the border indicators
    OpenTracker,
    /// Capture ended: remove the border indicators
    CloseTracker,
    /// The user stopped sharing from the indicator
    StopScreenShare,
    /// Any other tag; kept verbatim for logging
    Unrecognized(String),
}

impl ScreenShareEvent {
    /// Decode an event from its wire tag. Never fails.
    pub fn from_name(name: &str) -> Self {
        match name {
            OPEN_TRACKER => Self::OpenTracker,
            CLOSE_TRACKER => Self::CloseTracker,
            STOP_SCREEN_SHARE => Self::StopScreenShare,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Wire tag of this event
    pub fn name(&self) -> &str {
        match self {
            Self::OpenTracker => OPEN_TRACKER,
            Self::CloseTracker => CLOSE_TRACKER,
            Self::StopScreenShare => STOP_SCREEN_SHARE,
            Self::Unrecognized(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for ScreenShareEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_decode() {
        assert_eq!(
            ScreenShareEvent::from_name("open-tracker-window"),
            ScreenShareEvent::OpenTracker
        );
        assert_eq!(
            ScreenShareEvent::from_name("close-tracker-window"),
            ScreenShareEvent::CloseTracker
        );
        assert_eq!(
            ScreenShareEvent::from_name("stop-screen-share"),
            ScreenShareEvent::StopScreenShare
        );
    }

    #[test]
    fn unknown_tag_is_kept() {
        let event = ScreenShareEvent::from_name("toggle-always-on-top");
        assert_eq!(
            event,
            ScreenShareEvent::Unrecognized("toggle-always-on-top".to_string())
        );
        assert!(!event.is_recognized());
        assert_eq!(event.name(), "toggle-always-on-top");
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!(!ScreenShareEvent::from_name("OPEN-TRACKER-WINDOW").is_recognized());
    }

    #[test]
    fn name_matches_from_name() {
        for event in [
            ScreenShareEvent::OpenTracker,
            ScreenShareEvent::CloseTracker,
            ScreenShareEvent::StopScreenShare,
        ] {
            assert_eq!(ScreenShareEvent::from_name(event.name()), event);
        }
    }
}
