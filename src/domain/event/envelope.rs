//! `{data: {name, payload?}}` envelope exchanged on the channel

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ScreenShareEvent;
use crate::domain::error::EnvelopeError;

/// Event body: tag plus optional free-form payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Message published on the screen-share channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelEnvelope {
    pub data: EventData,
}

impl ChannelEnvelope {
    /// Wrap an event with an optional payload
    pub fn new(event: &ScreenShareEvent, payload: Option<Value>) -> Self {
        Self {
            data: EventData {
                name: event.name().to_string(),
                payload,
            },
        }
    }

    /// Decoded event tag
    pub fn event(&self) -> ScreenShareEvent {
        ScreenShareEvent::from_name(&self.data.name)
    }

    /// Parse one JSON envelope
    pub fn from_json(input: &str) -> Result<Self, EnvelopeError> {
        serde_json::from_str(input.trim()).map_err(|e| EnvelopeError::Malformed(e.to_string()))
    }

    /// Serialize to a single JSON line (no trailing newline)
    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        serde_json::to_string(self).map_err(|e| EnvelopeError::Encode(e.to_string()))
    }
}

impl From<ScreenShareEvent> for ChannelEnvelope {
    fn from(event: ScreenShareEvent) -> Self {
        Self::new(&event, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_envelope_without_payload() {
        let envelope = ChannelEnvelope::from_json(r#"{"data":{"name":"open-tracker-window"}}"#)
            .unwrap();
        assert_eq!(envelope.event(), ScreenShareEvent::OpenTracker);
        assert!(envelope.data.payload.is_none());
    }

    #[test]
    fn parses_envelope_with_payload() {
        let envelope = ChannelEnvelope::from_json(
            r#"{"data":{"name":"close-tracker-window","payload":{"sourceId":"screen:0"}}}"#,
        )
        .unwrap();
        assert_eq!(envelope.event(), ScreenShareEvent::CloseTracker);
        assert_eq!(envelope.data.payload, Some(json!({"sourceId": "screen:0"})));
    }

    #[test]
    fn unknown_name_is_not_an_error() {
        let envelope = ChannelEnvelope::from_json(r#"{"data":{"name":"whatever"}}"#).unwrap();
        assert!(!envelope.event().is_recognized());
    }

    #[test]
    fn missing_data_is_malformed() {
        let err = ChannelEnvelope::from_json(r#"{"name":"open-tracker-window"}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::Malformed(_)));
    }

    #[test]
    fn not_json_is_malformed() {
        assert!(ChannelEnvelope::from_json("open").is_err());
    }

    #[test]
    fn serializes_without_null_payload() {
        let envelope = ChannelEnvelope::from(ScreenShareEvent::StopScreenShare);
        assert_eq!(
            envelope.to_json().unwrap(),
            r#"{"data":{"name":"stop-screen-share"}}"#
        );
    }
}
