//! Screen-share events and the channel envelope carrying them

mod envelope;
mod screen_share;

pub use envelope::{ChannelEnvelope, EventData};
pub use screen_share::{ScreenShareEvent, SCREEN_SHARE_EVENTS_CHANNEL};
