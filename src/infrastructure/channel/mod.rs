//! Event channel adapters

mod bus;

pub use bus::EventBus;
