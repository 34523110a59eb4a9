//! Application layer - Use cases and port interfaces
//!
//! Contains the indicator coordination logic and trait definitions
//! for external system interactions.

pub mod coordinator;
pub mod indicator;
pub mod ports;

// Re-export use cases
pub use coordinator::{
    CoordinatorReport, IndicatorCoordinator, ListenerProbe, SharedSnapshot, ShutdownReason,
};
pub use indicator::{EventOutcome, IndicatorConfig, IndicatorSnapshot, IndicatorWindowSetManager};
