//! Display query port interface

use std::sync::Arc;

use thiserror::Error;

use crate::domain::indicator::DisplayBounds;

/// Display query errors
#[derive(Debug, Clone, Error)]
pub enum DisplayError {
    #[error("No primary display available")]
    NoPrimaryDisplay,

    #[error("Failed to query display: {0}")]
    QueryFailed(String),
}

/// Port for reading the primary display configuration
pub trait DisplayQuery: Send + Sync {
    /// Usable work area of the primary display.
    ///
    /// Read fresh on every call so display reconfiguration is picked up.
    fn primary_work_area(&self) -> Result<DisplayBounds, DisplayError>;
}

/// Shared display handles, so the work area can be changed while a manager
/// holds the query
impl<T: DisplayQuery + ?Sized> DisplayQuery for Arc<T> {
    fn primary_work_area(&self) -> Result<DisplayBounds, DisplayError> {
        self.as_ref().primary_work_area()
    }
}
