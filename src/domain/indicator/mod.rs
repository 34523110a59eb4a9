//! Indicator border positions, geometry and the per-position slot map

mod geometry;
mod position;
mod set;

pub use geometry::{DisplayBounds, OverlayGeometry, DEFAULT_BORDER_THICKNESS};
pub use position::IndicatorPosition;
pub use set::IndicatorSet;
