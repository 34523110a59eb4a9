//! Display bounds and border strip geometry

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::IndicatorPosition;
use crate::domain::error::InvalidBoundsError;

/// Default border strip thickness in logical units
pub const DEFAULT_BORDER_THICKNESS: u32 = 5;

/// Usable work area of a display, in logical units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DisplayBounds {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right and bottom edges, `None` when either lies outside `i32`
    pub fn far_edges(&self) -> Option<(i32, i32)> {
        let right = i32::try_from(i64::from(self.x) + i64::from(self.width)).ok()?;
        let bottom = i32::try_from(i64::from(self.y) + i64::from(self.height)).ok()?;
        Some((right, bottom))
    }
}

impl Default for DisplayBounds {
    fn default() -> Self {
        Self::new(0, 0, 1920, 1080)
    }
}

impl fmt::Display for DisplayBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

/// Parses `X,Y,WIDTH,HEIGHT` (e.g. `0,0,1920,1080`)
impl FromStr for DisplayBounds {
    type Err = InvalidBoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidBoundsError {
            input: s.to_string(),
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, width, height] = parts.as_slice() else {
            return Err(err());
        };

        let bounds = DisplayBounds {
            x: x.parse().map_err(|_| err())?,
            y: y.parse().map_err(|_| err())?,
            width: width.parse().map_err(|_| err())?,
            height: height.parse().map_err(|_| err())?,
        };

        if bounds.width == 0 || bounds.height == 0 || bounds.far_edges().is_none() {
            return Err(err());
        }
        Ok(bounds)
    }
}

/// Placement of a single border strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl OverlayGeometry {
    /// Compute the strip for `position` inside `bounds`.
    ///
    /// Horizontal strips span the full work-area width, vertical strips the
    /// full height. The thickness never exceeds the work-area extent it is
    /// subtracted from. Returns `None` for a work area whose far edges are
    /// not addressable.
    pub fn for_position(
        position: IndicatorPosition,
        bounds: &DisplayBounds,
        thickness: u32,
    ) -> Option<Self> {
        let (right, bottom) = bounds.far_edges()?;
        let geometry = match position {
            IndicatorPosition::Top => {
                let t = thickness.min(bounds.height);
                Self {
                    x: bounds.x,
                    y: bounds.y,
                    width: bounds.width,
                    height: t,
                }
            }
            IndicatorPosition::Bottom => {
                let t = thickness.min(bounds.height);
                Self {
                    x: bounds.x,
                    y: i32::try_from(i64::from(bottom) - i64::from(t)).ok()?,
                    width: bounds.width,
                    height: t,
                }
            }
            IndicatorPosition::Left => {
                let t = thickness.min(bounds.width);
                Self {
                    x: bounds.x,
                    y: bounds.y,
                    width: t,
                    height: bounds.height,
                }
            }
            IndicatorPosition::Right => {
                let t = thickness.min(bounds.width);
                Self {
                    x: i32::try_from(i64::from(right) - i64::from(t)).ok()?,
                    y: bounds.y,
                    width: t,
                    height: bounds.height,
                }
            }
        };
        Some(geometry)
    }
}

impl fmt::Display for OverlayGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
