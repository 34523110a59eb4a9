//! Display query answered from configuration

use std::sync::RwLock;

use crate::application::ports::{DisplayError, DisplayQuery};
use crate::domain::indicator::DisplayBounds;

/// Primary display whose work area is set by configuration.
///
/// The work area can be changed while running; the next query sees it.
#[derive(Debug)]
pub struct StaticDisplay {
    work_area: RwLock<Option<DisplayBounds>>,
}

impl StaticDisplay {
    pub fn new(work_area: DisplayBounds) -> Self {
        Self {
            work_area: RwLock::new(Some(work_area)),
        }
    }

    pub fn set_work_area(&self, work_area: Option<DisplayBounds>) {
        *self.work_area.write().unwrap_or_else(|e| e.into_inner()) = work_area;
    }
}

impl Default for StaticDisplay {
    fn default() -> Self {
        Self::new(DisplayBounds::default())
    }
}

impl DisplayQuery for StaticDisplay {
    fn primary_work_area(&self) -> Result<DisplayBounds, DisplayError> {
        self.work_area
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .ok_or(DisplayError::NoPrimaryDisplay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_configured_work_area() {
        let display = StaticDisplay::new(DisplayBounds::new(0, 25, 1920, 1055));
        assert_eq!(
            display.primary_work_area().unwrap(),
            DisplayBounds::new(0, 25, 1920, 1055)
        );
    }

    #[test]
    fn work_area_can_change() {
        let display = StaticDisplay::default();
        display.set_work_area(Some(DisplayBounds::new(100, 0, 800, 600)));
        assert_eq!(display.primary_work_area().unwrap().width, 800);

        display.set_work_area(None);
        assert!(matches!(
            display.primary_work_area(),
            Err(DisplayError::NoPrimaryDisplay)
        ));
    }
}
