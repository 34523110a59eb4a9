//! Border positions framing the shared region

use std::fmt;

/// The four border strips drawn around the captured area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl IndicatorPosition {
    /// Every position, in creation order
    pub const ALL: [IndicatorPosition; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Slot index inside an indicator set
    pub(crate) const fn index(&self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// Whether the strip runs horizontally (spans the work-area width)
    pub const fn is_horizontal(&self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl fmt::Display for IndicatorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_distinct() {
        let mut seen = [false; 4];
        for position in IndicatorPosition::ALL {
            assert!(!seen[position.index()]);
            seen[position.index()] = true;
        }
    }

    #[test]
    fn horizontal_strips() {
        assert!(IndicatorPosition::Top.is_horizontal());
        assert!(IndicatorPosition::Bottom.is_horizontal());
        assert!(!IndicatorPosition::Left.is_horizontal());
        assert!(!IndicatorPosition::Right.is_horizontal());
    }

    #[test]
    fn position_display() {
        assert_eq!(IndicatorPosition::Top.to_string(), "top");
        assert_eq!(IndicatorPosition::Right.to_string(), "right");
    }
}
