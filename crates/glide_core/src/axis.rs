//! Scroll axes

use serde::{Deserialize, Serialize};

use crate::error::GlideError;

/// One of the three independent scroll dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Left/right (index 0)
    Horizontal,
    /// Top/bottom (index 1)
    Vertical,
    /// Front/back (index 2)
    Depth,
}

impl Axis {
    /// All axes in index order
    pub const ALL: [Axis; 3] = [Axis::Horizontal, Axis::Vertical, Axis::Depth];

    pub const fn index(self) -> usize {
        match self {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
            Axis::Depth => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Axis> {
        Self::ALL.get(index).copied()
    }
}

impl TryFrom<u8> for Axis {
    type Error = GlideError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Axis::from_index(value as usize).ok_or(GlideError::InvalidAxis(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_index_roundtrip() {
        for axis in Axis::ALL {
            assert_eq!(Axis::from_index(axis.index()), Some(axis));
        }
        assert_eq!(Axis::from_index(3), None);
    }

    #[test]
    fn test_axis_try_from_rejects_out_of_range() {
        assert_eq!(Axis::try_from(2u8).unwrap(), Axis::Depth);
        assert!(matches!(
            Axis::try_from(7u8),
            Err(GlideError::InvalidAxis(7))
        ));
    }
}
