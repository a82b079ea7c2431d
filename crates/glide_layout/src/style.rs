//! Layout style helpers

pub use taffy::prelude::*;

/// Helper to create common layout styles
pub struct LayoutStyle;

impl LayoutStyle {
    /// Create a flex row style
    pub fn flex_row() -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            ..Default::default()
        }
    }

    /// Create a flex column style
    pub fn flex_column() -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            ..Default::default()
        }
    }

    /// Flex container along `direction` with a uniform gap between items
    pub fn stack(direction: FlexDirection, gap: f32) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: direction,
            gap: Size {
                width: LengthPercentage::Length(gap),
                height: LengthPercentage::Length(gap),
            },
            ..Default::default()
        }
    }

    /// Create a fixed size style that never shrinks below its size
    pub fn fixed_size(width: f32, height: f32) -> Style {
        Style {
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            flex_shrink: 0.0,
            ..Default::default()
        }
    }
}
