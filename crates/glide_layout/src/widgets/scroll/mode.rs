//! Scroll modes and the axes they activate

use glide_core::{Axis, Vec3};
use serde::{Deserialize, Serialize};

/// Which axes a scroll viewer may move along
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    None,
    #[default]
    Horizontal,
    Vertical,
    InDepth,
    HorizontalVertical,
    VerticalInDepth,
    InDepthHorizontal,
}

const NO_AXES: &[Axis] = &[];
const HORIZONTAL: &[Axis] = &[Axis::Horizontal];
const VERTICAL: &[Axis] = &[Axis::Vertical];
const DEPTH: &[Axis] = &[Axis::Depth];
const HORIZONTAL_VERTICAL: &[Axis] = &[Axis::Horizontal, Axis::Vertical];
const VERTICAL_DEPTH: &[Axis] = &[Axis::Vertical, Axis::Depth];
const DEPTH_HORIZONTAL: &[Axis] = &[Axis::Depth, Axis::Horizontal];

/// Modes under which each orientation scrolls, indexed by axis
const ORIENTATION_MODES: [&[ScrollMode]; 3] = [
    &[
        ScrollMode::Horizontal,
        ScrollMode::HorizontalVertical,
        ScrollMode::InDepthHorizontal,
    ],
    &[
        ScrollMode::HorizontalVertical,
        ScrollMode::Vertical,
        ScrollMode::VerticalInDepth,
    ],
    &[
        ScrollMode::VerticalInDepth,
        ScrollMode::InDepthHorizontal,
        ScrollMode::InDepth,
    ],
];

impl ScrollMode {
    pub const ALL: [ScrollMode; 7] = [
        ScrollMode::None,
        ScrollMode::Horizontal,
        ScrollMode::Vertical,
        ScrollMode::InDepth,
        ScrollMode::HorizontalVertical,
        ScrollMode::VerticalInDepth,
        ScrollMode::InDepthHorizontal,
    ];

    /// Active axes in iteration order
    pub const fn axes(self) -> &'static [Axis] {
        match self {
            ScrollMode::None => NO_AXES,
            ScrollMode::Horizontal => HORIZONTAL,
            ScrollMode::Vertical => VERTICAL,
            ScrollMode::InDepth => DEPTH,
            ScrollMode::HorizontalVertical => HORIZONTAL_VERTICAL,
            ScrollMode::VerticalInDepth => VERTICAL_DEPTH,
            ScrollMode::InDepthHorizontal => DEPTH_HORIZONTAL,
        }
    }

    /// Modes under which `axis` is scrollable
    pub const fn modes_for(axis: Axis) -> &'static [ScrollMode] {
        ORIENTATION_MODES[axis.index()]
    }

    pub fn is_active(self, axis: Axis) -> bool {
        Self::modes_for(axis).contains(&self)
    }

    /// `v` with every inactive component zeroed
    pub fn filter(self, v: Vec3) -> Vec3 {
        let mut filtered = Vec3::ZERO;
        for &axis in self.axes() {
            filtered[axis] = v[axis];
        }
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_agree() {
        for mode in ScrollMode::ALL {
            for axis in Axis::ALL {
                assert_eq!(
                    mode.axes().contains(&axis),
                    mode.is_active(axis),
                    "{mode:?} / {axis:?}"
                );
            }
        }
    }

    #[test]
    fn test_in_depth_horizontal_iterates_depth_first() {
        assert_eq!(
            ScrollMode::InDepthHorizontal.axes(),
            &[Axis::Depth, Axis::Horizontal]
        );
        assert!(ScrollMode::None.axes().is_empty());
    }

    #[test]
    fn test_filter_zeroes_inactive_axes() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(ScrollMode::Vertical.filter(v), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(
            ScrollMode::InDepthHorizontal.filter(v),
            Vec3::new(1.0, 0.0, 3.0)
        );
        assert_eq!(ScrollMode::None.filter(v), Vec3::ZERO);
    }
}
