//! Scroll position indicator

use glide_core::{Axis, Color, Vec3};

use crate::element::{Element, ElementBase};

/// A flat bar showing the visible part of scrolled content along one axis
///
/// The owning viewer arranges the bar and places it directly in world space;
/// the bar itself has no layout logic.
#[derive(Debug, Clone)]
pub struct ScrollBar {
    base: ElementBase,
    axis: Axis,
    bar_color: Color,
}

impl ScrollBar {
    pub fn new(axis: Axis) -> Self {
        Self {
            base: ElementBase::named(format!("scroll_bar_{axis:?}").to_lowercase()),
            axis,
            bar_color: Color::TRANSPARENT,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn bar_color(&self) -> Color {
        self.bar_color
    }

    pub fn set_bar_color(&mut self, color: Color) {
        self.bar_color = color;
    }

    /// Arranged length along the bar's own axis
    pub fn length(&self) -> f32 {
        self.base.render_size()[self.axis]
    }
}

impl Element for ScrollBar {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn measure_override(&mut self, _available_size: Vec3) -> Vec3 {
        Vec3::ZERO
    }
}
