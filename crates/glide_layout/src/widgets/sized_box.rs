//! Fixed-size leaf element

use glide_core::Vec3;

use crate::element::{Element, ElementBase};

/// A leaf that always asks for the same size
#[derive(Debug, Clone)]
pub struct SizedBox {
    base: ElementBase,
    size: Vec3,
}

impl SizedBox {
    pub fn new(size: Vec3) -> Self {
        Self {
            base: ElementBase::named("sized_box"),
            size,
        }
    }

    /// Set the debug name (builder pattern)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.base.name = name.into();
        self
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec3) {
        self.size = size;
        self.base.invalidate_measure();
    }
}

impl Element for SizedBox {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn measure_override(&mut self, _available_size: Vec3) -> Vec3 {
        self.size
    }
}
