//! Flexbox content backed by a taffy layout tree
//!
//! [`FlexContent`] lays a list of fixed-size items out in a row or a column
//! and reports the size of the whole run as its desired size. Placed inside a
//! scroll viewer it gives the viewer something realistic to scroll over.

use glide_core::Vec3;
use taffy::prelude::*;

use crate::element::{Element, ElementBase};
use crate::error::LayoutError;
use crate::style::LayoutStyle;
use crate::tree::{LayoutNodeId, LayoutTree};

/// Row or column of fixed-size items
pub struct FlexContent {
    base: ElementBase,
    tree: LayoutTree,
    root: LayoutNodeId,
    items: Vec<LayoutNodeId>,
}

impl FlexContent {
    /// Items laid out left to right
    pub fn row(items: &[(f32, f32)], gap: f32) -> Result<Self, LayoutError> {
        Self::build(FlexDirection::Row, items, gap)
    }

    /// Items laid out top to bottom
    pub fn column(items: &[(f32, f32)], gap: f32) -> Result<Self, LayoutError> {
        Self::build(FlexDirection::Column, items, gap)
    }

    fn build(direction: FlexDirection, items: &[(f32, f32)], gap: f32) -> Result<Self, LayoutError> {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(LayoutStyle::stack(direction, gap))?;

        let mut nodes = Vec::with_capacity(items.len());
        for &(width, height) in items {
            let node = tree.create_node(LayoutStyle::fixed_size(width, height))?;
            tree.add_child(root, node)?;
            nodes.push(node);
        }

        Ok(Self {
            base: ElementBase::named("flex_content"),
            tree,
            root,
            items: nodes,
        })
    }

    /// Set the debug name (builder pattern)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.base.name = name.into();
        self
    }

    pub fn item_count(&self) -> usize {
        self.tree.child_count(self.root)
    }

    /// Position and size of an item as computed by the last measure
    pub fn item_rect(&self, index: usize) -> Option<(Vec3, Vec3)> {
        let layout = self.tree.get_layout(*self.items.get(index)?)?;
        Some((
            Vec3::new(layout.location.x, layout.location.y, 0.0),
            Vec3::new(layout.size.width, layout.size.height, 0.0),
        ))
    }

    fn available_space(size: f32) -> AvailableSpace {
        if size.is_finite() {
            AvailableSpace::Definite(size)
        } else {
            AvailableSpace::MaxContent
        }
    }
}

impl Element for FlexContent {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn measure_override(&mut self, available_size: Vec3) -> Vec3 {
        let space = Size {
            width: Self::available_space(available_size.x),
            height: Self::available_space(available_size.y),
        };

        if let Err(err) = self.tree.compute_layout(self.root, space) {
            tracing::warn!(element = %self.base.name, error = %err, "flex layout failed");
            return Vec3::ZERO;
        }

        self.tree
            .get_layout(self.root)
            .map_or(Vec3::ZERO, |layout| {
                Vec3::new(layout.size.width, layout.size.height, 0.0)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_desired_size_sums_items_and_gaps() {
        let mut row = FlexContent::row(&[(100.0, 20.0), (100.0, 30.0), (100.0, 20.0)], 10.0).unwrap();
        row.measure(Vec3::new(f32::INFINITY, 50.0, 0.0));

        assert_eq!(row.item_count(), 3);
        assert_eq!(row.base().desired_size().x, 320.0);
    }

    #[test]
    fn test_column_places_items_one_under_another() {
        let mut column = FlexContent::column(&[(50.0, 40.0), (50.0, 40.0)], 0.0).unwrap();
        column.measure(Vec3::new(50.0, f32::INFINITY, 0.0));

        assert_eq!(column.base().desired_size().y, 80.0);
        let (position, size) = column.item_rect(1).unwrap();
        assert_eq!(position.y, 40.0);
        assert_eq!(size, Vec3::new(50.0, 40.0, 0.0));
        assert!(column.item_rect(2).is_none());
    }

    #[test]
    fn test_empty_row_measures_to_zero_width() {
        let mut row = FlexContent::row(&[], 4.0).unwrap();
        row.measure(Vec3::new(f32::INFINITY, f32::INFINITY, 0.0));
        assert_eq!(row.base().desired_size().x, 0.0);
    }
}
