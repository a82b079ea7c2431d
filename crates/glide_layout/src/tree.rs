//! Layout tree management

use slotmap::{new_key_type, SlotMap};
use taffy::prelude::*;

use crate::error::LayoutError;

new_key_type! {
    pub struct LayoutNodeId;
}

/// Maps between Glide node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree,
    node_map: SlotMap<LayoutNodeId, NodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
        }
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId, LayoutError> {
        let taffy_node = self.taffy.new_leaf(style)?;
        Ok(self.node_map.insert(taffy_node))
    }

    /// Set the style for a node
    pub fn set_style(&mut self, id: LayoutNodeId, style: Style) -> Result<(), LayoutError> {
        let taffy_node = self.taffy_node(id)?;
        self.taffy.set_style(taffy_node, style)?;
        Ok(())
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) -> Result<(), LayoutError> {
        let parent_node = self.taffy_node(parent)?;
        let child_node = self.taffy_node(child)?;
        self.taffy.add_child(parent_node, child_node)?;
        Ok(())
    }

    /// Number of direct children of a node
    pub fn child_count(&self, id: LayoutNodeId) -> usize {
        self.node_map
            .get(id)
            .map_or(0, |&taffy_node| self.taffy.child_count(taffy_node))
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute_layout(
        &mut self,
        root: LayoutNodeId,
        available_space: Size<AvailableSpace>,
    ) -> Result<(), LayoutError> {
        let taffy_node = self.taffy_node(root)?;
        self.taffy.compute_layout(taffy_node, available_space)?;
        Ok(())
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Remove a node
    pub fn remove_node(&mut self, id: LayoutNodeId) {
        if let Some(taffy_node) = self.node_map.remove(id) {
            let _ = self.taffy.remove(taffy_node);
        }
    }

    fn taffy_node(&self, id: LayoutNodeId) -> Result<NodeId, LayoutError> {
        self.node_map
            .get(id)
            .copied()
            .ok_or(LayoutError::UnknownNode(id))
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::LayoutStyle;

    #[test]
    fn test_row_layout_sums_children() {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(LayoutStyle::flex_row()).unwrap();
        for _ in 0..3 {
            let child = tree.create_node(LayoutStyle::fixed_size(40.0, 10.0)).unwrap();
            tree.add_child(root, child).unwrap();
        }
        assert_eq!(tree.child_count(root), 3);

        tree.compute_layout(root, Size::MAX_CONTENT).unwrap();
        let layout = tree.get_layout(root).unwrap();
        assert_eq!(layout.size.width, 120.0);
        assert_eq!(layout.size.height, 10.0);
    }

    #[test]
    fn test_removed_node_is_unknown() {
        let mut tree = LayoutTree::new();
        let node = tree.create_node(LayoutStyle::flex_row()).unwrap();
        tree.remove_node(node);

        assert!(tree.get_layout(node).is_none());
        assert!(matches!(
            tree.compute_layout(node, Size::MAX_CONTENT),
            Err(LayoutError::UnknownNode(_))
        ));
    }
}
