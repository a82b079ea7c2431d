//! Virtualizing stack of fixed-size items
//!
//! A [`StackPanel`] only realizes the items intersecting its viewport and
//! scrolls itself along its orientation. Hosted in a scroll viewer, it takes
//! over that axis: the viewer forwards translations to it and reads back the
//! extent, offset and bar position it reports.

use std::ops::Range;

use glide_core::{Axis, Vec2, Vec3};

use crate::element::{Element, ElementBase};
use crate::widgets::scroll::{ScrollAnchorInfo, ScrollInfo, ScrollOwner};

/// Items of equal size stacked along one axis
#[derive(Debug)]
pub struct StackPanel {
    base: ElementBase,
    orientation: Axis,
    item_count: usize,
    item_size: Vec3,
    /// Position of the viewport start inside the stack, in virtual pixels
    scroll_position: f32,
    viewport: Vec3,
    anchor_items: bool,
    owner: Option<ScrollOwner>,
}

impl StackPanel {
    pub fn new(orientation: Axis, item_count: usize, item_size: Vec3) -> Self {
        Self {
            base: ElementBase::named("stack_panel"),
            orientation,
            item_count,
            item_size,
            scroll_position: 0.0,
            viewport: Vec3::ZERO,
            anchor_items: true,
            owner: None,
        }
    }

    /// Set the debug name (builder pattern)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.base.name = name.into();
        self
    }

    /// Whether item boundaries are reported as anchors (builder pattern)
    pub fn with_item_anchors(mut self, enabled: bool) -> Self {
        self.anchor_items = enabled;
        self
    }

    pub fn orientation(&self) -> Axis {
        self.orientation
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        self.base.invalidate_measure();
        self.clamp_position();
        self.notify_scroll_info();
        if let Some(owner) = &self.owner {
            owner.invalidate_anchor_info();
        }
    }

    pub fn scroll_position(&self) -> f32 {
        self.scroll_position
    }

    pub fn has_owner(&self) -> bool {
        self.owner.as_ref().is_some_and(ScrollOwner::is_attached)
    }

    fn stack_length(&self) -> f32 {
        self.item_count as f32 * self.item_size[self.orientation]
    }

    fn max_position(&self) -> f32 {
        (self.stack_length() - self.viewport[self.orientation]).max(0.0)
    }

    fn first_visible(&self) -> usize {
        let size = self.item_size[self.orientation];
        if size <= 0.0 {
            return 0;
        }
        ((self.scroll_position / size).floor() as usize).min(self.item_count)
    }

    /// Indices of the items intersecting the viewport
    pub fn visible_items(&self) -> Range<usize> {
        let size = self.item_size[self.orientation];
        if size <= 0.0 {
            return 0..0;
        }
        let end = (self.scroll_position + self.viewport[self.orientation]) / size;
        let last = (end.ceil() as usize).min(self.item_count);
        self.first_visible()..last
    }

    fn clamp_position(&mut self) {
        self.scroll_position = self.scroll_position.clamp(0.0, self.max_position());
    }

    fn move_to(&mut self, position: f32) {
        let previous = self.scroll_position;
        self.scroll_position = position;
        self.clamp_position();
        if self.scroll_position != previous {
            tracing::trace!(
                panel = %self.base.name,
                position = self.scroll_position,
                "stack panel scrolled"
            );
        }
        self.notify_scroll_info();
    }

    fn notify_scroll_info(&self) {
        if let Some(owner) = &self.owner {
            owner.invalidate_scroll_info();
        }
    }
}

impl Element for StackPanel {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn measure_override(&mut self, available_size: Vec3) -> Vec3 {
        let mut desired = self.item_size;
        let available = available_size[self.orientation];
        desired[self.orientation] = if available.is_finite() {
            available.min(self.stack_length())
        } else {
            self.stack_length()
        };
        desired
    }

    fn arrange_override(&mut self, final_size: Vec3) -> Vec3 {
        self.viewport = final_size;
        self.clamp_position();
        self.notify_scroll_info();
        final_size
    }

    fn as_scroll_info(&self) -> Option<&dyn ScrollInfo> {
        Some(self)
    }

    fn as_scroll_info_mut(&mut self) -> Option<&mut dyn ScrollInfo> {
        Some(self)
    }

    fn as_anchor_info(&self) -> Option<&dyn ScrollAnchorInfo> {
        Some(self)
    }

    fn as_anchor_info_mut(&mut self) -> Option<&mut dyn ScrollAnchorInfo> {
        Some(self)
    }
}

impl ScrollInfo for StackPanel {
    fn can_scroll(&self, axis: Axis) -> bool {
        axis == self.orientation
    }

    fn extent(&self) -> Vec3 {
        let mut extent = self.item_size;
        extent[self.orientation] = self.stack_length();
        extent
    }

    fn offset(&self) -> Vec3 {
        let realized_start = self.first_visible() as f32 * self.item_size[self.orientation];
        Vec3::along(self.orientation, -(self.scroll_position - realized_start))
    }

    fn viewport(&self) -> Vec3 {
        self.viewport
    }

    fn scroll_bar_positions(&self) -> Vec3 {
        let max = self.max_position();
        if max <= 0.0 {
            return Vec3::ZERO;
        }
        Vec3::along(self.orientation, self.scroll_position / max)
    }

    fn scroll_to_beginning(&mut self, axis: Axis) {
        if axis == self.orientation {
            self.move_to(0.0);
        }
    }

    fn scroll_to_end(&mut self, axis: Axis) {
        if axis == self.orientation {
            self.move_to(self.max_position());
        }
    }

    fn scroll_of(&mut self, delta: Vec3) {
        let delta = delta[self.orientation];
        if delta != 0.0 {
            self.move_to(self.scroll_position + delta);
        }
    }

    fn set_scroll_owner(&mut self, owner: Option<ScrollOwner>) {
        self.owner = owner;
    }
}

impl ScrollAnchorInfo for StackPanel {
    fn should_anchor(&self, axis: Axis) -> bool {
        self.anchor_items && axis == self.orientation && self.item_size[axis] > 0.0
    }

    /// Distances to the item boundaries around `position`, measured from the
    /// panel's own scroll position
    fn surrounding_anchor_distances(&self, axis: Axis, position: f32) -> Vec2 {
        let size = self.item_size[axis];
        if axis != self.orientation || size <= 0.0 {
            return Vec2::ZERO;
        }

        let position = self.scroll_position + position;
        let previous = (position / size).floor() * size;
        Vec2::new(previous - position, previous + size - position)
    }

    fn set_scroll_owner(&mut self, owner: Option<ScrollOwner>) {
        self.owner = owner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::widgets::scroll::OwnerSignals;
    use crate::widgets::scroll::{ScrollMode, ScrollViewer};
    use glide_core::{FrameTime, TouchEvent};

    fn panel() -> StackPanel {
        StackPanel::new(Axis::Vertical, 10, Vec3::new(80.0, 30.0, 0.0))
    }

    fn arranged(viewport: Vec3) -> StackPanel {
        let mut panel = panel();
        panel.measure(viewport);
        panel.arrange(viewport, false);
        panel
    }

    fn viewer_with_panel() -> ScrollViewer {
        let mut viewer = ScrollViewer::new();
        viewer.set_scroll_mode(ScrollMode::Vertical);
        viewer.set_content(Some(Box::new(panel())));
        let size = Vec3::new(80.0, 100.0, 0.0);
        viewer.measure(size);
        viewer.arrange(size, false);
        viewer
    }

    #[test]
    fn test_extent_covers_every_item() {
        let panel = arranged(Vec3::new(80.0, 100.0, 0.0));
        assert_eq!(panel.extent(), Vec3::new(80.0, 300.0, 0.0));
        assert_eq!(panel.base().desired_size().y, 100.0);
        assert!(panel.can_scroll(Axis::Vertical));
        assert!(!panel.can_scroll(Axis::Horizontal));
    }

    #[test]
    fn test_scroll_of_clamps_to_last_page() {
        let mut panel = arranged(Vec3::new(80.0, 100.0, 0.0));

        panel.scroll_of(Vec3::new(500.0, 45.0, 0.0));
        assert_eq!(panel.scroll_position(), 45.0);
        assert_eq!(panel.offset(), Vec3::new(0.0, -15.0, 0.0));
        assert_eq!(panel.visible_items(), 1..5);

        panel.scroll_of(Vec3::new(0.0, 1000.0, 0.0));
        assert_eq!(panel.scroll_position(), 200.0);
        assert_eq!(panel.scroll_bar_positions(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(panel.visible_items(), 6..10);

        panel.scroll_to_beginning(Axis::Horizontal);
        assert_eq!(panel.scroll_position(), 200.0);
        panel.scroll_to_beginning(Axis::Vertical);
        assert_eq!(panel.scroll_position(), 0.0);
    }

    #[test]
    fn test_anchors_at_item_boundaries() {
        let mut panel = arranged(Vec3::new(80.0, 100.0, 0.0));
        panel.scroll_of(Vec3::new(0.0, 40.0, 0.0));

        assert!(panel.should_anchor(Axis::Vertical));
        assert!(!panel.should_anchor(Axis::Horizontal));
        assert_eq!(
            panel.surrounding_anchor_distances(Axis::Vertical, 0.0),
            Vec2::new(-10.0, 20.0)
        );

        let panel = panel.with_item_anchors(false);
        assert!(!panel.should_anchor(Axis::Vertical));
    }

    #[test]
    fn test_viewer_delegates_its_axis() {
        let mut viewer = viewer_with_panel();
        viewer.scroll_of(Vec3::new(0.0, 50.0, 0.0), true);

        // the viewer keeps its own offset at zero and shows the panel's window
        assert_eq!(viewer.scroll_offsets(), Vec3::ZERO);
        assert_eq!(viewer.content_render_offset().y, -20.0 - 50.0);

        let bar = viewer.scroll_bar(Axis::Vertical);
        assert!((bar.base().render_size().y - 100.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_mode_change_rewinds_panel() {
        let mut viewer = viewer_with_panel();
        viewer.scroll_to_end(Axis::Vertical, true);

        viewer.set_scroll_mode(ScrollMode::HorizontalVertical);
        let info = viewer.content().and_then(|c| c.as_scroll_info()).unwrap();
        assert_eq!(info.scroll_bar_positions(), Vec3::ZERO);
    }

    #[test]
    fn test_reaching_the_end_stops_inertia() {
        let mut viewer = viewer_with_panel();
        viewer.set_deceleration(0.0);
        viewer.scroll_of(Vec3::new(0.0, 100.0, 0.0), true);

        let time = FrameTime::from_secs(0.1);
        viewer.on_preview_touch_down(&mut TouchEvent::down());
        viewer.on_preview_touch_move(&mut TouchEvent::moved(Vec3::new(0.0, -20.0, 0.0)));
        viewer.update(&time);
        assert!((viewer.current_scrolling_speed().y - 200.0).abs() < 1e-2);

        viewer.on_preview_touch_up(&mut TouchEvent::up());
        for _ in 0..5 {
            viewer.update(&time);
        }

        let info = viewer.content().and_then(|c| c.as_scroll_info()).unwrap();
        assert_eq!(info.scroll_bar_positions().y, 1.0);
        assert_eq!(viewer.current_scrolling_speed().y, 0.0);
        assert_eq!(viewer.scroll_offsets(), Vec3::ZERO);
    }

    #[test]
    fn test_owner_notifications_after_viewer_drop_are_ignored() {
        let signals = Rc::new(OwnerSignals::default());
        let mut panel = arranged(Vec3::new(80.0, 100.0, 0.0));
        ScrollInfo::set_scroll_owner(&mut panel, Some(ScrollOwner::new(&signals)));
        assert!(panel.has_owner());

        panel.scroll_of(Vec3::new(0.0, 10.0, 0.0));
        assert!(signals.take_scroll_info());

        drop(signals);
        assert!(!panel.has_owner());
        panel.scroll_of(Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(panel.scroll_position(), 20.0);
    }
}
