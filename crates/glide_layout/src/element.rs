//! Element contract for the measure/arrange layout pass
//!
//! Every node in a Glide tree implements [`Element`]. The shared bookkeeping
//! (margins, desired and render sizes, validity flags, transforms, touch state)
//! lives in an [`ElementBase`] that each element embeds and exposes through
//! [`Element::base`] / [`Element::base_mut`]. Elements only implement the
//! `*_override` hooks; margins and validity are handled by the provided
//! [`Element::measure`] and [`Element::arrange`].
//!
//! Sizes passed to `measure` may be infinite on an axis, meaning the parent
//! does not bound the element in that direction.

use glide_core::{FrameTime, Mat4, Thickness, TouchEvent, Vec3};

use crate::widgets::scroll::{ScrollAnchorInfo, ScrollInfo};

/// Layout and interaction state shared by every element
#[derive(Debug, Clone)]
pub struct ElementBase {
    /// Debug name
    pub name: String,
    /// Space reserved around the element by its parent
    pub margin: Thickness,
    /// Whether the element takes part in updates and input
    pub is_enabled: bool,
    /// Whether a finger is currently over the element
    pub is_touched: bool,
    /// Whether hit testing may select this element
    pub can_be_hit_by_user: bool,
    /// Whether drawing is clipped to the element's render size
    pub clip_to_bounds: bool,
    desired_size: Vec3,
    desired_size_with_margins: Vec3,
    render_size: Vec3,
    is_measure_valid: bool,
    is_arrange_valid: bool,
    arrange_matrix: Mat4,
    world_matrix: Mat4,
    arrange_changed: bool,
}

impl Default for ElementBase {
    fn default() -> Self {
        Self {
            name: String::new(),
            margin: Thickness::ZERO,
            is_enabled: true,
            is_touched: false,
            can_be_hit_by_user: false,
            clip_to_bounds: false,
            desired_size: Vec3::ZERO,
            desired_size_with_margins: Vec3::ZERO,
            render_size: Vec3::ZERO,
            is_measure_valid: false,
            is_arrange_valid: false,
            arrange_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            arrange_changed: true,
        }
    }
}

impl ElementBase {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Size requested by the last measure, margins excluded
    pub fn desired_size(&self) -> Vec3 {
        self.desired_size
    }

    /// Size requested by the last measure, margins included
    pub fn desired_size_with_margins(&self) -> Vec3 {
        self.desired_size_with_margins
    }

    /// Size granted by the last arrange, margins excluded
    pub fn render_size(&self) -> Vec3 {
        self.render_size
    }

    pub fn is_measure_valid(&self) -> bool {
        self.is_measure_valid
    }

    pub fn is_arrange_valid(&self) -> bool {
        self.is_arrange_valid
    }

    /// Force a new measure (and therefore a new arrange)
    pub fn invalidate_measure(&mut self) {
        self.is_measure_valid = false;
        self.is_arrange_valid = false;
    }

    /// Force a new arrange
    pub fn invalidate_arrange(&mut self) {
        self.is_arrange_valid = false;
    }

    /// Local transform applied by the parent (e.g. scroll translation)
    pub fn arrange_matrix(&self) -> Mat4 {
        self.arrange_matrix
    }

    pub fn set_arrange_matrix(&mut self, matrix: Mat4) {
        self.arrange_matrix = matrix;
        self.arrange_changed = true;
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    pub fn set_world_matrix(&mut self, matrix: Mat4) {
        self.world_matrix = matrix;
    }

    /// Request a world matrix refresh on the next transform pass
    pub fn mark_arrange_changed(&mut self) {
        self.arrange_changed = true;
    }

    pub fn arrange_changed(&self) -> bool {
        self.arrange_changed
    }

    pub fn take_arrange_changed(&mut self) -> bool {
        std::mem::take(&mut self.arrange_changed)
    }
}

/// A node of the layout tree
pub trait Element {
    fn base(&self) -> &ElementBase;

    fn base_mut(&mut self) -> &mut ElementBase;

    /// Compute the desired size for the given available size (margins removed)
    fn measure_override(&mut self, available_size: Vec3) -> Vec3;

    /// Lay out the element inside `final_size` (margins removed) and return
    /// the size actually used
    fn arrange_override(&mut self, final_size: Vec3) -> Vec3 {
        final_size
    }

    /// Visual children in render order (later children draw on top)
    fn children_mut(&mut self) -> Vec<&mut dyn Element> {
        Vec::new()
    }

    /// Per-frame update
    fn update(&mut self, _time: &FrameTime) {}

    /// Called when a finger leaves the element
    fn on_touch_leave(&mut self, _event: &mut TouchEvent) {}

    /// Self-scrolling capability, when the element virtualizes its own content
    fn as_scroll_info(&self) -> Option<&dyn ScrollInfo> {
        None
    }

    fn as_scroll_info_mut(&mut self) -> Option<&mut dyn ScrollInfo> {
        None
    }

    /// Anchor capability, when the element exposes snap points
    fn as_anchor_info(&self) -> Option<&dyn ScrollAnchorInfo> {
        None
    }

    fn as_anchor_info_mut(&mut self) -> Option<&mut dyn ScrollAnchorInfo> {
        None
    }

    /// Measure with margins: stores the desired size on the base
    fn measure(&mut self, available_size_with_margins: Vec3) {
        let margin = self.base().margin;
        let desired = self.measure_override(margin.deflate(available_size_with_margins));

        let base = self.base_mut();
        base.desired_size = desired;
        base.desired_size_with_margins = margin.inflate(desired);
        base.is_measure_valid = true;
    }

    /// Arrange with margins: stores the render size on the base
    fn arrange(&mut self, final_size_with_margins: Vec3, is_collapsed: bool) {
        let final_size = if is_collapsed {
            Vec3::ZERO
        } else {
            self.base().margin.deflate(final_size_with_margins)
        };
        let render_size = self.arrange_override(final_size);

        let base = self.base_mut();
        base.render_size = render_size;
        base.is_measure_valid = true;
        base.is_arrange_valid = true;
        base.arrange_changed = true;
    }

    /// Deliver a touch-leave notification
    fn raise_touch_leave(&mut self, event: &mut TouchEvent) {
        self.base_mut().is_touched = false;
        self.on_touch_leave(event);
    }

    /// Recompute world matrices below a parent transform
    fn update_world_matrix(&mut self, parent_world: &Mat4, parent_changed: bool) {
        let changed = self.base_mut().take_arrange_changed() || parent_changed;
        if changed {
            let world = parent_world.mul(&self.base().arrange_matrix);
            self.base_mut().world_matrix = world;
        }

        let world = self.base().world_matrix;
        for child in self.children_mut() {
            child.update_world_matrix(&world, changed);
        }
    }
}

/// Send a synthetic touch-leave to every touched descendant of `root`
///
/// Depth-first, parents before their children, siblings in render order.
/// Untouched elements are skipped together with their subtree. The walk uses
/// an explicit stack so deep trees do not grow the call stack.
pub fn raise_leave_to_touched_descendants(root: &mut dyn Element, event: &TouchEvent) -> usize {
    let mut notified = 0;
    let mut stack = root.children_mut();
    stack.reverse();

    while let Some(child) = stack.pop() {
        if !child.base().is_touched {
            continue;
        }

        let mut leave = event.leave_copy();
        child.raise_touch_leave(&mut leave);
        notified += 1;

        let mut grandchildren = child.children_mut();
        grandchildren.reverse();
        stack.extend(grandchildren);
    }

    notified
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::TouchAction;

    struct Probe {
        base: ElementBase,
        size: Vec3,
        children: Vec<Probe>,
        leaves: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
    }

    impl Probe {
        fn new(name: &str, log: &std::rc::Rc<std::cell::RefCell<Vec<String>>>) -> Self {
            Self {
                base: ElementBase::named(name),
                size: Vec3::new(10.0, 20.0, 0.0),
                children: Vec::new(),
                leaves: log.clone(),
            }
        }

        fn touched(mut self) -> Self {
            self.base.is_touched = true;
            self
        }

        fn with_child(mut self, child: Probe) -> Self {
            self.children.push(child);
            self
        }
    }

    impl Element for Probe {
        fn base(&self) -> &ElementBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ElementBase {
            &mut self.base
        }

        fn measure_override(&mut self, _available_size: Vec3) -> Vec3 {
            self.size
        }

        fn children_mut(&mut self) -> Vec<&mut dyn Element> {
            let mut out: Vec<&mut dyn Element> = Vec::new();
            for child in self.children.iter_mut() {
                out.push(child);
            }
            out
        }

        fn on_touch_leave(&mut self, event: &mut TouchEvent) {
            assert!(!event.handled);
            self.leaves.borrow_mut().push(self.base.name.clone());
        }
    }

    #[test]
    fn test_measure_adds_margins() {
        let log = Default::default();
        let mut probe = Probe::new("leaf", &log);
        probe.base.margin = Thickness::uniform(5.0);

        probe.measure(Vec3::new(100.0, 100.0, 0.0));
        assert_eq!(probe.base.desired_size(), Vec3::new(10.0, 20.0, 0.0));
        assert_eq!(
            probe.base.desired_size_with_margins(),
            Vec3::new(20.0, 30.0, 0.0)
        );
        assert!(probe.base.is_measure_valid());
        assert!(!probe.base.is_arrange_valid());
    }

    #[test]
    fn test_arrange_removes_margins_and_validates() {
        let log = Default::default();
        let mut probe = Probe::new("leaf", &log);
        probe.base.margin = Thickness::uniform(5.0);

        probe.arrange(Vec3::new(50.0, 40.0, 0.0), false);
        assert_eq!(probe.base.render_size(), Vec3::new(40.0, 30.0, 0.0));
        assert!(probe.base.is_arrange_valid());

        probe.base.invalidate_measure();
        assert!(!probe.base.is_arrange_valid());

        probe.arrange(Vec3::new(50.0, 40.0, 0.0), true);
        assert_eq!(probe.base.render_size(), Vec3::ZERO);
    }

    #[test]
    fn test_touch_leave_reaches_touched_descendants_depth_first() {
        let log: std::rc::Rc<std::cell::RefCell<Vec<String>>> = Default::default();
        let mut root = Probe::new("root", &log)
            .with_child(
                Probe::new("a", &log)
                    .touched()
                    .with_child(Probe::new("a1", &log).touched())
                    .with_child(Probe::new("a2", &log)),
            )
            .with_child(
                // untouched parent hides its touched child
                Probe::new("b", &log).with_child(Probe::new("b1", &log).touched()),
            )
            .with_child(Probe::new("c", &log).touched());

        let event = TouchEvent::new(TouchAction::Up);
        let notified = raise_leave_to_touched_descendants(&mut root, &event);

        assert_eq!(notified, 3);
        assert_eq!(*log.borrow(), vec!["a", "a1", "c"]);
        assert!(!root.children[0].base.is_touched);
        assert!(!root.children[0].children[0].base.is_touched);
        assert!(root.children[1].children[0].base.is_touched);
    }

    #[test]
    fn test_world_matrix_composes_arrange_offsets() {
        let log = Default::default();
        let mut root = Probe::new("root", &log).with_child(Probe::new("child", &log));
        root.base
            .set_arrange_matrix(Mat4::translation(Vec3::new(10.0, 0.0, 0.0)));
        root.children[0]
            .base
            .set_arrange_matrix(Mat4::translation(Vec3::new(0.0, 5.0, 0.0)));

        root.update_world_matrix(&Mat4::IDENTITY, true);
        assert_eq!(
            root.children[0].base.world_matrix().translation_vector(),
            Vec3::new(10.0, 5.0, 0.0)
        );
        assert!(!root.base.arrange_changed());
    }
}
