//! Capabilities a scroll viewer's content may provide
//!
//! Content that virtualizes its own children implements [`ScrollInfo`] and
//! scrolls itself along the axes it reports through `can_scroll`. Content that
//! wants the viewer to settle on snap points implements [`ScrollAnchorInfo`].
//! The two are independent: an element may provide either, both or neither.
//!
//! A viewer hands its self-scrolling content a [`ScrollOwner`]. The owner is a
//! weak back-reference: it never keeps the viewer alive, and notifications sent
//! after the viewer is gone are dropped.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use glide_core::{Axis, Vec2, Vec3};

/// Self-managed scrolling
pub trait ScrollInfo {
    /// Whether the content scrolls itself along `axis`
    fn can_scroll(&self, axis: Axis) -> bool;

    /// Total size of the scrollable content
    fn extent(&self) -> Vec3;

    /// Translation the viewer applies to the content's visual
    fn offset(&self) -> Vec3;

    /// Size of the visible area
    fn viewport(&self) -> Vec3;

    /// Position of each scroll bar as a ratio in `[0, 1]`
    fn scroll_bar_positions(&self) -> Vec3;

    fn scroll_to_beginning(&mut self, axis: Axis);

    fn scroll_to_end(&mut self, axis: Axis);

    /// Move the visible window by `delta` virtual pixels
    fn scroll_of(&mut self, delta: Vec3);

    /// Attach (or detach with `None`) the viewer owning this content
    fn set_scroll_owner(&mut self, owner: Option<ScrollOwner>);
}

/// Snap points
pub trait ScrollAnchorInfo {
    /// Whether the viewer should settle on anchors along `axis`
    fn should_anchor(&self, axis: Axis) -> bool;

    /// Signed distances from `position` to the previous (`x`) and next (`y`)
    /// anchors along `axis`
    fn surrounding_anchor_distances(&self, axis: Axis, position: f32) -> Vec2;

    /// Attach (or detach with `None`) the viewer owning this content
    fn set_scroll_owner(&mut self, owner: Option<ScrollOwner>);
}

/// Invalidation flags raised by content and drained by the viewer
#[derive(Debug, Default)]
pub(crate) struct OwnerSignals {
    scroll_info: Cell<bool>,
    anchor_info: Cell<bool>,
}

impl OwnerSignals {
    pub(crate) fn take_scroll_info(&self) -> bool {
        self.scroll_info.replace(false)
    }

    pub(crate) fn take_anchor_info(&self) -> bool {
        self.anchor_info.replace(false)
    }
}

/// Non-owning handle from content back to its scroll viewer
#[derive(Debug, Clone)]
pub struct ScrollOwner {
    signals: Weak<OwnerSignals>,
}

impl ScrollOwner {
    pub(crate) fn new(signals: &Rc<OwnerSignals>) -> Self {
        Self {
            signals: Rc::downgrade(signals),
        }
    }

    /// Offset, extent or viewport of the content changed
    pub fn invalidate_scroll_info(&self) {
        if let Some(signals) = self.signals.upgrade() {
            signals.scroll_info.set(true);
        }
    }

    /// Anchor positions of the content changed
    pub fn invalidate_anchor_info(&self) {
        if let Some(signals) = self.signals.upgrade() {
            signals.anchor_info.set(true);
        }
    }

    /// Whether the owning viewer is still alive
    pub fn is_attached(&self) -> bool {
        self.signals.strong_count() > 0
    }
}
