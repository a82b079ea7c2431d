//! Scroll viewer with linear deceleration and anchor snapping
//!
//! A [`ScrollViewer`] shows a bounded viewport onto content of any size and
//! moves that content along up to three axes in response to touch drags,
//! mouse wheel notches and programmatic scroll requests.
//!
//! # Example
//!
//! ```rust
//! use glide_core::{FrameTime, Vec3};
//! use glide_layout::prelude::*;
//!
//! let mut viewer = ScrollViewer::new();
//! viewer.set_content(Some(Box::new(SizedBox::new(Vec3::new(300.0, 100.0, 0.0)))));
//!
//! let viewport = Vec3::new(100.0, 100.0, 0.0);
//! viewer.measure(viewport);
//! viewer.arrange(viewport, false);
//!
//! viewer.scroll_of(Vec3::new(50.0, 0.0, 0.0), true);
//! assert_eq!(viewer.scroll_offsets().x, -50.0);
//!
//! viewer.update(&FrameTime::from_secs(1.0 / 60.0));
//! ```
//!
//! # Features
//!
//! - **Axis modes**: any combination from [`ScrollMode`], inactive axes never move
//! - **Inertia**: released drags keep their velocity and decelerate linearly
//! - **Anchors**: content implementing [`ScrollAnchorInfo`] can make the viewer
//!   settle on snap points
//! - **Virtualization**: content implementing [`ScrollInfo`] scrolls itself and
//!   the viewer only forwards translations
//! - **Deferred requests**: scrolls issued before layout are replayed on arrange

mod delegate;
mod gesture;
mod layout;
mod mode;
mod physics;
mod state;

pub use delegate::{ScrollAnchorInfo, ScrollInfo, ScrollOwner};
pub use gesture::GesturePhase;
pub use mode::ScrollMode;
pub use state::ScrollRequest;

use std::rc::Rc;

use glide_core::{Axis, Color, FrameTime, Mat4, Thickness, TouchEvent, Vec3, ZERO_TOLERANCE};

use crate::config::ScrollViewerConfig;
use crate::element::{Element, ElementBase};
use crate::widgets::scroll_bar::ScrollBar;

pub(crate) use delegate::OwnerSignals;
use gesture::GestureState;
use state::ScrollState;

/// Rate at which idle scroll bars lose their color, per second
pub const SCROLL_BAR_HIDING_SPEED: f32 = 1.0;

// ============================================================================
// Scroll Viewer
// ============================================================================

/// Entry of the viewer's visual child list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualChild {
    Content,
    ScrollBar(Axis),
}

/// Viewport onto scrollable content
pub struct ScrollViewer {
    base: ElementBase,
    content: Option<Box<dyn Element>>,
    scroll_bars: [ScrollBar; 3],
    /// Render order; bars always come after the content
    visual_children: Vec<VisualChild>,
    config: ScrollViewerConfig,
    viewport: Vec3,
    state: ScrollState,
    gesture: GestureState,
    /// Wheel delta received since the last update
    pending_wheel: f32,
    signals: Rc<OwnerSignals>,
    on_anchor_info_changed: Option<Box<dyn FnMut()>>,
}

impl Default for ScrollViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollViewer {
    /// Create a viewer with the default configuration
    pub fn new() -> Self {
        Self::with_config(ScrollViewerConfig::default())
    }

    /// Create a viewer from a configuration
    pub fn with_config(config: ScrollViewerConfig) -> Self {
        let mut viewer = Self {
            base: ElementBase::named("scroll_viewer"),
            content: None,
            scroll_bars: Axis::ALL.map(ScrollBar::new),
            visual_children: Axis::ALL.iter().map(|&a| VisualChild::ScrollBar(a)).collect(),
            config: ScrollViewerConfig::default(),
            viewport: Vec3::ZERO,
            state: ScrollState::default(),
            gesture: GestureState::default(),
            pending_wheel: 0.0,
            signals: Rc::new(OwnerSignals::default()),
            on_anchor_info_changed: None,
        };
        for bar in viewer.scroll_bars.iter_mut() {
            bar.measure(Vec3::ZERO);
        }
        viewer.base.clip_to_bounds = true;
        viewer.base.can_be_hit_by_user = viewer.config.touch_scrolling_enabled;
        viewer.apply_config(config);
        viewer
    }

    /// Set the debug name (builder pattern)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.base.name = name.into();
        self
    }

    /// Re-apply every property from a configuration
    ///
    /// Goes through the individual setters, so a NaN deceleration is ignored
    /// and a mode change resets the offsets.
    pub fn apply_config(&mut self, config: ScrollViewerConfig) {
        self.set_scroll_bar_color(config.scroll_bar_color);
        self.set_scroll_bar_fade_alpha(config.scroll_bar_fade_alpha);
        self.set_scroll_bar_thickness(config.scroll_bar_thickness);
        self.set_scroll_start_threshold(config.scroll_start_threshold);
        self.set_deceleration(config.deceleration);
        self.set_touch_scrolling_enabled(config.touch_scrolling_enabled);
        self.set_scroll_sensitivity(config.scroll_sensitivity);
        self.set_mouse_wheel_scroll_sensitivity(config.mouse_wheel_scroll_sensitivity);
        self.set_snap_to_anchors(config.snap_to_anchors);
        self.set_padding(config.padding);
        self.set_scroll_mode(config.scroll_mode);
    }

    /// Snapshot of the current properties
    pub fn config(&self) -> &ScrollViewerConfig {
        &self.config
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn scroll_bar_color(&self) -> Color {
        self.config.scroll_bar_color
    }

    pub fn set_scroll_bar_color(&mut self, color: Color) {
        self.config.scroll_bar_color = color;
    }

    pub fn scroll_bar_fade_alpha(&self) -> f32 {
        self.config.scroll_bar_fade_alpha
    }

    pub fn set_scroll_bar_fade_alpha(&mut self, alpha: f32) {
        self.config.scroll_bar_fade_alpha = alpha;
    }

    pub fn scroll_bar_thickness(&self) -> f32 {
        self.config.scroll_bar_thickness
    }

    pub fn set_scroll_bar_thickness(&mut self, thickness: f32) {
        self.config.scroll_bar_thickness = thickness;
        self.base.invalidate_arrange();
    }

    pub fn scroll_mode(&self) -> ScrollMode {
        self.config.scroll_mode
    }

    /// Change the active axes
    ///
    /// Resets the offsets and sends self-scrolling content back to its
    /// beginning on every axis.
    pub fn set_scroll_mode(&mut self, mode: ScrollMode) {
        if self.config.scroll_mode == mode {
            return;
        }
        tracing::debug!(from = ?self.config.scroll_mode, to = ?mode, "scroll mode changed");
        self.config.scroll_mode = mode;
        self.on_scroll_mode_changed();
    }

    fn on_scroll_mode_changed(&mut self) {
        self.state.offsets = Vec3::ZERO;
        self.state.speed = Vec3::ZERO;
        self.gesture.clear_translation();
        self.pending_wheel = 0.0;

        if let Some(info) = self.scroll_info_mut() {
            for axis in Axis::ALL {
                info.scroll_to_beginning(axis);
            }
        }
        self.process_owner_signals();

        self.base.invalidate_measure();
    }

    pub fn scroll_start_threshold(&self) -> f32 {
        self.config.scroll_start_threshold
    }

    pub fn set_scroll_start_threshold(&mut self, threshold: f32) {
        self.config.scroll_start_threshold = threshold;
    }

    pub fn deceleration(&self) -> f32 {
        self.config.deceleration
    }

    /// Set the deceleration; NaN is ignored
    pub fn set_deceleration(&mut self, deceleration: f32) {
        if deceleration.is_nan() {
            tracing::debug!("ignoring NaN deceleration");
            return;
        }
        self.config.deceleration = deceleration;
    }

    pub fn touch_scrolling_enabled(&self) -> bool {
        self.config.touch_scrolling_enabled
    }

    /// Enable or disable touch scrolling, which also controls hit testing
    pub fn set_touch_scrolling_enabled(&mut self, enabled: bool) {
        if self.config.touch_scrolling_enabled == enabled {
            return;
        }
        self.config.touch_scrolling_enabled = enabled;
        self.base.can_be_hit_by_user = enabled;
    }

    pub fn scroll_sensitivity(&self) -> f32 {
        self.config.scroll_sensitivity
    }

    pub fn set_scroll_sensitivity(&mut self, sensitivity: f32) {
        self.config.scroll_sensitivity = sensitivity;
    }

    pub fn mouse_wheel_scroll_sensitivity(&self) -> f32 {
        self.config.mouse_wheel_scroll_sensitivity
    }

    pub fn set_mouse_wheel_scroll_sensitivity(&mut self, sensitivity: f32) {
        self.config.mouse_wheel_scroll_sensitivity = sensitivity;
    }

    pub fn snap_to_anchors(&self) -> bool {
        self.config.snap_to_anchors
    }

    pub fn set_snap_to_anchors(&mut self, snap: bool) {
        self.config.snap_to_anchors = snap;
    }

    pub fn padding(&self) -> Thickness {
        self.config.padding
    }

    pub fn set_padding(&mut self, padding: Thickness) {
        self.config.padding = padding;
        self.base.invalidate_measure();
    }

    pub fn is_enabled(&self) -> bool {
        self.base.is_enabled
    }

    /// Enable or disable the viewer; disabling hides the bars
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.hide_scroll_bars();
        }
        self.base.is_enabled = enabled;
    }

    pub fn clip_to_bounds(&self) -> bool {
        self.base.clip_to_bounds
    }

    pub fn can_be_hit_by_user(&self) -> bool {
        self.base.can_be_hit_by_user
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Whether the viewer scrolls along `axis` under the current mode
    pub fn can_scroll(&self, axis: Axis) -> bool {
        self.config.scroll_mode.is_active(axis)
    }

    /// Translation currently applied to the content (`<= 0` on scrolled axes)
    pub fn scroll_offsets(&self) -> Vec3 {
        self.state.offsets
    }

    /// Position of the viewport inside the content
    pub fn scroll_position(&self) -> Vec3 {
        -self.state.offsets
    }

    /// Size of the visible area, as of the last arrange
    pub fn viewport(&self) -> Vec3 {
        self.viewport
    }

    pub fn current_scrolling_speed(&self) -> Vec3 {
        self.state.speed
    }

    pub fn is_user_scrolling(&self) -> bool {
        self.gesture.is_user_scrolling()
    }

    pub fn is_touched_down(&self) -> bool {
        self.gesture.is_touched_down()
    }

    /// Translation accumulated for the frame being built
    pub fn last_frame_translation(&self) -> Vec3 {
        self.gesture.frame_translation
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Scroll requests waiting for the next arrange
    pub fn pending_requests(&self) -> &[ScrollRequest] {
        self.state.pending()
    }

    pub fn scroll_bar(&self, axis: Axis) -> &ScrollBar {
        &self.scroll_bars[axis.index()]
    }

    pub fn visual_children(&self) -> &[VisualChild] {
        &self.visual_children
    }

    /// Translation applied to the content's visual
    pub fn content_render_offset(&self) -> Vec3 {
        self.content
            .as_deref()
            .map_or(Vec3::ZERO, |c| c.base().arrange_matrix().translation_vector())
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn content(&self) -> Option<&dyn Element> {
        self.content.as_deref()
    }

    pub fn content_mut(&mut self) -> Option<&mut dyn Element> {
        self.content
            .as_deref_mut()
            .map(|content| content as &mut dyn Element)
    }

    /// Replace the content, returning the previous one detached from the viewer
    pub fn set_content(&mut self, content: Option<Box<dyn Element>>) -> Option<Box<dyn Element>> {
        if self.content.is_none() && content.is_none() {
            return None;
        }

        let mut previous = self.content.take();
        if let Some(old) = previous.as_deref_mut() {
            detach_owner(old);
        }

        self.content = content;
        self.visual_children.retain(|c| *c != VisualChild::Content);
        if self.content.is_some() {
            self.visual_children.push(VisualChild::Content);
        }

        self.hide_scroll_bars();
        self.stop_current_scrolling();
        self.state.offsets = Vec3::ZERO;

        // drop notifications raised by the old content
        self.signals.take_scroll_info();
        self.signals.take_anchor_info();

        let owner = ScrollOwner::new(&self.signals);
        if let Some(content) = self.content.as_deref_mut() {
            if let Some(info) = content.as_scroll_info_mut() {
                info.set_scroll_owner(Some(owner.clone()));
            }
            if let Some(anchors) = content.as_anchor_info_mut() {
                anchors.set_scroll_owner(Some(owner));
            }
        }

        self.visual_children
            .sort_by_key(|child| matches!(child, VisualChild::ScrollBar(_)));
        self.base.invalidate_measure();

        tracing::debug!(
            viewer = %self.base.name,
            content = self.content.as_deref().map(|c| c.base().name.as_str()),
            scroll_info = self.scroll_info().is_some(),
            anchor_info = self.anchor_info().is_some(),
            "scroll viewer content changed"
        );

        previous
    }

    /// Remove the content
    pub fn take_content(&mut self) -> Option<Box<dyn Element>> {
        self.set_content(None)
    }

    fn scroll_info(&self) -> Option<&dyn ScrollInfo> {
        self.content.as_deref().and_then(|c| c.as_scroll_info())
    }

    fn scroll_info_mut(&mut self) -> Option<&mut dyn ScrollInfo> {
        self.content
            .as_deref_mut()
            .and_then(|c| c.as_scroll_info_mut())
    }

    fn anchor_info(&self) -> Option<&dyn ScrollAnchorInfo> {
        self.content.as_deref().and_then(|c| c.as_anchor_info())
    }

    /// Whether the content scrolls `axis` itself
    fn delegates(&self, axis: Axis) -> bool {
        self.scroll_info().is_some_and(|info| info.can_scroll(axis))
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Stop the current motion at its current position
    pub fn stop_current_scrolling(&mut self) {
        self.state.speed = Vec3::ZERO;
    }

    /// Make the bars of the active axes fully transparent
    pub fn hide_scroll_bars(&mut self) {
        self.set_scroll_bars_color(Color::TRANSPARENT);
    }

    fn set_scroll_bars_color(&mut self, color: Color) {
        for &axis in self.config.scroll_mode.axes() {
            self.scroll_bars[axis.index()].set_bar_color(color);
        }
    }

    pub fn scroll_to_beginning(&mut self, axis: Axis, stop_scrolling: bool) {
        self.scroll_to_extremity(axis, stop_scrolling, true);
    }

    pub fn scroll_to_end(&mut self, axis: Axis, stop_scrolling: bool) {
        self.scroll_to_extremity(axis, stop_scrolling, false);
    }

    fn scroll_to_extremity(&mut self, axis: Axis, stop_scrolling: bool, beginning: bool) {
        if stop_scrolling {
            self.hide_scroll_bars();
            self.stop_current_scrolling();
        }

        self.state.manually_scrolled = true;

        if !self.can_scroll(axis) {
            return;
        }

        if self.delegates(axis) {
            if let Some(info) = self.scroll_info_mut() {
                if beginning {
                    info.scroll_to_beginning(axis);
                } else {
                    info.scroll_to_end(axis);
                }
            }
            self.process_owner_signals();
        } else {
            let direction = if beginning { -1.0 } else { 1.0 };
            self.scroll_of(Vec3::along(axis, direction * f32::INFINITY), stop_scrolling);
        }
    }

    /// Show the content position `position` (in virtual pixels)
    pub fn scroll_to(&mut self, position: Vec3, stop_scrolling: bool) {
        if stop_scrolling {
            self.hide_scroll_bars();
            self.stop_current_scrolling();
        }

        self.state.manually_scrolled = true;

        if self.content.is_none() {
            return;
        }

        let corrected = self.config.scroll_mode.filter(position);
        if let Some(info) = self.scroll_info_mut() {
            for axis in Axis::ALL {
                info.scroll_to_beginning(axis);
            }
            info.scroll_of(corrected);
        }
        self.process_owner_signals();

        if self.base.is_arrange_valid() {
            self.update_scroll_offsets(-position);
            self.update_content_arrange_matrix();
        } else {
            self.base.invalidate_arrange();
            self.state.queue(ScrollRequest::Absolute(position));
        }
    }

    /// Move the content by `translation` (in virtual pixels)
    pub fn scroll_of(&mut self, translation: Vec3, stop_scrolling: bool) {
        self.state.manually_scrolled = true;
        self.scroll_of_internal(translation, stop_scrolling);
    }

    pub(crate) fn scroll_of_internal(&mut self, translation: Vec3, stop_scrolling: bool) {
        if stop_scrolling {
            self.hide_scroll_bars();
            self.stop_current_scrolling();
        }

        if self.content.is_none() {
            return;
        }

        let corrected = self.config.scroll_mode.filter(translation);
        if let Some(info) = self.scroll_info_mut() {
            info.scroll_of(corrected);
        }
        self.process_owner_signals();

        if self.base.is_arrange_valid() {
            self.update_scroll_offsets(self.state.offsets - translation);
            self.update_content_arrange_matrix();
        } else {
            self.base.invalidate_arrange();
            self.state.queue(ScrollRequest::Relative(translation));
        }
    }

    // =========================================================================
    // Content notifications
    // =========================================================================

    /// The content's offset, extent or viewport changed
    pub fn invalidate_scroll_info(&mut self) {
        let Some(positions) = self.scroll_info().map(|info| info.scroll_bar_positions()) else {
            return;
        };

        // stop on axes that reached an extremity
        for i in 0..3 {
            if positions[i] < ZERO_TOLERANCE
                || positions[i] > 1.0 - ZERO_TOLERANCE
            {
                self.state.speed[i] = 0.0;
            }
        }

        self.update_scroll_bars_size();
        self.update_content_arrange_matrix();
    }

    /// The content's anchors changed
    pub fn invalidate_anchor_info(&mut self) {
        tracing::trace!(viewer = %self.base.name, "anchor info invalidated");
        if let Some(callback) = self.on_anchor_info_changed.as_mut() {
            callback();
        }
    }

    /// Hook run on anchor invalidation (builder pattern)
    pub fn on_anchor_info_changed<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_anchor_info_changed = Some(Box::new(callback));
        self
    }

    /// Handle notifications raised by the content through its owner handle
    fn process_owner_signals(&mut self) {
        if self.signals.take_scroll_info() {
            self.invalidate_scroll_info();
        }
        if self.signals.take_anchor_info() {
            self.invalidate_anchor_info();
        }
    }
}

fn detach_owner(content: &mut dyn Element) {
    if let Some(info) = content.as_scroll_info_mut() {
        info.set_scroll_owner(None);
    }
    if let Some(anchors) = content.as_anchor_info_mut() {
        anchors.set_scroll_owner(None);
    }
}

impl Drop for ScrollViewer {
    fn drop(&mut self) {
        if let Some(content) = self.content.as_deref_mut() {
            detach_owner(content);
        }
    }
}

impl Element for ScrollViewer {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn measure_override(&mut self, available_size: Vec3) -> Vec3 {
        self.measure_content(available_size)
    }

    fn arrange_override(&mut self, final_size: Vec3) -> Vec3 {
        self.arrange_content(final_size)
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Element> {
        let mut content = self.content.as_deref_mut();
        let mut bars: Vec<Option<&mut ScrollBar>> = self.scroll_bars.iter_mut().map(Some).collect();

        let mut children: Vec<&mut dyn Element> = Vec::with_capacity(self.visual_children.len());
        for child in &self.visual_children {
            match *child {
                VisualChild::Content => {
                    if let Some(content) = content.take() {
                        children.push(content);
                    }
                }
                VisualChild::ScrollBar(axis) => {
                    if let Some(bar) = bars[axis.index()].take() {
                        children.push(bar);
                    }
                }
            }
        }
        children
    }

    fn update(&mut self, time: &FrameTime) {
        ScrollViewer::update(self, time);
    }

    fn on_touch_leave(&mut self, _event: &mut TouchEvent) {
        self.gesture.leave();
    }

    fn update_world_matrix(&mut self, parent_world: &Mat4, parent_changed: bool) {
        self.update_world_matrices(parent_world, parent_changed);
    }
}
