//! Touch and wheel gesture tracking

use glide_core::event_types::*;
use glide_core::{Axis, TouchEvent, Vec3, WheelEvent};

use crate::element::raise_leave_to_touched_descendants;
use crate::stateful::{StateTracker, StateTransitions};

use super::{ScrollMode, ScrollViewer};

/// Where the finger is in a scroll gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// No finger on the viewer
    #[default]
    Idle,
    /// Finger down, below the scroll start threshold
    TouchedDown,
    /// Finger dragging the content
    Scrolling,
}

impl StateTransitions for GesturePhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (_, TOUCH_DOWN) => Some(GesturePhase::TouchedDown),
            (GesturePhase::TouchedDown, SCROLL_START) => Some(GesturePhase::Scrolling),
            (GesturePhase::TouchedDown | GesturePhase::Scrolling, TOUCH_UP | TOUCH_LEAVE) => {
                Some(GesturePhase::Idle)
            }
            _ => None,
        }
    }
}

/// Per-viewer gesture bookkeeping
#[derive(Debug, Clone)]
pub(crate) struct GestureState {
    phase: StateTracker<GesturePhase>,
    /// Projected touch translation since the finger went down
    pub accumulated: Vec3,
    /// Translation to commit on the next update
    pub frame_translation: Vec3,
    /// A wheel notch drives the current frame
    pub wheel_impulse: bool,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            phase: StateTracker::new(GesturePhase::Idle),
            accumulated: Vec3::ZERO,
            frame_translation: Vec3::ZERO,
            wheel_impulse: false,
        }
    }
}

impl GestureState {
    pub fn phase(&self) -> GesturePhase {
        self.phase.current()
    }

    pub fn is_touched_down(&self) -> bool {
        !self.phase.is_in(GesturePhase::Idle)
    }

    pub fn is_touch_scrolling(&self) -> bool {
        self.phase.is_in(GesturePhase::Scrolling)
    }

    pub fn is_user_scrolling(&self) -> bool {
        self.is_touch_scrolling() || self.wheel_impulse
    }

    pub fn touch_down(&mut self) {
        self.accumulated = Vec3::ZERO;
        self.phase.send(TOUCH_DOWN);
    }

    pub fn release(&mut self) {
        self.phase.send(TOUCH_UP);
    }

    pub fn leave(&mut self) {
        self.phase.send(TOUCH_LEAVE);
    }

    /// Forget translation gathered under a previous scroll mode
    pub fn clear_translation(&mut self) {
        self.accumulated = Vec3::ZERO;
        self.frame_translation = Vec3::ZERO;
        self.wheel_impulse = false;
    }

    /// Latch user scrolling; returns false when already latched
    pub fn start_scrolling(&mut self) -> bool {
        self.phase.send(SCROLL_START)
    }
}

// ============================================================================
// Input handlers
// ============================================================================

impl ScrollViewer {
    /// A finger went down on the viewer or one of its descendants
    pub fn on_preview_touch_down(&mut self, _event: &mut TouchEvent) {
        self.base.is_touched = true;
        self.stop_current_scrolling();
        self.gesture.touch_down();
    }

    /// A finger entered the viewer while already down
    pub fn on_touch_enter(&mut self, _event: &mut TouchEvent) {
        self.base.is_touched = true;
        self.stop_current_scrolling();
        self.gesture.accumulated = Vec3::ZERO;
    }

    /// A finger moved over the viewer
    pub fn on_preview_touch_move(&mut self, event: &mut TouchEvent) {
        let mode = self.config.scroll_mode;
        if mode == ScrollMode::None
            || !self.config.touch_scrolling_enabled
            || !self.gesture.is_touched_down()
        {
            return;
        }

        let translation = event.world_translation * self.config.scroll_sensitivity;
        let mut delta = Vec3::ZERO;
        for &axis in mode.axes() {
            delta[axis] = -translation[axis];
        }
        self.gesture.frame_translation += delta;
        self.gesture.accumulated += delta;

        if !self.gesture.is_touch_scrolling()
            && self.gesture.accumulated.length() > self.config.scroll_start_threshold
            && self.gesture.start_scrolling()
        {
            // catch up with the distance covered below the threshold
            self.gesture.frame_translation = self.gesture.accumulated;
            tracing::debug!(
                viewer = %self.base.name,
                accumulated = ?self.gesture.accumulated,
                "touch scrolling started"
            );
        }

        if self.gesture.is_touch_scrolling() {
            event.handled = true;
        }
    }

    /// A finger was lifted
    pub fn on_preview_touch_up(&mut self, event: &mut TouchEvent) {
        if self.gesture.is_touch_scrolling() {
            event.handled = true;
            let notified = raise_leave_to_touched_descendants(self, event);
            tracing::debug!(viewer = %self.base.name, notified, "touch scrolling ended");
        }

        self.base.is_touched = false;
        self.gesture.release();
    }

    /// Queue a wheel notch for the next update
    pub fn on_mouse_wheel(&mut self, event: &mut WheelEvent) {
        self.pending_wheel += event.delta;
    }

    /// Turn a wheel delta into a vertical translation for this frame
    pub fn wheel_scroll(&mut self, delta: f32) {
        let sensitivity = self.config.mouse_wheel_scroll_sensitivity;
        if delta == 0.0 || sensitivity == 0.0 || !self.can_scroll(Axis::Vertical) {
            return;
        }

        let translation = -delta * sensitivity;
        self.gesture.frame_translation.y = translation;
        self.state.speed.y = translation;
        self.gesture.wheel_impulse = true;
    }
}
