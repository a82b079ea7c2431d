//! Input events consumed by scrollable elements
//!
//! Events are delivered by the host toolkit. Handlers mark an event as
//! handled to stop it from propagating further down the tree.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::{Vec2, Vec3};

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const TOUCH_DOWN: EventType = 1;
    pub const TOUCH_UP: EventType = 2;
    pub const TOUCH_MOVE: EventType = 3;
    pub const TOUCH_ENTER: EventType = 4;
    pub const TOUCH_LEAVE: EventType = 5;
    /// Accumulated touch translation crossed the scroll start threshold
    pub const SCROLL_START: EventType = 30;
    pub const MOUSE_WHEEL: EventType = 32;
}

/// What the finger did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

impl TouchAction {
    pub fn event_type(self) -> EventType {
        match self {
            TouchAction::Down => event_types::TOUCH_DOWN,
            TouchAction::Move => event_types::TOUCH_MOVE,
            TouchAction::Up => event_types::TOUCH_UP,
        }
    }
}

/// A touch (or pointer drag) event
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    /// Position in normalized screen coordinates
    pub screen_position: Vec2,
    /// Translation since the previous event, in screen coordinates
    pub screen_translation: Vec2,
    /// Translation since the previous event, in virtual pixels
    pub world_translation: Vec3,
    pub timestamp: Duration,
    /// Set by a handler to stop propagation to descendants
    pub handled: bool,
}

impl TouchEvent {
    pub fn new(action: TouchAction) -> Self {
        Self {
            action,
            screen_position: Vec2::ZERO,
            screen_translation: Vec2::ZERO,
            world_translation: Vec3::ZERO,
            timestamp: Duration::ZERO,
            handled: false,
        }
    }

    pub fn down() -> Self {
        Self::new(TouchAction::Down)
    }

    pub fn up() -> Self {
        Self::new(TouchAction::Up)
    }

    /// A move event carrying a world-space translation
    pub fn moved(world_translation: Vec3) -> Self {
        Self {
            world_translation,
            ..Self::new(TouchAction::Move)
        }
    }

    pub fn with_timestamp(mut self, timestamp: Duration) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.handled = true;
    }

    /// Fresh copy for synthetic leave notifications
    ///
    /// The world translation and the handled flag are not carried over.
    pub fn leave_copy(&self) -> Self {
        Self {
            action: self.action,
            screen_position: self.screen_position,
            screen_translation: self.screen_translation,
            world_translation: Vec3::ZERO,
            timestamp: self.timestamp,
            handled: false,
        }
    }
}

/// Mouse wheel notch delta (positive = away from the user)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelEvent {
    pub delta: f32,
    pub handled: bool,
}

impl WheelEvent {
    pub fn new(delta: f32) -> Self {
        Self {
            delta,
            handled: false,
        }
    }
}

/// Timing information for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Time since the previous frame
    pub elapsed: Duration,
    /// Time since the start of the run
    pub total: Duration,
}

impl FrameTime {
    pub fn new(elapsed: Duration, total: Duration) -> Self {
        Self { elapsed, total }
    }

    /// A frame of `seconds` length starting at zero
    pub fn from_secs(seconds: f32) -> Self {
        Self::new(Duration::from_secs_f32(seconds), Duration::ZERO)
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_copy_resets_handled() {
        let mut event = TouchEvent::moved(Vec3::new(3.0, 0.0, 0.0))
            .with_timestamp(Duration::from_millis(16));
        event.stop_propagation();

        let copy = event.leave_copy();
        assert!(!copy.handled);
        assert_eq!(copy.timestamp, Duration::from_millis(16));
        assert_eq!(copy.world_translation, Vec3::ZERO);
    }

    #[test]
    fn test_frame_time_seconds() {
        let frame = FrameTime::from_secs(0.5);
        assert!((frame.elapsed_secs() - 0.5).abs() < 1e-6);
    }
}
