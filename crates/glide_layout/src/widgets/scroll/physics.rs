//! Per-frame motion integration
//!
//! Each update turns the gesture state into a translation, decelerates the
//! velocity, commits the translation to the offsets and fades idle bars.

use glide_core::{Axis, Color, FrameTime, Vec2, Vec3, ZERO_TOLERANCE};

use super::{ScrollViewer, SCROLL_BAR_HIDING_SPEED};

/// Velocity under which a snap may settle exactly on its anchor
const SNAP_SETTLE_SPEED: f32 = 5.0;
/// Distance under which a snap may settle exactly on its anchor
const SNAP_SETTLE_DISTANCE: f32 = 1.0;
/// Snapping velocity per pixel of remaining distance
const SNAP_STIFFNESS: f32 = 5.0;

/// Reduce `speed` toward zero by `amount`, keeping its sign
pub(crate) fn decelerate(speed: f32, amount: f32) -> f32 {
    speed.signum() * (speed.abs() - amount).max(0.0)
}

/// Which of the surrounding anchors to settle on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Previous,
    Next,
}

impl ScrollViewer {
    /// Advance the viewer by one frame
    pub fn update(&mut self, time: &FrameTime) {
        if !self.base.is_enabled {
            return;
        }

        let dt = time.elapsed_secs();
        if dt < ZERO_TOLERANCE {
            return;
        }

        self.process_owner_signals();

        let wheel = std::mem::take(&mut self.pending_wheel);
        if wheel != 0.0 {
            self.wheel_scroll(wheel);
        }

        let mode = self.config.scroll_mode;
        self.gesture.frame_translation = mode.filter(self.gesture.frame_translation);

        if self.is_user_scrolling() || self.state.manually_scrolled {
            self.state.manually_scrolled = false;
            self.state.clear_snapping();

            if self.is_user_scrolling() {
                self.state.speed = self.gesture.frame_translation / dt;
            }
        } else {
            self.gesture.frame_translation = self.state.speed * dt;

            if self.config.snap_to_anchors && self.anchor_info().is_some() {
                self.snap_to_anchors_step(dt);
            }
        }

        let loss = self.config.deceleration * dt;
        let mut speed = mode.filter(self.state.speed);
        for &axis in mode.axes() {
            speed[axis] = decelerate(speed[axis], loss);
        }
        self.state.speed = speed;

        let translation = self.gesture.frame_translation;
        if !translation.is_zero() {
            self.scroll_of_internal(translation, false);
        }

        self.fade_scroll_bars(dt);

        tracing::trace!(
            viewer = %self.base.name,
            ?translation,
            offsets = ?self.state.offsets,
            speed = ?self.state.speed,
            "scroll frame"
        );

        self.gesture.frame_translation = Vec3::ZERO;
        self.gesture.wheel_impulse = false;
    }

    /// Steer the free motion toward the closest anchor on every anchored axis
    fn snap_to_anchors_step(&mut self, dt: f32) {
        for &axis in self.config.scroll_mode.axes() {
            let Some(distances) = self.anchor_distances(axis) else {
                continue;
            };

            let i = axis.index();
            let distance = match self.closest_anchor(axis, distances) {
                Anchor::Previous => distances.x,
                Anchor::Next => distances.y,
            };

            if self.state.speed[i].abs() < SNAP_SETTLE_SPEED
                && distance.abs() < SNAP_SETTLE_DISTANCE
            {
                self.state.started_snapping[i] = false;
                self.state.speed[i] = 0.0;
                self.gesture.frame_translation[i] = distance;
                continue;
            }

            let snapping_speed = SNAP_STIFFNESS * distance;
            if self.state.started_snapping[i] || snapping_speed.abs() > self.state.speed[i].abs() {
                self.state.speed[i] = snapping_speed;
                self.gesture.frame_translation[i] = dt * snapping_speed;
                self.state.started_snapping[i] = true;
            }
        }
    }

    fn anchor_distances(&self, axis: Axis) -> Option<Vec2> {
        let anchors = self.anchor_info()?;
        if !anchors.should_anchor(axis) {
            return None;
        }
        Some(anchors.surrounding_anchor_distances(axis, -self.state.offsets[axis]))
    }

    /// Pick the anchor with the smaller distance (ties go to the next one),
    /// unless reaching the next anchor would scroll past the content end
    fn closest_anchor(&self, axis: Axis, distances: Vec2) -> Anchor {
        if distances.x.abs() < distances.y.abs() {
            return Anchor::Previous;
        }

        let Some(content) = self.content.as_deref() else {
            return Anchor::Next;
        };

        let offset = match self.scroll_info() {
            Some(info) if info.can_scroll(axis) => -info.offset()[axis],
            _ => self.state.offsets[axis],
        };
        let content_size = content.base().render_size()
            + content.base().margin.size()
            + self.config.padding.size();

        if offset - distances.y < self.viewport[axis] - content_size[axis] {
            Anchor::Previous
        } else {
            Anchor::Next
        }
    }

    /// Fade the bars of idle axes, restore the others
    fn fade_scroll_bars(&mut self, dt: f32) {
        let color = self.config.scroll_bar_color.to_array();
        let floor = self.config.scroll_bar_fade_alpha;
        let can_fade = !self.config.touch_scrolling_enabled || !self.is_user_scrolling();

        for (i, bar) in self.scroll_bars.iter_mut().enumerate() {
            if can_fade && self.state.speed[i].abs() < ZERO_TOLERANCE {
                let mut current = bar.bar_color().to_array();
                for (channel, full) in current.iter_mut().zip(color) {
                    *channel = (floor * full).max(*channel - full * SCROLL_BAR_HIDING_SPEED * dt);
                }
                bar.set_bar_color(Color::from_array(current));
            } else {
                bar.set_bar_color(self.config.scroll_bar_color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementBase};
    use crate::widgets::scroll::{ScrollAnchorInfo, ScrollMode, ScrollOwner};
    use crate::widgets::SizedBox;
    use glide_core::{TouchEvent, WheelEvent};

    const FRAME: f32 = 1.0 / 60.0;

    /// Content with anchors every `spacing` pixels along x
    struct Grid {
        base: ElementBase,
        size: Vec3,
        spacing: f32,
    }

    impl Element for Grid {
        fn base(&self) -> &ElementBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ElementBase {
            &mut self.base
        }

        fn measure_override(&mut self, _available_size: Vec3) -> Vec3 {
            self.size
        }

        fn as_anchor_info(&self) -> Option<&dyn ScrollAnchorInfo> {
            Some(self)
        }

        fn as_anchor_info_mut(&mut self) -> Option<&mut dyn ScrollAnchorInfo> {
            Some(self)
        }
    }

    impl ScrollAnchorInfo for Grid {
        fn should_anchor(&self, axis: Axis) -> bool {
            axis == Axis::Horizontal
        }

        fn surrounding_anchor_distances(&self, _axis: Axis, position: f32) -> Vec2 {
            let previous = (position / self.spacing).floor() * self.spacing;
            Vec2::new(previous - position, previous + self.spacing - position)
        }

        fn set_scroll_owner(&mut self, _owner: Option<ScrollOwner>) {}
    }

    fn viewer_with(content: Box<dyn Element>) -> ScrollViewer {
        let mut viewer = ScrollViewer::new();
        viewer.set_content(Some(content));
        let viewport = Vec3::new(100.0, 100.0, 0.0);
        viewer.measure(viewport);
        viewer.arrange(viewport, false);
        viewer
    }

    fn sized(x: f32, y: f32) -> Box<dyn Element> {
        Box::new(SizedBox::new(Vec3::new(x, y, 0.0)))
    }

    fn grid() -> Box<dyn Element> {
        Box::new(Grid {
            base: ElementBase::named("grid"),
            size: Vec3::new(300.0, 100.0, 0.0),
            spacing: 50.0,
        })
    }

    #[test]
    fn test_decelerate_keeps_sign_and_stops_at_zero() {
        assert_eq!(decelerate(100.0, 30.0), 70.0);
        assert_eq!(decelerate(-100.0, 30.0), -70.0);
        assert_eq!(decelerate(10.0, 30.0), 0.0);
        assert_eq!(decelerate(-10.0, 30.0), 0.0);
        assert_eq!(decelerate(0.0, 30.0), 0.0);
    }

    #[test]
    fn test_tiny_frame_is_ignored() {
        let mut viewer = viewer_with(sized(300.0, 100.0));
        viewer.state.speed = Vec3::new(-600.0, 0.0, 0.0);
        viewer.update(&FrameTime::from_secs(1e-7));
        assert_eq!(viewer.current_scrolling_speed().x, -600.0);
        assert_eq!(viewer.scroll_offsets(), Vec3::ZERO);
    }

    #[test]
    fn test_disabled_viewer_does_not_move() {
        let mut viewer = viewer_with(sized(300.0, 100.0));
        viewer.state.speed = Vec3::new(600.0, 0.0, 0.0);
        viewer.set_enabled(false);
        viewer.update(&FrameTime::from_secs(FRAME));
        assert_eq!(viewer.scroll_offsets(), Vec3::ZERO);
    }

    #[test]
    fn test_free_motion_decays_monotonically() {
        let mut viewer = viewer_with(sized(10_000.0, 100.0));
        viewer.state.speed = Vec3::new(900.0, 0.0, 0.0);

        let mut previous = viewer.current_scrolling_speed().x.abs();
        for _ in 0..120 {
            viewer.update(&FrameTime::from_secs(FRAME));
            let speed = viewer.current_scrolling_speed().x.abs();
            assert!(speed <= previous);
            previous = speed;
        }
        assert_eq!(previous, 0.0);
        assert!(viewer.scroll_offsets().x < 0.0);
        assert_eq!(viewer.current_scrolling_speed().y, 0.0);
    }

    #[test]
    fn test_drag_sets_velocity_from_frame_translation() {
        let mut viewer = viewer_with(sized(300.0, 100.0));
        viewer.on_preview_touch_down(&mut TouchEvent::down());
        viewer.on_preview_touch_move(&mut TouchEvent::moved(Vec3::new(-12.0, 0.0, 0.0)));

        viewer.update(&FrameTime::from_secs(0.1));
        // 12px over 0.1s, then one frame of deceleration
        assert!((viewer.current_scrolling_speed().x - (120.0_f32 - 150.0).max(0.0)).abs() < 1e-3);
        assert!((viewer.scroll_offsets().x + 12.0).abs() < 1e-4);
        assert_eq!(viewer.last_frame_translation(), Vec3::ZERO);
    }

    #[test]
    fn test_wheel_is_a_one_frame_impulse() {
        let mut viewer = viewer_with(sized(100.0, 300.0));
        viewer.set_scroll_mode(ScrollMode::Vertical);
        let viewport = Vec3::new(100.0, 100.0, 0.0);
        viewer.measure(viewport);
        viewer.arrange(viewport, false);

        viewer.wheel_scroll(2.0);
        assert_eq!(viewer.current_scrolling_speed().y, -20.0);
        assert!(viewer.is_user_scrolling());

        viewer.update(&FrameTime::from_secs(FRAME));
        assert!(!viewer.is_user_scrolling());
    }

    #[test]
    fn test_pending_wheel_resolved_on_update() {
        let mut viewer = viewer_with(sized(100.0, 300.0));
        viewer.set_scroll_mode(ScrollMode::Vertical);
        let viewport = Vec3::new(100.0, 100.0, 0.0);
        viewer.measure(viewport);
        viewer.arrange(viewport, false);

        viewer.on_mouse_wheel(&mut WheelEvent::new(1.0));
        viewer.update(&FrameTime::from_secs(FRAME));

        // scrolling up at the top is clamped back to zero
        assert_eq!(viewer.scroll_offsets().y, 0.0);
        assert_eq!(viewer.current_scrolling_speed().y, 0.0);
    }

    #[test]
    fn test_snap_settles_exactly_when_close_and_slow() {
        let mut viewer = viewer_with(grid());
        viewer.set_snap_to_anchors(true);
        viewer.scroll_to(Vec3::new(49.5, 0.0, 0.0), true);
        viewer.update(&FrameTime::from_secs(FRAME)); // clears the programmatic latch

        viewer.state.speed = Vec3::new(3.0, 0.0, 0.0);
        viewer.state.started_snapping[0] = true;
        viewer.update(&FrameTime::from_secs(FRAME));

        assert_eq!(viewer.scroll_offsets().x, -50.0);
        assert_eq!(viewer.current_scrolling_speed().x, 0.0);
        assert!(!viewer.state.started_snapping[0]);
    }

    #[test]
    fn test_snap_pulls_toward_nearest_anchor() {
        let mut viewer = viewer_with(grid());
        viewer.set_snap_to_anchors(true);
        viewer.scroll_to(Vec3::new(60.0, 0.0, 0.0), true);
        viewer.update(&FrameTime::from_secs(FRAME));

        viewer.update(&FrameTime::from_secs(FRAME));
        assert!(viewer.state.started_snapping[0]);
        // previous anchor at 50 is 10px back
        assert!(viewer.scroll_position().x < 60.0);

        for _ in 0..600 {
            viewer.update(&FrameTime::from_secs(FRAME));
        }
        assert_eq!(viewer.scroll_position().x, 50.0);
        assert_eq!(viewer.current_scrolling_speed().x, 0.0);
    }

    #[test]
    fn test_snap_ties_go_to_next_anchor() {
        let mut viewer = viewer_with(grid());
        assert_eq!(
            viewer.closest_anchor(Axis::Horizontal, Vec2::new(-25.0, 25.0)),
            Anchor::Next
        );
        assert_eq!(
            viewer.closest_anchor(Axis::Horizontal, Vec2::new(-24.0, 26.0)),
            Anchor::Previous
        );

        // at the content end the next anchor would overshoot
        viewer.scroll_to(Vec3::new(200.0, 0.0, 0.0), true);
        assert_eq!(viewer.scroll_offsets().x, -200.0);
        assert_eq!(
            viewer.closest_anchor(Axis::Horizontal, Vec2::new(-25.0, 25.0)),
            Anchor::Previous
        );
    }

    #[test]
    fn test_programmatic_scroll_suppresses_motion_for_one_frame() {
        let mut viewer = viewer_with(sized(300.0, 100.0));
        viewer.scroll_of(Vec3::new(10.0, 0.0, 0.0), false);
        viewer.state.speed = Vec3::new(600.0, 0.0, 0.0);

        viewer.update(&FrameTime::from_secs(FRAME));
        assert_eq!(viewer.scroll_offsets().x, -10.0);

        viewer.update(&FrameTime::from_secs(FRAME));
        assert!(viewer.scroll_offsets().x < -10.0);
    }

    #[test]
    fn test_idle_bars_fade_to_floor() {
        let mut viewer = viewer_with(sized(300.0, 100.0));
        viewer.set_scroll_bar_fade_alpha(0.5);
        viewer.state.speed = Vec3::new(60.0, 0.0, 0.0);

        viewer.update(&FrameTime::from_secs(FRAME));
        // still moving after one frame of deceleration
        assert_eq!(
            viewer.scroll_bar(Axis::Horizontal).bar_color(),
            viewer.scroll_bar_color()
        );

        for _ in 0..240 {
            viewer.update(&FrameTime::from_secs(FRAME));
        }
        let faded = viewer.scroll_bar(Axis::Horizontal).bar_color();
        let expected = viewer.scroll_bar_color().scaled(0.5);
        for (a, b) in faded.to_array().iter().zip(expected.to_array()) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
