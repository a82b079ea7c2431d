//! Measure/arrange for the scroll viewer, offset clamping and bar geometry

use glide_core::{Axis, Mat4, Vec3, ZERO_TOLERANCE};

use crate::element::Element;

use super::ScrollViewer;

impl ScrollViewer {
    /// Axes scrolled by the content itself
    fn delegated_axes(&self) -> [bool; 3] {
        Axis::ALL.map(|axis| self.delegates(axis))
    }

    pub(super) fn measure_content(&mut self, available_size: Vec3) -> Vec3 {
        let padding = self.config.padding;
        let delegated = self.delegated_axes();

        let mut child_desired = Vec3::ZERO;
        if let Some(content) = self.content.as_deref_mut() {
            let mut child_available = padding.deflate(available_size);
            for &axis in self.config.scroll_mode.axes() {
                if !delegated[axis.index()] {
                    child_available[axis] = f32::INFINITY;
                }
            }

            content.measure(child_available);
            child_desired = content.base().desired_size_with_margins();
        }

        padding.inflate(child_desired)
    }

    pub(super) fn arrange_content(&mut self, final_size: Vec3) -> Vec3 {
        self.viewport = final_size;

        let padding = self.config.padding;
        let delegated = self.delegated_axes();

        if let Some(content) = self.content.as_deref_mut() {
            let mut child_size = padding.deflate(final_size);
            let desired = content.base().desired_size_with_margins();
            for &axis in self.config.scroll_mode.axes() {
                if !delegated[axis.index()] {
                    child_size[axis] = child_size[axis].max(desired[axis]);
                }
            }
            content.arrange(child_size, false);
        }

        if self.content.is_some() {
            self.process_owner_signals();
            self.update_scroll_bars_size();

            let requests = self.state.take_requests();
            if requests.is_empty() {
                self.update_scroll_offsets(self.state.offsets);
            } else {
                tracing::debug!(count = requests.len(), "replaying scroll requests");
                for request in requests {
                    self.update_scroll_offsets(request.resolve(self.state.offsets));
                }
            }

            self.update_content_arrange_matrix();
        }

        // requests made without content are dropped
        self.state.take_requests();

        final_size
    }

    /// Move the offsets to `desired`, clamped to the content bounds
    ///
    /// Axes scrolled by the content are kept at zero. Any clamp stops the
    /// motion along that axis.
    pub(super) fn update_scroll_offsets(&mut self, desired: Vec3) {
        let Some(content) = self.content.as_deref() else {
            return;
        };

        let child_size = self.config.padding.inflate(content.base().render_size());
        let delegated = self.delegated_axes();

        for &axis in self.config.scroll_mode.axes() {
            let i = axis.index();
            if delegated[i] {
                self.state.offsets[i] = 0.0;
                continue;
            }

            let mut offset = desired[i];
            let min = self.viewport[i] - child_size[i];
            if offset < min {
                offset = min;
                self.state.speed[i] = 0.0;
            }
            if offset > 0.0 {
                offset = 0.0;
                self.state.speed[i] = 0.0;
            }
            if offset != desired[i] {
                tracing::trace!(?axis, desired = desired[i], offset, "scroll offset clamped");
            }
            self.state.offsets[i] = offset;
        }
    }

    /// Arrange the bars of the active axes to their visible-ratio length
    pub(super) fn update_scroll_bars_size(&mut self) {
        for bar in self.scroll_bars.iter_mut() {
            bar.arrange(Vec3::ZERO, false);
        }

        let Some(content) = self.content.as_deref() else {
            return;
        };

        let extent = match content.as_scroll_info() {
            Some(info) => info.extent(),
            None => content.base().render_size() + content.base().margin.size(),
        };
        let thickness = self.config.scroll_bar_thickness;

        for &axis in self.config.scroll_mode.axes() {
            let i = axis.index();
            let bar_length = (self.viewport[i] / extent[i]).min(1.0) * self.viewport[i];

            let mut bar_size = Vec3::ZERO;
            for dim in 0..3 {
                bar_size[dim] = if dim == i {
                    bar_length
                } else {
                    thickness.min(self.viewport[dim])
                };
            }

            self.scroll_bars[i].arrange(bar_size, false);
        }
    }

    /// Translate the content's visual by the current offsets
    pub(super) fn update_content_arrange_matrix(&mut self) {
        let mut offsets = self.state.offsets;
        if let Some(info) = self.scroll_info() {
            for axis in Axis::ALL {
                if info.can_scroll(axis) {
                    offsets[axis] = info.offset()[axis];
                }
            }
        }

        let child_offsets = offsets + self.config.padding.leading() - self.viewport / 2.0;
        if let Some(content) = self.content.as_deref_mut() {
            content
                .base_mut()
                .set_arrange_matrix(Mat4::translation(child_offsets));
            self.base.mark_arrange_changed();
        }
    }

    /// World matrices of the viewer, its content and its bars
    pub(super) fn update_world_matrices(&mut self, parent_world: &Mat4, parent_changed: bool) {
        let bars_dirty = parent_changed || self.base.arrange_changed();

        let changed = self.base.take_arrange_changed() || parent_changed;
        if changed {
            let world = parent_world.mul(&self.base.arrange_matrix());
            self.base.set_world_matrix(world);
        }
        let world = self.base.world_matrix();

        if let Some(content) = self.content.as_deref_mut() {
            content.update_world_matrix(&world, changed);
        }

        if !bars_dirty {
            return;
        }

        let Some(content) = self.content.as_deref() else {
            return;
        };

        let render_size = self.base.render_size();
        let child_desired = content.base().desired_size_with_margins();
        let delegated = self.delegated_axes();
        let positions = content
            .as_scroll_info()
            .map_or(Vec3::ZERO, |info| info.scroll_bar_positions());

        for &axis in self.config.scroll_mode.axes() {
            let i = axis.index();
            let bar_size = self.scroll_bars[i].base().render_size();

            let ratio = if delegated[i] {
                -positions[i]
            } else {
                let overflow = child_desired[i] - self.viewport[i];
                if overflow > ZERO_TOLERANCE {
                    self.state.offsets[i] / overflow
                } else {
                    0.0
                }
            };

            let mut bar_position = render_size / 2.0 - bar_size;
            bar_position[i] = -(render_size[i] / 2.0 + ratio * (render_size[i] - bar_size[i]));
            self.scroll_bars[i]
                .base_mut()
                .set_world_matrix(world.translated(bar_position));
        }
    }
}
