//! Mutable scroll state of a viewer

use glide_core::Vec3;

/// A scroll requested while the layout was invalid
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollRequest {
    /// Move the content by this translation
    Relative(Vec3),
    /// Show this content position
    Absolute(Vec3),
}

impl ScrollRequest {
    /// Offsets resulting from applying the request to `offsets`
    pub fn resolve(&self, offsets: Vec3) -> Vec3 {
        match *self {
            ScrollRequest::Relative(translation) => offsets - translation,
            ScrollRequest::Absolute(position) => -position,
        }
    }
}

/// Offsets, velocity and deferred requests
#[derive(Clone, Debug, Default)]
pub(crate) struct ScrollState {
    /// Translation applied to the content, `<= 0` on scrolled axes
    pub offsets: Vec3,
    /// Velocity in virtual pixels per second
    pub speed: Vec3,
    /// Whether an anchor snap is in progress, per axis
    pub started_snapping: [bool; 3],
    /// A programmatic scroll happened since the last update
    pub manually_scrolled: bool,
    requests: Vec<ScrollRequest>,
}

impl ScrollState {
    /// Queue a request for the next arrange
    ///
    /// Absolute requests drop everything queued before them.
    pub fn queue(&mut self, request: ScrollRequest) {
        if matches!(request, ScrollRequest::Absolute(_)) {
            self.requests.clear();
        }
        tracing::debug!(?request, pending = self.requests.len(), "scroll request queued");
        self.requests.push(request);
    }

    pub fn pending(&self) -> &[ScrollRequest] {
        &self.requests
    }

    /// Remove and return queued requests in FIFO order
    pub fn take_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn clear_snapping(&mut self) {
        self.started_snapping = [false; 3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_requests_accumulate() {
        let mut state = ScrollState::default();
        state.queue(ScrollRequest::Relative(Vec3::new(1.0, 0.0, 0.0)));
        state.queue(ScrollRequest::Relative(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(state.pending().len(), 2);

        let offsets = state
            .take_requests()
            .iter()
            .fold(Vec3::ZERO, |offsets, r| r.resolve(offsets));
        assert_eq!(offsets, Vec3::new(-3.0, 0.0, 0.0));
        assert!(state.pending().is_empty());
    }

    #[test]
    fn test_absolute_request_clears_queue() {
        let mut state = ScrollState::default();
        state.queue(ScrollRequest::Relative(Vec3::new(1.0, 0.0, 0.0)));
        state.queue(ScrollRequest::Absolute(Vec3::new(10.0, 5.0, 0.0)));
        state.queue(ScrollRequest::Relative(Vec3::new(0.0, 1.0, 0.0)));

        let requests = state.take_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].resolve(Vec3::ZERO), Vec3::new(-10.0, -5.0, 0.0));
    }
}
