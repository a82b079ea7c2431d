//! Event-driven state tracking
//!
//! State enums implement [`StateTransitions`] to map event types onto
//! transitions, and a [`StateTracker`] holds the current state and a short
//! transition history for diagnostics:
//!
//! ```rust
//! use glide_core::event_types::*;
//! use glide_layout::stateful::{StateTracker, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Press {
//!     Up,
//!     Down,
//! }
//!
//! impl StateTransitions for Press {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Press::Up, TOUCH_DOWN) => Some(Press::Down),
//!             (Press::Down, TOUCH_UP) => Some(Press::Up),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut tracker = StateTracker::new(Press::Up);
//! assert!(tracker.send(TOUCH_DOWN));
//! assert!(!tracker.send(TOUCH_DOWN));
//! assert_eq!(tracker.current(), Press::Down);
//! ```

use std::collections::VecDeque;
use std::hash::Hash;

use glide_core::EventType;

/// Number of transitions kept in a tracker's history
const HISTORY_LEN: usize = 16;

/// Trait for state types that can handle event transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Current state plus the most recent transitions
#[derive(Debug, Clone)]
pub struct StateTracker<S: StateTransitions> {
    current: S,
    history: VecDeque<(S, EventType, S)>,
}

impl<S: StateTransitions> StateTracker<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Feed an event; returns whether a transition happened
    pub fn send(&mut self, event: EventType) -> bool {
        let Some(next) = self.current.on_event(event) else {
            return false;
        };

        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back((self.current, event, next));
        tracing::trace!(from = ?self.current, to = ?next, event, "state transition");
        self.current = next;
        true
    }

    /// Recent transitions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(S, EventType, S)> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::event_types::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Light {
        Off,
        On,
    }

    impl StateTransitions for Light {
        fn on_event(&self, event: u32) -> Option<Self> {
            match (self, event) {
                (Light::Off, TOUCH_DOWN) => Some(Light::On),
                (Light::On, TOUCH_UP) => Some(Light::Off),
                _ => None,
            }
        }
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut tracker = StateTracker::new(Light::Off);
        assert!(!tracker.send(TOUCH_UP));
        assert!(tracker.is_in(Light::Off));
        assert_eq!(tracker.history().count(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = StateTracker::new(Light::Off);
        for _ in 0..HISTORY_LEN {
            tracker.send(TOUCH_DOWN);
            tracker.send(TOUCH_UP);
        }
        assert_eq!(tracker.history().count(), HISTORY_LEN);
        assert_eq!(
            tracker.history().last(),
            Some(&(Light::On, TOUCH_UP, Light::Off))
        );

        tracker.clear_history();
        assert_eq!(tracker.history().count(), 0);
    }
}
