//! Glide Core
//!
//! Foundational types for the Glide scroll viewer:
//!
//! - **Geometry**: `Vec3` offsets and sizes indexable per axis, `Thickness`
//!   margins/padding, `Color`, translation matrices
//! - **Axes**: the three independent scroll dimensions
//! - **Events**: touch, wheel and frame timing inputs
//!
//! # Example
//!
//! ```rust
//! use glide_core::{Axis, Thickness, Vec3};
//!
//! let padding = Thickness::uniform(4.0);
//! let mut size = padding.inflate(Vec3::new(100.0, 50.0, 0.0));
//! size[Axis::Vertical] += 2.0;
//! assert_eq!(size, Vec3::new(108.0, 60.0, 0.0));
//! ```

pub mod axis;
pub mod error;
pub mod events;
pub mod geometry;

pub use axis::Axis;
pub use error::GlideError;
pub use events::{event_types, EventType, FrameTime, TouchAction, TouchEvent, WheelEvent};
pub use geometry::{Color, Mat4, Thickness, Vec2, Vec3};

/// Tolerance under which a float is treated as zero
pub const ZERO_TOLERANCE: f32 = 1e-6;
