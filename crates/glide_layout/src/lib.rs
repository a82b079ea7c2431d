//! Glide Layout
//!
//! Element tree, flexbox layout powered by Taffy, and the scroll viewer.
//!
//! # Example
//!
//! ```rust
//! use glide_core::{Axis, Vec3};
//! use glide_layout::prelude::*;
//!
//! let mut viewer = ScrollViewer::new();
//! viewer.set_scroll_mode(ScrollMode::Vertical);
//! viewer.set_content(Some(Box::new(StackPanel::new(
//!     Axis::Vertical,
//!     100,
//!     Vec3::new(200.0, 40.0, 0.0),
//! ))));
//!
//! let viewport = Vec3::new(200.0, 400.0, 0.0);
//! viewer.measure(viewport);
//! viewer.arrange(viewport, false);
//! viewer.scroll_to_end(Axis::Vertical, true);
//! ```

pub mod config;
pub mod element;
pub mod error;
pub mod stateful;
pub mod style;
pub mod tree;
pub mod widgets;

pub use config::{ConfigError, ScrollViewerConfig};
pub use element::{raise_leave_to_touched_descendants, Element, ElementBase};
pub use error::LayoutError;
pub use stateful::{StateTracker, StateTransitions};
pub use style::LayoutStyle;
pub use tree::{LayoutNodeId, LayoutTree};

/// Commonly used types
pub mod prelude {
    pub use crate::config::ScrollViewerConfig;
    pub use crate::element::{Element, ElementBase};
    pub use crate::widgets::{
        FlexContent, ScrollAnchorInfo, ScrollBar, ScrollInfo, ScrollMode, ScrollOwner,
        ScrollViewer, SizedBox, StackPanel,
    };
}
