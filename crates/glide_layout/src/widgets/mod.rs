//! Built-in elements
//!
//! - [`ScrollViewer`]: viewport with inertia, anchors and scroll bars
//! - [`ScrollBar`]: thin bar drawn by a viewer for each active axis
//! - [`StackPanel`]: virtualizing list that scrolls itself
//! - [`FlexContent`]: taffy-backed row or column of fixed-size items
//! - [`SizedBox`]: leaf with a fixed desired size

pub mod flex_content;
pub mod scroll;
pub mod scroll_bar;
pub mod sized_box;
pub mod stack_panel;

pub use flex_content::FlexContent;
pub use scroll::{
    GesturePhase, ScrollAnchorInfo, ScrollInfo, ScrollMode, ScrollOwner, ScrollRequest,
    ScrollViewer, VisualChild, SCROLL_BAR_HIDING_SPEED,
};
pub use scroll_bar::ScrollBar;
pub use sized_box::SizedBox;
pub use stack_panel::StackPanel;
