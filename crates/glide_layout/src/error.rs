//! Layout errors

use thiserror::Error;

use crate::tree::LayoutNodeId;

/// Errors raised while building or computing a flex layout
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout node {0:?} does not exist")]
    UnknownNode(LayoutNodeId),

    #[error("layout engine error: {0}")]
    Engine(#[from] taffy::TaffyError),
}
