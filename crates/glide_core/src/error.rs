use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlideError {
    #[error("invalid axis index {0} (expected 0, 1 or 2)")]
    InvalidAxis(u8),
}
