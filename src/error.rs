//! Error types for the feature stack.

use thiserror::Error;

/// Errors surfaced by resource creation and frame recording.
///
/// Nothing here is fatal to a frame: callers skip the failing slot or
/// effect and keep recording the rest of the frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("out of GPU memory")]
    OutOfMemory,
    #[error("GPU device lost")]
    DeviceLost,
}

pub type RenderResult<T> = Result<T, RenderError>;
