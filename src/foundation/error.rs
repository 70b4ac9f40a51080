/// Convenience result type used across framecanvas.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Error taxonomy for drawing calls and pipeline routing.
///
/// Every variant is recoverable: callers degrade the current frame and keep going.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// `restore` was called without a matching `save`.
    #[error("restore without matching save")]
    StackUnderflow,

    /// A line or curve command was issued before any `move_to`.
    #[error("path command requires a current point")]
    NoCurrentPoint,

    /// The active transform cannot be applied to the requested command.
    #[error("unsupported transform: {0}")]
    UnsupportedTransform(String),

    /// A frame arrived on a pad the node never declared.
    #[error("pad {pad} out of range (node declared {declared} pads)")]
    OutOfRangePad {
        /// Pad index the frame was tagged with.
        pad: usize,
        /// Number of pads declared by the node.
        declared: usize,
    },

    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    /// Build a [`CanvasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CanvasError::UnsupportedTransform`] value.
    pub fn unsupported_transform(msg: impl Into<String>) -> Self {
        Self::UnsupportedTransform(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
