//! Error type shared by the sketch pipeline and the capture helpers.

use thiserror::Error;

/// Errors returned by framesketch operations.
///
/// Argument checks always run before a buffer is touched, so an
/// `InvalidArgument` result means the caller's pixels are unchanged.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Malformed buffer dimensions, out-of-range parameters or mismatched layers.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The captured frame could not be encoded.
    #[cfg(feature = "capture")]
    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
}

impl SketchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SketchError::InvalidArgument(msg.into())
    }

    /// True for argument/precondition failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SketchError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, SketchError>;
