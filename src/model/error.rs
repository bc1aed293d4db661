//! Error types for gradient operations.

use thiserror::Error;

/// Errors returned by [`Gradient`](super::Gradient) operations.
///
/// A failed operation never modifies the gradient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradientError {
    /// Keypoint index does not exist
    #[error("Keypoint index {index} out of bounds (gradient has {len} keypoints)")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// Number of keypoints at the time of the call
        len: usize,
    },

    /// Position is not a finite value in [0, 1]
    #[error("Position {position} is outside [0, 1]")]
    PositionOutOfRange {
        /// The rejected position
        position: f32,
    },

    /// Sampling or export needs at least two keypoints
    #[error("At least 2 keypoints are required, gradient has {count}")]
    InsufficientData {
        /// Number of keypoints at the time of the call
        count: usize,
    },

    /// `commit_edit` called without a matching `begin_edit`
    #[error("No color edit in progress")]
    NoEditInProgress,
}
