//! Gradient keypoint data model.

use serde::{Deserialize, Serialize};

use super::Rgb;

/// A color anchored at a position along the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Position in [0, 1]
    pub position: f32,
    /// Color at this position
    pub color: Rgb,
}

impl Keypoint {
    /// Create a new keypoint.
    pub const fn new(position: f32, color: Rgb) -> Self {
        Self { position, color }
    }

    /// Listing label, e.g. `Pos: 0.50 - RGB: (255, 0, 0)`.
    pub fn label(&self) -> String {
        format!("Pos: {:.2} - RGB: {}", self.position, self.color)
    }
}

/// Result of [`Gradient::add`](super::Gradient::add).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new keypoint was inserted at this index
    Inserted(usize),
    /// The keypoint at this index was within tolerance and got recolored
    Replaced(usize),
}

impl AddOutcome {
    /// Index of the affected keypoint.
    pub fn index(&self) -> usize {
        match self {
            AddOutcome::Inserted(i) | AddOutcome::Replaced(i) => *i,
        }
    }
}

/// A color edit started by [`Gradient::begin_edit`](super::Gradient::begin_edit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingEdit {
    /// Index of the keypoint being edited
    pub index: usize,
    /// Color before the edit, restored on cancel
    pub original: Rgb,
}
