//! Undo/Redo system for gradient edits.
//!
//! Every undoable edit is recorded as a [`Command`] holding enough
//! information to restore the exact keypoint sequence before and after it.
//! The edit itself is performed by the caller; the stack only records it.

use crate::constants::DEFAULT_UNDO_HISTORY;
use crate::model::{Gradient, Keypoint, Rgb};

// ============================================================================
// Command Types
// ============================================================================

/// A recorded gradient edit that can be undone and redone.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A keypoint was inserted
    AddKeypoint {
        /// Index the keypoint was inserted at
        index: usize,
        /// The inserted keypoint
        keypoint: Keypoint,
    },
    /// An existing keypoint got a new color
    ReplaceColor {
        /// Index of the recolored keypoint
        index: usize,
        /// Color before the edit
        old_color: Rgb,
        /// Color after the edit
        new_color: Rgb,
    },
    /// A keypoint was removed
    RemoveKeypoint {
        /// Index the keypoint was removed from
        index: usize,
        /// The removed keypoint (stored for undo)
        keypoint: Keypoint,
    },
    /// A keypoint was moved to a new position
    MoveKeypoint {
        /// Index before the move
        old_index: usize,
        /// Index after the move
        new_index: usize,
        /// Position before the move
        old_position: f32,
        /// Position after the move
        new_position: f32,
    },
    /// All keypoints were removed
    Clear {
        /// The keypoints that were cleared (stored for undo)
        keypoints: Vec<Keypoint>,
    },
}

impl Command {
    /// Get a human-readable description of this command
    pub fn description(&self) -> String {
        match self {
            Command::AddKeypoint { keypoint, .. } => {
                format!("Add color at {:.2}", keypoint.position)
            }
            Command::ReplaceColor { .. } => "Change color".to_string(),
            Command::RemoveKeypoint { keypoint, .. } => {
                format!("Remove color at {:.2}", keypoint.position)
            }
            Command::MoveKeypoint { new_position, .. } => {
                format!("Move color to {:.2}", new_position)
            }
            Command::Clear { keypoints } => format!("Clear {} colors", keypoints.len()),
        }
    }

    /// Where the keypoint at `index` ends up after this command is undone
    /// (`undone`) or redone. `None` if that keypoint is removed by the step.
    pub fn follow_index(&self, index: usize, undone: bool) -> Option<usize> {
        match (self, undone) {
            (Command::AddKeypoint { index: at, .. }, true)
            | (Command::RemoveKeypoint { index: at, .. }, false) => removed_from(index, *at),
            (Command::AddKeypoint { index: at, .. }, false)
            | (Command::RemoveKeypoint { index: at, .. }, true) => Some(inserted_at(index, *at)),
            (Command::ReplaceColor { .. }, _) => Some(index),
            (
                Command::MoveKeypoint {
                    old_index,
                    new_index,
                    ..
                },
                true,
            ) => Some(moved(index, *new_index, *old_index)),
            (
                Command::MoveKeypoint {
                    old_index,
                    new_index,
                    ..
                },
                false,
            ) => Some(moved(index, *old_index, *new_index)),
            (Command::Clear { .. }, _) => None,
        }
    }
}

fn removed_from(index: usize, at: usize) -> Option<usize> {
    match index.cmp(&at) {
        std::cmp::Ordering::Less => Some(index),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(index - 1),
    }
}

fn inserted_at(index: usize, at: usize) -> usize {
    if index >= at { index + 1 } else { index }
}

fn moved(index: usize, from: usize, to: usize) -> usize {
    match removed_from(index, from) {
        Some(index) => inserted_at(index, to),
        None => to,
    }
}

// ============================================================================
// Undo Stack
// ============================================================================

/// Configuration for the undo stack
#[derive(Debug, Clone)]
pub struct UndoConfig {
    /// Maximum number of commands to keep in history
    pub max_history: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_UNDO_HISTORY,
        }
    }
}

/// The undo/redo history stack.
///
/// Pushing a new command clears the redo stack. Undo moves the most recent
/// command to the redo stack and redo moves it back.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    config: UndoConfig,
}

impl UndoStack {
    /// Create a new empty undo stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: UndoConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Push a command to the undo stack and drop the redo history.
    pub fn push(&mut self, command: Command) {
        log::debug!("Undo: pushed '{}'", command.description());
        self.undo_stack.push(command);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.config.max_history {
            let excess = self.undo_stack.len() - self.config.max_history;
            self.undo_stack.drain(..excess);
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pop the most recent command and move it to the redo stack.
    pub fn pop_undo(&mut self) -> Option<Command> {
        let cmd = self.undo_stack.pop()?;
        log::debug!("Undo: '{}'", cmd.description());
        self.redo_stack.push(cmd.clone());
        Some(cmd)
    }

    /// Pop the most recently undone command and move it back to the undo stack.
    pub fn pop_redo(&mut self) -> Option<Command> {
        let cmd = self.redo_stack.pop()?;
        log::debug!("Redo: '{}'", cmd.description());
        self.undo_stack.push(cmd.clone());
        Some(cmd)
    }

    /// Get the description of the command that would be undone
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Get the description of the command that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|c| c.description())
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        log::debug!("Undo history cleared");
    }

    /// Get the number of commands in undo history
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of commands in redo history
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

// ============================================================================
// Undo/Redo Execution
// ============================================================================

/// Undo the most recent command on `gradient`.
/// Returns the command that was undone, or `None` if there was nothing to undo.
pub fn undo_command(stack: &mut UndoStack, gradient: &mut Gradient) -> Option<Command> {
    let cmd = stack.pop_undo()?;
    apply_undo(&cmd, gradient);
    Some(cmd)
}

/// Redo the most recently undone command on `gradient`.
/// Returns the command that was redone, or `None` if there was nothing to redo.
pub fn redo_command(stack: &mut UndoStack, gradient: &mut Gradient) -> Option<Command> {
    let cmd = stack.pop_redo()?;
    apply_redo(&cmd, gradient);
    Some(cmd)
}

fn apply_undo(cmd: &Command, gradient: &mut Gradient) {
    match cmd {
        Command::AddKeypoint { index, .. } => {
            gradient.take_at(*index);
        }
        Command::ReplaceColor {
            index, old_color, ..
        } => recolor(gradient, *index, *old_color),
        Command::RemoveKeypoint { index, keypoint } => {
            gradient.restore_at(*index, *keypoint);
        }
        Command::MoveKeypoint {
            old_index,
            new_index,
            old_position,
            ..
        } => move_exact(gradient, *new_index, *old_index, *old_position),
        Command::Clear { keypoints } => {
            gradient.replace_keypoints(keypoints.clone());
        }
    }
}

fn apply_redo(cmd: &Command, gradient: &mut Gradient) {
    match cmd {
        Command::AddKeypoint { index, keypoint } => {
            gradient.restore_at(*index, *keypoint);
        }
        Command::ReplaceColor {
            index, new_color, ..
        } => recolor(gradient, *index, *new_color),
        Command::RemoveKeypoint { index, .. } => {
            gradient.take_at(*index);
        }
        Command::MoveKeypoint {
            old_index,
            new_index,
            new_position,
            ..
        } => move_exact(gradient, *old_index, *new_index, *new_position),
        Command::Clear { .. } => gradient.clear(),
    }
}

fn recolor(gradient: &mut Gradient, index: usize, color: Rgb) {
    if let Err(e) = gradient.set_color(index, color) {
        log::warn!("History out of sync with gradient: {}", e);
    }
}

/// Move the keypoint at `from` to index `to` with `position`, without re-sorting.
fn move_exact(gradient: &mut Gradient, from: usize, to: usize, position: f32) {
    match gradient.take_at(from) {
        Some(mut keypoint) => {
            keypoint.position = position;
            gradient.restore_at(to, keypoint);
        }
        None => log::warn!("History out of sync with gradient: no keypoint at {}", from),
    }
}

// ============================================================================
// Tests
// ============================================================================
