//! Editing session state.
//!
//! A [`Session`] ties together everything an interactive editor needs: the
//! gradient being built, the color picker, the position slider, the selected
//! keypoint and the undo history. Every mutation made through the session is
//! recorded so it can be undone.

use crate::color_utils::wheel_to_hue_saturation;
use crate::config::AppConfig;
use crate::constants::DEFAULT_SLIDER_POSITION;
use crate::model::{AddOutcome, Gradient, GradientError, Hsv, Keypoint, Rgb};
use crate::undo::{self, Command, UndoConfig, UndoStack};

/// One row of the keypoint listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    /// Text such as `Pos: 0.50 - RGB: (255, 0, 0)`
    pub label: String,
    /// The keypoint color, used as the row background
    pub background: Rgb,
    /// Black or white, whichever reads better on `background`
    pub foreground: Rgb,
    /// Whether this row is the current selection
    pub selected: bool,
}

/// State of one colormap editing session.
#[derive(Debug, Clone)]
pub struct Session {
    gradient: Gradient,
    picker: Hsv,
    position: f32,
    selected: Option<usize>,
    undo: UndoStack,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Gradient::default(), UndoConfig::default())
    }
}

impl Session {
    /// Start a session on `gradient`.
    pub fn new(gradient: Gradient, undo: UndoConfig) -> Self {
        Self {
            gradient,
            picker: Hsv::default(),
            position: DEFAULT_SLIDER_POSITION,
            selected: None,
            undo: UndoStack::with_config(undo),
        }
    }

    /// Start a session with the configured tolerance and history size.
    ///
    /// The gradient starts out white to black so it can be previewed.
    pub fn from_config(config: &AppConfig) -> Self {
        let gradient =
            Gradient::from_keypoints(Gradient::default().keypoints().to_vec(), config.tolerance);
        Self::new(gradient, config.undo_config())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The gradient being edited.
    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    /// Current picker color.
    pub fn picker(&self) -> Hsv {
        self.picker
    }

    /// Current slider position.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Index of the selected keypoint.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Undo history.
    pub fn history(&self) -> &UndoStack {
        &self.undo
    }

    /// The picker color as RGB.
    pub fn current_color(&self) -> Rgb {
        self.picker.to_rgb()
    }

    // ------------------------------------------------------------------------
    // Picker and slider
    // ------------------------------------------------------------------------

    /// Pick hue and saturation from a point on the color wheel.
    ///
    /// `(x, y)` is relative to the wheel center in units of the wheel radius.
    /// Points outside the disc are ignored and return false.
    pub fn pick_wheel(&mut self, x: f32, y: f32) -> bool {
        let Some((h, s)) = wheel_to_hue_saturation(x, y) else {
            return false;
        };
        self.picker = Hsv::new(h, s, self.picker.v);
        true
    }

    /// Set the picker brightness, clamped to [0, 1].
    pub fn pick_brightness(&mut self, v: f32) {
        if v.is_nan() {
            return;
        }
        self.picker.v = v.clamp(0.0, 1.0);
    }

    /// Load an exact color into the picker.
    pub fn pick_color(&mut self, color: Rgb) {
        self.picker = Hsv::from_rgb(color);
    }

    /// Set the slider position, clamped to [0, 1].
    pub fn set_position(&mut self, position: f32) {
        if position.is_nan() {
            return;
        }
        self.position = position.clamp(0.0, 1.0);
    }

    // ------------------------------------------------------------------------
    // Gradient edits
    // ------------------------------------------------------------------------

    /// Add the picker color at the slider position and select it.
    pub fn add_current(&mut self) -> Result<AddOutcome, GradientError> {
        let color = self.current_color();
        let previous = self
            .gradient
            .keypoints()
            .iter()
            .map(|k| k.color)
            .collect::<Vec<_>>();

        let outcome = self.gradient.add(self.position, color)?;
        let command = match outcome {
            AddOutcome::Inserted(index) => Command::AddKeypoint {
                index,
                keypoint: self.gradient.keypoints()[index],
            },
            AddOutcome::Replaced(index) => Command::ReplaceColor {
                index,
                old_color: previous[index],
                new_color: color,
            },
        };
        self.undo.push(command);
        self.selected = Some(outcome.index());
        Ok(outcome)
    }

    /// Select the keypoint at `index`.
    pub fn select(&mut self, index: usize) -> Result<(), GradientError> {
        if self.gradient.get(index).is_none() {
            return Err(GradientError::IndexOutOfBounds {
                index,
                len: self.gradient.len(),
            });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Remove the selected keypoint.
    ///
    /// Returns the removed keypoint, or `None` without a selection.
    pub fn remove_selected(&mut self) -> Result<Option<Keypoint>, GradientError> {
        let Some(index) = self.selected else {
            return Ok(None);
        };
        let keypoint = self.gradient.remove_at(index)?;
        self.undo.push(Command::RemoveKeypoint { index, keypoint });
        self.selected = None;
        Ok(Some(keypoint))
    }

    /// Move the selected keypoint to `position`, keeping it selected.
    ///
    /// Returns the keypoint's new index, or `None` without a selection.
    pub fn reposition_selected(&mut self, position: f32) -> Result<Option<usize>, GradientError> {
        let Some(old_index) = self.selected else {
            return Ok(None);
        };
        let old_position = self
            .gradient
            .get(old_index)
            .map(|k| k.position)
            .ok_or(GradientError::IndexOutOfBounds {
                index: old_index,
                len: self.gradient.len(),
            })?;

        let new_index = self.gradient.reposition(old_index, position)?;
        self.undo.push(Command::MoveKeypoint {
            old_index,
            new_index,
            old_position,
            new_position: position,
        });
        self.selected = Some(new_index);
        Ok(Some(new_index))
    }

    /// Start editing the selected keypoint's color in the picker.
    ///
    /// Returns the keypoint's color, or `None` without a selection.
    pub fn begin_edit_selected(&mut self) -> Option<Rgb> {
        let index = self.selected?;
        let color = self.gradient.begin_edit(index).ok()?;
        self.picker = Hsv::from_rgb(color);
        Some(color)
    }

    /// Apply the picker color to the keypoint being edited.
    pub fn commit_edit(&mut self) -> Result<usize, GradientError> {
        let original = self
            .gradient
            .pending_edit()
            .map(|edit| edit.original)
            .ok_or(GradientError::NoEditInProgress)?;
        let color = self.current_color();

        let index = self.gradient.commit_edit(color)?;
        if original != color {
            self.undo.push(Command::ReplaceColor {
                index,
                old_color: original,
                new_color: color,
            });
        }
        Ok(index)
    }

    /// Abandon the color edit and load the keypoint's unchanged color back
    /// into the picker. Returns false if no edit was open.
    pub fn cancel_edit(&mut self) -> bool {
        let Some(original) = self.gradient.cancel_edit() else {
            return false;
        };
        self.picker = Hsv::from_rgb(original);
        true
    }

    /// Remove every keypoint.
    pub fn clear(&mut self) {
        if self.gradient.is_empty() {
            return;
        }
        let keypoints = self.gradient.keypoints().to_vec();
        self.gradient.clear();
        self.undo.push(Command::Clear { keypoints });
        self.selected = None;
    }

    /// Replace the gradient wholesale, e.g. after importing a file.
    ///
    /// Undo history and selection are reset.
    pub fn load(&mut self, gradient: Gradient) {
        log::info!("Loaded gradient with {} keypoints", gradient.len());
        self.gradient = gradient;
        self.selected = None;
        self.undo.clear();
    }

    /// Undo the last edit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(cmd) = undo::undo_command(&mut self.undo, &mut self.gradient) else {
            return false;
        };
        self.follow_selection(&cmd, true);
        true
    }

    /// Redo the last undone edit. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(cmd) = undo::redo_command(&mut self.undo, &mut self.gradient) else {
            return false;
        };
        self.follow_selection(&cmd, false);
        true
    }

    // ------------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------------

    /// One row per keypoint, in position order.
    pub fn list_entries(&self) -> Vec<ListEntry> {
        self.gradient
            .keypoints()
            .iter()
            .enumerate()
            .map(|(i, k)| ListEntry {
                label: k.label(),
                background: k.color,
                foreground: k.color.contrasting_text(),
                selected: self.selected == Some(i),
            })
            .collect()
    }

    /// Keep the selection on the same keypoint across a history step.
    fn follow_selection(&mut self, cmd: &Command, undone: bool) {
        let len = self.gradient.len();
        self.selected = self
            .selected
            .and_then(|i| cmd.follow_index(i, undone))
            .filter(|&i| i < len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PendingEdit;

    const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);

    fn red_session() -> Session {
        let mut session = Session::default();
        session.pick_color(RED);
        session
    }

    #[test]
    fn test_defaults() {
        let session = Session::default();
        assert_eq!(session.position(), DEFAULT_SLIDER_POSITION);
        assert_eq!(session.current_color(), RED);
        assert_eq!(session.selected(), None);
        assert_eq!(session.gradient().len(), 2);
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_from_config_uses_tolerance() {
        let mut config = AppConfig::new();
        config.tolerance = 0.1;
        let mut session = Session::from_config(&config);
        assert_eq!(session.gradient().len(), 2);

        session.set_position(0.95);
        assert_eq!(session.add_current().unwrap(), AddOutcome::Replaced(1));
    }

    #[test]
    fn test_pick_wheel() {
        let mut session = Session::default();
        session.pick_brightness(0.5);

        assert!(session.pick_wheel(0.0, 0.0));
        assert_eq!(session.picker().s, 0.0);
        assert_eq!(session.picker().v, 0.5);

        assert!(session.pick_wheel(-1.0, 0.0));
        assert!((session.picker().h - 0.5).abs() < 1e-6);
        assert!((session.picker().s - 1.0).abs() < 1e-6);

        let before = session.picker();
        assert!(!session.pick_wheel(1.0, 1.0));
        assert_eq!(session.picker(), before);
    }

    #[test]
    fn test_clamping() {
        let mut session = Session::default();
        session.set_position(1.5);
        assert_eq!(session.position(), 1.0);
        session.set_position(-3.0);
        assert_eq!(session.position(), 0.0);
        session.set_position(f32::NAN);
        assert_eq!(session.position(), 0.0);

        session.pick_brightness(2.0);
        assert_eq!(session.picker().v, 1.0);
    }

    #[test]
    fn test_add_current_and_undo() {
        let mut session = red_session();
        let outcome = session.add_current().unwrap();
        assert_eq!(outcome, AddOutcome::Inserted(1));
        assert_eq!(session.selected(), Some(1));
        assert_eq!(session.gradient().sample(0.25).unwrap(), Rgb::new(1.0, 0.5, 0.5));

        assert!(session.undo());
        assert_eq!(session.gradient().keypoints(), Gradient::default().keypoints());
        assert_eq!(session.selected(), None);

        assert!(session.redo());
        assert_eq!(session.gradient().keypoints()[1], Keypoint::new(0.5, RED));
        assert!(!session.redo());
    }

    #[test]
    fn test_add_current_replace_is_undoable() {
        let mut session = red_session();
        session.set_position(1.0);
        assert_eq!(session.add_current().unwrap(), AddOutcome::Replaced(1));
        assert_eq!(session.gradient().keypoints()[1].color, RED);

        session.undo();
        assert_eq!(session.gradient().keypoints()[1].color, Rgb::BLACK);
        assert_eq!(session.history().redo_description().unwrap(), "Change color");
    }

    #[test]
    fn test_select_out_of_range() {
        let mut session = Session::default();
        assert_eq!(
            session.select(2),
            Err(GradientError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert!(session.select(1).is_ok());
        assert_eq!(session.selected(), Some(1));
    }

    #[test]
    fn test_remove_selected() {
        let mut session = Session::default();
        assert_eq!(session.remove_selected(), Ok(None));

        session.select(0).unwrap();
        assert_eq!(
            session.remove_selected(),
            Ok(Some(Keypoint::new(0.0, Rgb::WHITE)))
        );
        assert_eq!(session.selected(), None);
        assert_eq!(session.gradient().len(), 1);

        session.undo();
        assert_eq!(session.gradient().len(), 2);
    }

    #[test]
    fn test_remove_selected_keeps_selection_on_error() {
        let mut session = Session::default();
        session.selected = Some(5);
        assert_eq!(
            session.remove_selected(),
            Err(GradientError::IndexOutOfBounds { index: 5, len: 2 })
        );
        assert_eq!(session.selected(), Some(5));
        assert_eq!(session.gradient().len(), 2);
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_undo_add_then_remove_keeps_end_stops() {
        let mut session = red_session();
        session.add_current().unwrap();
        assert!(session.undo());
        assert_eq!(session.selected(), None);

        assert_eq!(session.remove_selected(), Ok(None));
        assert_eq!(session.gradient().keypoints(), Gradient::default().keypoints());
    }

    #[test]
    fn test_undo_redo_move_follows_selection() {
        let mut session = red_session();
        session.set_position(0.25);
        session.add_current().unwrap();
        session.pick_color(Rgb::new(0.0, 0.0, 1.0));
        session.set_position(0.75);
        session.add_current().unwrap();

        session.select(1).unwrap();
        assert_eq!(session.reposition_selected(0.9).unwrap(), Some(2));

        assert!(session.undo());
        assert_eq!(session.selected(), Some(1));
        assert_eq!(session.gradient().keypoints()[1], Keypoint::new(0.25, RED));

        assert!(session.redo());
        assert_eq!(session.selected(), Some(2));
        assert_eq!(session.gradient().keypoints()[2], Keypoint::new(0.9, RED));
    }

    #[test]
    fn test_undo_remove_shifts_selection() {
        let mut session = red_session();
        session.add_current().unwrap();
        session.select(0).unwrap();
        session.remove_selected().unwrap();

        session.select(0).unwrap();
        assert_eq!(session.gradient().keypoints()[0].color, RED);
        assert!(session.undo());
        assert_eq!(session.selected(), Some(1));
        assert_eq!(session.gradient().keypoints()[1].color, RED);
    }

    #[test]
    fn test_reposition_selected() {
        let mut session = red_session();
        session.set_position(0.25);
        session.add_current().unwrap();

        assert_eq!(session.reposition_selected(0.75).unwrap(), Some(1));
        assert_eq!(session.gradient().keypoints()[1].position, 0.75);
        assert!(session.reposition_selected(1.5).is_err());
        assert_eq!(session.gradient().keypoints()[1].position, 0.75);

        session.undo();
        assert_eq!(session.gradient().keypoints()[1].position, 0.25);
    }

    #[test]
    fn test_edit_commit() {
        let mut session = Session::default();
        session.select(1).unwrap();
        assert_eq!(session.begin_edit_selected(), Some(Rgb::BLACK));
        assert_eq!(
            session.gradient().pending_edit(),
            Some(&PendingEdit {
                index: 1,
                original: Rgb::BLACK
            })
        );
        assert_eq!(session.current_color(), Rgb::BLACK);

        session.pick_color(RED);
        assert_eq!(session.commit_edit(), Ok(1));
        assert_eq!(session.gradient().keypoints()[1].color, RED);
        assert_eq!(session.commit_edit(), Err(GradientError::NoEditInProgress));

        session.undo();
        assert_eq!(session.gradient().keypoints()[1].color, Rgb::BLACK);
    }

    #[test]
    fn test_edit_cancel_restores_original_color() {
        let mut session = red_session();
        session.select(0).unwrap();
        session.begin_edit_selected();
        assert_eq!(session.current_color(), Rgb::WHITE);

        session.pick_color(Rgb::new(0.0, 0.0, 1.0));
        assert!(session.cancel_edit());
        assert_eq!(session.current_color(), Rgb::WHITE);
        assert_eq!(session.gradient().keypoints()[0].color, Rgb::WHITE);
        assert!(!session.cancel_edit());
    }

    #[test]
    fn test_structural_change_drops_edit() {
        let mut session = red_session();
        session.select(0).unwrap();
        session.begin_edit_selected();

        session.set_position(0.5);
        session.add_current().unwrap();
        assert_eq!(session.commit_edit(), Err(GradientError::NoEditInProgress));
        assert!(!session.cancel_edit());
    }

    #[test]
    fn test_clear() {
        let mut session = Session::default();
        session.select(0).unwrap();
        session.clear();
        assert!(session.gradient().is_empty());
        assert_eq!(session.selected(), None);

        let count = session.history().undo_count();
        session.clear();
        assert_eq!(session.history().undo_count(), count);

        session.undo();
        assert_eq!(session.gradient().len(), 2);
    }

    #[test]
    fn test_load_resets_history() {
        let mut session = red_session();
        session.add_current().unwrap();
        session.load(Gradient::default());
        assert!(!session.history().can_undo());
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_list_entries() {
        let mut session = red_session();
        session.add_current().unwrap();
        let entries = session.list_entries();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, "Pos: 0.00 - RGB: (255, 255, 255)");
        assert_eq!(entries[0].foreground, Rgb::BLACK);
        assert_eq!(entries[1].label, "Pos: 0.50 - RGB: (255, 0, 0)");
        assert_eq!(entries[1].background.to_hex(), "#ff0000");
        assert!(entries[1].selected);
        assert_eq!(entries[2].foreground, Rgb::WHITE);
    }
}
