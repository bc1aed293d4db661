//! The gradient keypoint store.
//!
//! A [`Gradient`] holds keypoints sorted ascending by position and samples
//! colors between them by linear interpolation. Positions closer than the
//! store's tolerance share a slot: adding a color there recolors the existing
//! keypoint instead of inserting a second one.

use std::iter::FusedIterator;

use super::{AddOutcome, GradientError, Keypoint, PendingEdit, Rgb};
use crate::constants::DEFAULT_TOLERANCE;

/// An ordered set of color keypoints over [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    keypoints: Vec<Keypoint>,
    tolerance: f32,
    pending_edit: Option<PendingEdit>,
}

impl Default for Gradient {
    /// White at 0.0 to black at 1.0, so a fresh gradient can be previewed.
    fn default() -> Self {
        let mut gradient = Self::new(DEFAULT_TOLERANCE);
        gradient.keypoints = vec![
            Keypoint::new(0.0, Rgb::WHITE),
            Keypoint::new(1.0, Rgb::BLACK),
        ];
        gradient
    }
}

fn check_position(position: f32) -> Result<(), GradientError> {
    if position.is_finite() && (0.0..=1.0).contains(&position) {
        Ok(())
    } else {
        Err(GradientError::PositionOutOfRange { position })
    }
}

impl Gradient {
    /// Create an empty gradient with the given same-position tolerance.
    ///
    /// Negative or NaN tolerances are treated as 0.0.
    pub fn new(tolerance: f32) -> Self {
        Self {
            keypoints: Vec::new(),
            tolerance: tolerance.max(0.0),
            pending_edit: None,
        }
    }

    /// Build a gradient from arbitrary keypoints, sorting them by position.
    ///
    /// Keypoints are taken as-is; callers validate ranges first.
    pub(crate) fn from_keypoints(mut keypoints: Vec<Keypoint>, tolerance: f32) -> Self {
        keypoints.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self {
            keypoints,
            ..Self::new(tolerance)
        }
    }

    /// All keypoints in ascending position order.
    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    /// Keypoint at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }

    /// Number of keypoints.
    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    /// True when there are no keypoints.
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Same-position tolerance used by [`add`](Self::add).
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Keypoint positions in order.
    pub fn positions(&self) -> Vec<f32> {
        self.keypoints.iter().map(|k| k.position).collect()
    }

    /// Keypoint colors in order.
    pub fn colors(&self) -> Vec<Rgb> {
        self.keypoints.iter().map(|k| k.color).collect()
    }

    fn check_index(&self, index: usize) -> Result<(), GradientError> {
        if index < self.keypoints.len() {
            Ok(())
        } else {
            Err(GradientError::IndexOutOfBounds {
                index,
                len: self.keypoints.len(),
            })
        }
    }

    /// Fails with [`GradientError::InsufficientData`] unless there are at least two keypoints.
    pub fn ensure_samplable(&self) -> Result<(), GradientError> {
        if self.keypoints.len() < 2 {
            return Err(GradientError::InsufficientData {
                count: self.keypoints.len(),
            });
        }
        Ok(())
    }

    /// Index of the first keypoint within tolerance of `position`.
    fn find_near(&self, position: f32) -> Option<usize> {
        self.keypoints
            .iter()
            .position(|k| (k.position - position).abs() < self.tolerance)
    }

    fn drop_pending_edit(&mut self) {
        if let Some(edit) = self.pending_edit.take() {
            log::debug!("Dropped pending edit of keypoint {}", edit.index);
        }
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Add a color at `position`.
    ///
    /// If a keypoint already lies within tolerance, only its color changes.
    /// Otherwise a new keypoint is inserted in sorted order.
    pub fn add(&mut self, position: f32, color: Rgb) -> Result<AddOutcome, GradientError> {
        check_position(position)?;

        if let Some(index) = self.find_near(position) {
            self.keypoints[index].color = color;
            log::debug!(
                "Replaced color at {:.3} (index {}) with {}",
                position,
                index,
                color.to_hex()
            );
            return Ok(AddOutcome::Replaced(index));
        }

        let index = self.keypoints.partition_point(|k| k.position <= position);
        self.keypoints.insert(index, Keypoint::new(position, color));
        self.drop_pending_edit();
        log::debug!(
            "Inserted {} at {:.3} (index {})",
            color.to_hex(),
            position,
            index
        );
        Ok(AddOutcome::Inserted(index))
    }

    /// Remove and return the keypoint at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<Keypoint, GradientError> {
        self.check_index(index)?;
        let removed = self.keypoints.remove(index);
        self.drop_pending_edit();
        log::debug!("Removed keypoint {} at {:.3}", index, removed.position);
        Ok(removed)
    }

    /// Move the keypoint at `index` to `new_position` and return its new index.
    ///
    /// The moved keypoint lands after any keypoint sharing its new position.
    /// No tolerance merge happens here, so two keypoints may end up closer
    /// than the tolerance.
    pub fn reposition(&mut self, index: usize, new_position: f32) -> Result<usize, GradientError> {
        self.check_index(index)?;
        check_position(new_position)?;

        let mut keypoint = self.keypoints.remove(index);
        let old_position = keypoint.position;
        keypoint.position = new_position;
        let new_index = self
            .keypoints
            .partition_point(|k| k.position <= new_position);
        self.keypoints.insert(new_index, keypoint);
        self.drop_pending_edit();

        log::debug!(
            "Moved keypoint {:.3} -> {:.3} (index {} -> {})",
            old_position,
            new_position,
            index,
            new_index
        );
        Ok(new_index)
    }

    /// Recolor the keypoint at `index`, returning the previous color.
    pub fn set_color(&mut self, index: usize, color: Rgb) -> Result<Rgb, GradientError> {
        self.check_index(index)?;
        let old = std::mem::replace(&mut self.keypoints[index].color, color);
        Ok(old)
    }

    /// Remove every keypoint.
    pub fn clear(&mut self) {
        log::debug!("Cleared {} keypoints", self.keypoints.len());
        self.keypoints.clear();
        self.drop_pending_edit();
    }

    /// Replace the whole keypoint list, keeping the tolerance.
    pub(crate) fn replace_keypoints(&mut self, keypoints: Vec<Keypoint>) -> Vec<Keypoint> {
        self.drop_pending_edit();
        std::mem::replace(&mut self.keypoints, keypoints)
    }

    /// Insert a keypoint at an exact index without sorting.
    ///
    /// Only for restoring a previously observed state (undo/redo).
    pub(crate) fn restore_at(&mut self, index: usize, keypoint: Keypoint) {
        let index = index.min(self.keypoints.len());
        self.keypoints.insert(index, keypoint);
        self.drop_pending_edit();
    }

    /// Remove a keypoint at an exact index, if present.
    pub(crate) fn take_at(&mut self, index: usize) -> Option<Keypoint> {
        if index >= self.keypoints.len() {
            return None;
        }
        self.drop_pending_edit();
        Some(self.keypoints.remove(index))
    }

    // ------------------------------------------------------------------------
    // Color editing
    // ------------------------------------------------------------------------

    /// Start editing the color of the keypoint at `index`.
    ///
    /// Returns the current color so the caller can load it into its picker.
    /// A previous pending edit is discarded.
    pub fn begin_edit(&mut self, index: usize) -> Result<Rgb, GradientError> {
        self.check_index(index)?;
        let original = self.keypoints[index].color;
        self.pending_edit = Some(PendingEdit { index, original });
        Ok(original)
    }

    /// Apply `color` to the keypoint being edited and return its index.
    pub fn commit_edit(&mut self, color: Rgb) -> Result<usize, GradientError> {
        let edit = self
            .pending_edit
            .take()
            .ok_or(GradientError::NoEditInProgress)?;
        let len = self.keypoints.len();
        let keypoint = self
            .keypoints
            .get_mut(edit.index)
            .ok_or(GradientError::IndexOutOfBounds {
                index: edit.index,
                len,
            })?;
        keypoint.color = color;
        log::debug!("Committed color {} to keypoint {}", color.to_hex(), edit.index);
        Ok(edit.index)
    }

    /// Abandon the pending edit, returning the color it started from.
    pub fn cancel_edit(&mut self) -> Option<Rgb> {
        self.pending_edit.take().map(|edit| edit.original)
    }

    /// The edit in progress, if any.
    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.pending_edit.as_ref()
    }

    // ------------------------------------------------------------------------
    // Sampling
    // ------------------------------------------------------------------------

    /// Color at `t`, linearly interpolated between the bracketing keypoints.
    ///
    /// Values of `t` before the first or after the last keypoint clamp to
    /// that keypoint's color. A `t` exactly on a keypoint returns its color
    /// unchanged.
    pub fn sample(&self, t: f32) -> Result<Rgb, GradientError> {
        self.ensure_samplable()?;
        if !t.is_finite() {
            return Err(GradientError::PositionOutOfRange { position: t });
        }
        Ok(self.sample_unchecked(t))
    }

    /// Sampling without the keypoint-count check. Needs at least two keypoints.
    fn sample_unchecked(&self, t: f32) -> Rgb {
        let keypoints = &self.keypoints;
        let first = keypoints[0];
        let last = keypoints[keypoints.len() - 1];

        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        // first.position < t < last.position, so 1 <= upper <= len - 1
        let upper = keypoints.partition_point(|k| k.position <= t);
        let lo = keypoints[upper - 1];
        let hi = keypoints[upper];

        if lo.position == t {
            return lo.color;
        }
        let span = hi.position - lo.position;
        if span <= 0.0 {
            return lo.color;
        }

        lo.color.lerp(hi.color, (t - lo.position) / span)
    }

    /// Lazily sample `n` evenly spaced colors from 0.0 to 1.0 inclusive.
    ///
    /// The returned iterator can be cloned to replay the preview.
    pub fn render_preview(&self, n: usize) -> Result<Preview<'_>, GradientError> {
        self.ensure_samplable()?;
        Ok(Preview {
            gradient: self,
            front: 0,
            back: n,
            count: n,
        })
    }
}

/// Iterator over evenly spaced samples of a [`Gradient`].
#[derive(Debug, Clone)]
pub struct Preview<'a> {
    gradient: &'a Gradient,
    front: usize,
    back: usize,
    count: usize,
}

impl Preview<'_> {
    fn position_of(&self, i: usize) -> f32 {
        if self.count <= 1 {
            0.0
        } else {
            i as f32 / (self.count - 1) as f32
        }
    }
}

impl Iterator for Preview<'_> {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        if self.front >= self.back {
            return None;
        }
        let t = self.position_of(self.front);
        self.front += 1;
        Some(self.gradient.sample_unchecked(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Preview<'_> {
    fn next_back(&mut self) -> Option<Rgb> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let t = self.position_of(self.back);
        Some(self.gradient.sample_unchecked(t))
    }
}

impl ExactSizeIterator for Preview<'_> {}

impl FusedIterator for Preview<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);

    fn three_stop() -> Gradient {
        let mut g = Gradient::default();
        g.add(0.5, RED).unwrap();
        g
    }

    #[test]
    fn test_default_is_white_to_black() {
        let g = Gradient::default();
        assert_eq!(g.len(), 2);
        assert_eq!(g.keypoints()[0], Keypoint::new(0.0, Rgb::WHITE));
        assert_eq!(g.keypoints()[1], Keypoint::new(1.0, Rgb::BLACK));
        assert_eq!(g.tolerance(), DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_add_inserts_sorted() {
        let g = three_stop();
        assert_eq!(g.positions(), vec![0.0, 0.5, 1.0]);
        assert_eq!(g.colors()[1], RED);
    }

    #[test]
    fn test_add_reports_insert_index() {
        let mut g = Gradient::default();
        assert_eq!(g.add(0.7, RED).unwrap(), AddOutcome::Inserted(1));
        assert_eq!(g.add(0.2, BLUE).unwrap(), AddOutcome::Inserted(1));
        assert_eq!(g.positions(), vec![0.0, 0.2, 0.7, 1.0]);
    }

    #[test]
    fn test_add_within_tolerance_replaces() {
        let mut g = three_stop();
        let outcome = g.add(0.5005, BLUE).unwrap();
        assert_eq!(outcome, AddOutcome::Replaced(1));
        assert_eq!(g.len(), 3);
        assert_eq!(g.keypoints()[1], Keypoint::new(0.5, BLUE));
    }

    #[test]
    fn test_repeated_replacements_never_duplicate() {
        let mut g = Gradient::default();
        g.add(0.0, RED).unwrap();
        g.add(0.0, BLUE).unwrap();
        g.add(1.0, RED).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.colors(), vec![BLUE, RED]);
    }

    #[test]
    fn test_add_just_outside_tolerance_inserts() {
        let mut g = three_stop();
        assert_eq!(g.add(0.502, BLUE).unwrap(), AddOutcome::Inserted(2));
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn test_custom_tolerance() {
        let mut g = Gradient::new(0.1);
        g.add(0.5, RED).unwrap();
        assert_eq!(g.add(0.55, BLUE).unwrap(), AddOutcome::Replaced(0));
        assert_eq!(g.len(), 1);

        assert_eq!(Gradient::new(-1.0).tolerance(), 0.0);
        assert_eq!(Gradient::new(f32::NAN).tolerance(), 0.0);
    }

    #[test]
    fn test_add_rejects_out_of_range() {
        let mut g = Gradient::default();
        assert_eq!(
            g.add(1.5, RED),
            Err(GradientError::PositionOutOfRange { position: 1.5 })
        );
        assert!(g.add(-0.1, RED).is_err());
        assert!(g.add(f32::NAN, RED).is_err());
        assert_eq!(g, Gradient::default());
    }

    #[test]
    fn test_remove_at() {
        let mut g = three_stop();
        let removed = g.remove_at(1).unwrap();
        assert_eq!(removed, Keypoint::new(0.5, RED));
        assert_eq!(g.positions(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut g = Gradient::default();
        assert_eq!(
            g.remove_at(5),
            Err(GradientError::IndexOutOfBounds { index: 5, len: 2 })
        );
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_reposition_resorts() {
        let mut g = three_stop();
        let new_index = g.reposition(0, 0.75).unwrap();
        assert_eq!(new_index, 1);
        assert_eq!(g.positions(), vec![0.5, 0.75, 1.0]);
        assert_eq!(g.keypoints()[1].color, Rgb::WHITE);
    }

    #[test]
    fn test_reposition_errors() {
        let mut g = three_stop();
        assert_eq!(
            g.reposition(0, 1.2),
            Err(GradientError::PositionOutOfRange { position: 1.2 })
        );
        assert_eq!(
            g.reposition(9, 0.3),
            Err(GradientError::IndexOutOfBounds { index: 9, len: 3 })
        );
        assert_eq!(g.positions(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_clear() {
        let mut g = three_stop();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(
            g.sample(0.5),
            Err(GradientError::InsufficientData { count: 0 })
        );
    }

    #[test]
    fn test_sample_between_keypoints() {
        let g = three_stop();
        assert_eq!(g.sample(0.25).unwrap(), Rgb::new(1.0, 0.5, 0.5));
        assert_eq!(g.sample(0.75).unwrap(), Rgb::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_sample_exact_on_keypoints() {
        let mut g = Gradient::new(DEFAULT_TOLERANCE);
        g.add(0.1, Rgb::new(0.3, 0.7, 0.9)).unwrap();
        g.add(0.37, Rgb::new(0.11, 0.13, 0.17)).unwrap();
        g.add(0.9, Rgb::new(0.6, 0.2, 0.4)).unwrap();

        for kp in g.keypoints() {
            assert_eq!(g.sample(kp.position).unwrap(), kp.color);
        }
    }

    #[test]
    fn test_sample_clamps_outside_range() {
        let mut g = Gradient::new(DEFAULT_TOLERANCE);
        g.add(0.2, RED).unwrap();
        g.add(0.8, BLUE).unwrap();

        assert_eq!(g.sample(0.0).unwrap(), RED);
        assert_eq!(g.sample(-3.0).unwrap(), RED);
        assert_eq!(g.sample(1.0).unwrap(), BLUE);
        assert_eq!(g.sample(7.0).unwrap(), BLUE);
    }

    #[test]
    fn test_sample_stays_between_neighbors() {
        let g = three_stop();
        for i in 0..=50 {
            let t = 0.5 + 0.5 * i as f32 / 50.0;
            let c = g.sample(t).unwrap();
            for (channel, (lo, hi)) in c
                .channels()
                .iter()
                .zip(RED.channels().iter().zip(Rgb::BLACK.channels().iter()))
            {
                let (min, max) = if lo < hi { (*lo, *hi) } else { (*hi, *lo) };
                assert!(*channel >= min - 1e-6 && *channel <= max + 1e-6);
            }
        }
    }

    #[test]
    fn test_sample_duplicate_positions() {
        let mut g = Gradient::new(0.0);
        g.add(0.0, Rgb::WHITE).unwrap();
        g.add(0.5, RED).unwrap();
        g.add(0.5, BLUE).unwrap();
        g.add(1.0, Rgb::BLACK).unwrap();
        assert_eq!(g.len(), 4);

        // Left of the step interpolates toward the first duplicate
        assert_eq!(g.sample(0.25).unwrap(), Rgb::new(1.0, 0.5, 0.5));
        // Right of the step interpolates away from the second
        assert_eq!(g.sample(0.75).unwrap(), Rgb::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_sample_needs_two_keypoints() {
        let mut g = Gradient::new(DEFAULT_TOLERANCE);
        g.add(0.3, RED).unwrap();
        assert_eq!(
            g.sample(0.5),
            Err(GradientError::InsufficientData { count: 1 })
        );
    }

    #[test]
    fn test_sample_rejects_nan() {
        let g = Gradient::default();
        assert!(matches!(
            g.sample(f32::NAN),
            Err(GradientError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_render_preview() {
        let g = three_stop();
        let preview: Vec<Rgb> = g.render_preview(5).unwrap().collect();
        assert_eq!(
            preview,
            vec![
                Rgb::WHITE,
                Rgb::new(1.0, 0.5, 0.5),
                RED,
                Rgb::new(0.5, 0.0, 0.0),
                Rgb::BLACK,
            ]
        );
    }

    #[test]
    fn test_render_preview_is_restartable() {
        let g = three_stop();
        let preview = g.render_preview(16).unwrap();
        assert_eq!(preview.len(), 16);

        let first: Vec<Rgb> = preview.clone().collect();
        let second: Vec<Rgb> = preview.collect();
        assert_eq!(first, second);

        let reversed: Vec<Rgb> = g.render_preview(16).unwrap().rev().collect();
        assert_eq!(reversed.first(), first.last());
    }

    #[test]
    fn test_render_preview_edge_counts() {
        let g = three_stop();
        assert_eq!(g.render_preview(0).unwrap().count(), 0);
        let single: Vec<Rgb> = g.render_preview(1).unwrap().collect();
        assert_eq!(single, vec![Rgb::WHITE]);

        let empty = Gradient::new(DEFAULT_TOLERANCE);
        assert!(empty.render_preview(10).is_err());
    }

    #[test]
    fn test_edit_commit() {
        let mut g = three_stop();
        assert_eq!(g.begin_edit(1).unwrap(), RED);
        assert_eq!(g.pending_edit().map(|e| e.index), Some(1));

        assert_eq!(g.commit_edit(BLUE).unwrap(), 1);
        assert_eq!(g.keypoints()[1].color, BLUE);
        assert!(g.pending_edit().is_none());
    }

    #[test]
    fn test_edit_cancel_restores_nothing_but_reports_original() {
        let mut g = three_stop();
        g.begin_edit(1).unwrap();
        assert_eq!(g.cancel_edit(), Some(RED));
        assert_eq!(g.keypoints()[1].color, RED);
        assert_eq!(g.cancel_edit(), None);
    }

    #[test]
    fn test_commit_without_begin() {
        let mut g = three_stop();
        assert_eq!(g.commit_edit(BLUE), Err(GradientError::NoEditInProgress));
    }

    #[test]
    fn test_structural_change_drops_edit() {
        let mut g = three_stop();
        g.begin_edit(2).unwrap();
        g.remove_at(0).unwrap();
        assert!(g.pending_edit().is_none());
        assert_eq!(g.commit_edit(BLUE), Err(GradientError::NoEditInProgress));
    }

    #[test]
    fn test_begin_edit_out_of_bounds() {
        let mut g = Gradient::default();
        assert!(g.begin_edit(2).is_err());
        assert!(g.pending_edit().is_none());
    }

    #[test]
    fn test_from_keypoints_sorts() {
        let g = Gradient::from_keypoints(
            vec![
                Keypoint::new(1.0, Rgb::BLACK),
                Keypoint::new(0.0, Rgb::WHITE),
                Keypoint::new(0.4, RED),
            ],
            DEFAULT_TOLERANCE,
        );
        assert_eq!(g.positions(), vec![0.0, 0.4, 1.0]);
    }
}
