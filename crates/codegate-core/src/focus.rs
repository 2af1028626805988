//! Focus state machine over the segment arena.
//!
//! The controller owns the [`SegmentStore`] and a declarative focused index.
//! Renderers read [`FocusController::focused`] instead of holding handles to
//! individual input fields.
//!
//! # Transitions
//!
//! ```text
//! digit at i, slot empty      → fill i, focus i+1 (stay on i if last)
//! digit at i, slot filled     → overwrite i, focus unchanged
//! backspace at i, slot filled → clear i, focus unchanged
//! backspace at i, slot empty  → clear i-1, focus i-1 (no-op at 0)
//!                               SteppedBack when i-1 was empty too
//! ```

use crate::{
    error::EntryError,
    segments::{Edit, SegmentStore},
};

/// Segment store plus the index that owns input focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusController {
    store: SegmentStore,
    /// Focused segment. `None` when blurred.
    focused: Option<usize>,
}

impl FocusController {
    /// Create a controller over `len` empty segments, focused on the first.
    pub fn new(len: usize) -> Self {
        Self { store: SegmentStore::new(len), focused: (len > 0).then_some(0) }
    }

    /// Underlying segment store.
    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    /// Focused segment. `None` when blurred.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Apply an edit at `index` and advance focus on empty→filled.
    ///
    /// Overwrites and clears never move focus.
    pub fn input(&mut self, index: usize, value: &str) -> Result<Edit, EntryError> {
        let edit = self.store.set_digit(index, value)?;
        if edit == Edit::Filled {
            let last = self.store.len() - 1;
            self.focused = Some(if index < last { index + 1 } else { index });
        }
        Ok(edit)
    }

    /// Handle a backspace keypress on segment `index`.
    ///
    /// Returns [`Edit::Cleared`] when a digit was removed (from `index` or,
    /// when it was already empty, from `index - 1`) and [`Edit::SteppedBack`]
    /// when focus moved back over an empty slot.
    pub fn backspace(&mut self, index: usize) -> Result<Edit, EntryError> {
        match self.store.try_get(index)? {
            Some(_) => self.store.clear(index),
            None if index > 0 => {
                let previous = index - 1;
                let edit = self.store.clear(previous)?;
                self.focused = Some(previous);
                Ok(if edit == Edit::Unchanged { Edit::SteppedBack } else { edit })
            },
            None => Ok(Edit::Unchanged),
        }
    }

    /// Move focus to `index`.
    pub fn focus(&mut self, index: usize) -> Result<(), EntryError> {
        self.store.try_get(index)?;
        self.focused = Some(index);
        Ok(())
    }

    /// Drop focus from every segment.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Clear every segment and focus the first.
    pub fn reset(&mut self) {
        self.store.clear_all();
        self.focused = (!self.store.is_empty()).then_some(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_into_empty_advances() {
        let mut focus = FocusController::new(4);
        assert_eq!(focus.input(0, "1"), Ok(Edit::Filled));
        assert_eq!(focus.focused(), Some(1));
    }

    #[test]
    fn last_segment_keeps_focus() {
        let mut focus = FocusController::new(3);
        focus.focus(2).unwrap();
        focus.input(2, "9").unwrap();
        assert_eq!(focus.focused(), Some(2));
    }

    #[test]
    fn overwrite_does_not_move_focus() {
        let mut focus = FocusController::new(4);
        focus.input(0, "1").unwrap();
        focus.focus(0).unwrap();

        assert_eq!(focus.input(0, "2"), Ok(Edit::Overwritten));
        assert_eq!(focus.focused(), Some(0));
        assert_eq!(focus.store().get(0), Some('2'));
    }

    #[test]
    fn clearing_by_input_does_not_move_focus() {
        let mut focus = FocusController::new(4);
        focus.input(0, "1").unwrap();
        focus.focus(0).unwrap();

        assert_eq!(focus.input(0, ""), Ok(Edit::Cleared));
        assert_eq!(focus.focused(), Some(0));
    }

    #[test]
    fn backspace_on_filled_clears_in_place() {
        let mut focus = FocusController::new(4);
        focus.input(0, "1").unwrap();
        focus.input(1, "2").unwrap();
        focus.focus(1).unwrap();

        assert_eq!(focus.backspace(1), Ok(Edit::Cleared));
        assert_eq!(focus.focused(), Some(1));
        assert_eq!(focus.store().get(1), None);
        assert_eq!(focus.store().get(0), Some('1'));
    }

    #[test]
    fn backspace_on_empty_steps_back_and_clears() {
        let mut focus = FocusController::new(4);
        focus.input(0, "1").unwrap();
        focus.input(1, "2").unwrap();
        assert_eq!(focus.focused(), Some(2));

        assert_eq!(focus.backspace(2), Ok(Edit::Cleared));
        assert_eq!(focus.focused(), Some(1));
        assert_eq!(focus.store().get(1), None);
    }

    #[test]
    fn backspace_over_empty_previous_reports_focus_move() {
        let mut focus = FocusController::new(4);
        focus.focus(2).unwrap();

        assert_eq!(focus.backspace(2), Ok(Edit::SteppedBack));
        assert_eq!(focus.focused(), Some(1));
        assert_eq!(focus.store().filled_count(), 0);
    }

    #[test]
    fn backspace_at_zero_is_noop() {
        let mut focus = FocusController::new(4);
        assert_eq!(focus.backspace(0), Ok(Edit::Unchanged));
        assert_eq!(focus.focused(), Some(0));
    }

    #[test]
    fn rejected_input_keeps_focus() {
        let mut focus = FocusController::new(4);
        assert!(focus.input(0, "x").is_err());
        assert!(focus.input(0, "42").is_err());
        assert_eq!(focus.focused(), Some(0));
        assert_eq!(focus.store().filled_count(), 0);
    }

    #[test]
    fn focus_validates_index() {
        let mut focus = FocusController::new(2);
        assert_eq!(focus.focus(2), Err(EntryError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(focus.focused(), Some(0));
    }

    #[test]
    fn reset_clears_and_refocuses() {
        let mut focus = FocusController::new(3);
        focus.input(0, "1").unwrap();
        focus.input(1, "2").unwrap();
        focus.blur();

        focus.reset();
        assert_eq!(focus.focused(), Some(0));
        assert_eq!(focus.store().filled_count(), 0);
    }
}
