//! Per-position digit storage.
//!
//! The store is an arena of N slots addressed by index. A slot is either
//! empty or holds one ASCII decimal digit; nothing else can be written. The
//! slot count never changes after construction.

use crate::error::EntryError;

/// What a successful edit did to its slot.
///
/// The focus rules depend on the transition, not on the resulting value:
/// only [`Edit::Filled`] advances focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Empty slot received a digit.
    Filled,
    /// Filled slot received a digit (possibly the same one).
    Overwritten,
    /// Filled slot was emptied.
    Cleared,
    /// Empty slot was emptied again. Nothing changed, focus included.
    Unchanged,
    /// Backspace on an empty slot moved focus to the previous slot, which
    /// was already empty. Only the focused index changed.
    SteppedBack,
}

/// Fixed-length sequence of optional digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentStore {
    slots: Vec<Option<char>>,
}

impl SegmentStore {
    /// Create a store with `len` empty slots.
    pub fn new(len: usize) -> Self {
        Self { slots: vec![None; len] }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the store has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Digit at `index`. `None` if the slot is empty or out of range.
    pub fn get(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Digit at `index`, distinguishing empty slots from bad indices.
    pub fn try_get(&self, index: usize) -> Result<Option<char>, EntryError> {
        self.slots
            .get(index)
            .copied()
            .ok_or(EntryError::IndexOutOfRange { index, len: self.slots.len() })
    }

    /// All slots in order.
    pub fn segments(&self) -> &[Option<char>] {
        &self.slots
    }

    /// Number of slots holding a digit.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns true if every slot holds a digit.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Write a single digit or the empty string into `index`.
    ///
    /// Anything else (multi-character paste, letters, non-ASCII digits) is
    /// rejected and the slot keeps its previous value.
    ///
    /// # Errors
    ///
    /// - `EntryError::IndexOutOfRange` if `index >= len()`
    /// - `EntryError::InvalidInput` if `value` is not `""` or one digit
    pub fn set_digit(&mut self, index: usize, value: &str) -> Result<Edit, EntryError> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or(EntryError::IndexOutOfRange { index, len })?;

        let mut chars = value.chars();
        let next = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_digit() => Some(c),
            _ => return Err(EntryError::InvalidInput { index, value: value.to_owned() }),
        };

        let edit = match (*slot, next) {
            (None, Some(_)) => Edit::Filled,
            (Some(_), Some(_)) => Edit::Overwritten,
            (Some(_), None) => Edit::Cleared,
            (None, None) => Edit::Unchanged,
        };
        *slot = next;
        Ok(edit)
    }

    /// Empty the slot at `index`.
    pub fn clear(&mut self, index: usize) -> Result<Edit, EntryError> {
        self.set_digit(index, "")
    }

    /// Empty every slot.
    pub fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// The assembled code.
    ///
    /// # Errors
    ///
    /// - `EntryError::IncompleteCode` if any slot is empty
    pub fn code(&self) -> Result<String, EntryError> {
        if !self.is_complete() {
            return Err(EntryError::IncompleteCode {
                filled: self.filled_count(),
                required: self.slots.len(),
            });
        }
        Ok(self.slots.iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_blank() {
        let store = SegmentStore::new(6);
        assert_eq!(store.len(), 6);
        assert_eq!(store.filled_count(), 0);
        assert!(store.segments().iter().all(Option::is_none));
    }

    #[test]
    fn edits_report_transition() {
        let mut store = SegmentStore::new(4);
        assert_eq!(store.set_digit(1, "7"), Ok(Edit::Filled));
        assert_eq!(store.set_digit(1, "8"), Ok(Edit::Overwritten));
        assert_eq!(store.set_digit(1, "8"), Ok(Edit::Overwritten));
        assert_eq!(store.clear(1), Ok(Edit::Cleared));
        assert_eq!(store.clear(1), Ok(Edit::Unchanged));
    }

    #[test]
    fn rejects_non_digits_without_mutation() {
        let mut store = SegmentStore::new(4);
        store.set_digit(0, "3").unwrap();

        for bad in ["a", "12", " ", "-", "٣", "3 "] {
            assert_eq!(
                store.set_digit(0, bad),
                Err(EntryError::InvalidInput { index: 0, value: bad.to_owned() })
            );
        }
        assert_eq!(store.get(0), Some('3'));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let mut store = SegmentStore::new(2);
        assert_eq!(store.set_digit(2, "1"), Err(EntryError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(store.try_get(5), Err(EntryError::IndexOutOfRange { index: 5, len: 2 }));
        assert_eq!(store.get(5), None);
    }

    #[test]
    fn code_requires_every_slot() {
        let mut store = SegmentStore::new(3);
        store.set_digit(0, "1").unwrap();
        store.set_digit(2, "3").unwrap();
        assert_eq!(store.code(), Err(EntryError::IncompleteCode { filled: 2, required: 3 }));

        store.set_digit(1, "2").unwrap();
        assert_eq!(store.code(), Ok("123".to_owned()));
    }

    #[test]
    fn clear_all_keeps_length() {
        let mut store = SegmentStore::new(3);
        for i in 0..3 {
            store.set_digit(i, "9").unwrap();
        }
        store.clear_all();
        assert_eq!(store.len(), 3);
        assert_eq!(store.filled_count(), 0);
    }
}
