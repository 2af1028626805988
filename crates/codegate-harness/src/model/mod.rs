//! Reference model for model-based testing.
//!
//! [`ModelEntry`] is an intentionally naive implementation of the code entry
//! control. Random [`Operation`] sequences are applied to both the model and
//! the real [`CodeEntry`] through [`apply_to_entry`]; after every step the
//! results and the [`ObservableState`] of both must be identical.

mod entry;
mod operation;

use codegate_core::{CodeEntry, EntryError, Operation as Request};
pub use entry::ModelEntry;
pub use operation::{Operation, OperationError, OperationResult};

/// State visible to a user of the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Segment contents in order.
    pub segments: Vec<Option<char>>,
    /// Focused segment.
    pub focused: Option<usize>,
    /// Seconds left. Zero once expired.
    pub remaining: u32,
    /// Successful countdown restarts.
    pub restarts: u32,
    /// Operation in flight.
    pub busy: Option<Request>,
    /// Accepted code.
    pub verified: Option<String>,
}

impl ObservableState {
    /// Observable state of the real control.
    pub fn from_entry(entry: &CodeEntry) -> Self {
        Self {
            segments: entry.segments().to_vec(),
            focused: entry.focused(),
            remaining: entry.expiry().remaining(),
            restarts: entry.timer().restarts(),
            busy: entry.busy(),
            verified: entry.verified_code().map(str::to_owned),
        }
    }
}

/// Apply an operation to the real control.
pub fn apply_to_entry(entry: &mut CodeEntry, op: &Operation) -> OperationResult {
    let length = entry.segments().len();
    let slot = |slot: u8| Operation::slot_index(slot, length);

    let result = match *op {
        Operation::Type { slot: s, digit } => {
            let digit = char::from(b'0' + digit % 10);
            entry.input(slot(s), digit.encode_utf8(&mut [0; 4])).map(drop)
        },
        Operation::TypeJunk { slot: s, kind } => {
            entry.input(slot(s), Operation::junk(kind)).map(drop)
        },
        Operation::Clear { slot: s } => entry.input(slot(s), "").map(drop),
        Operation::Backspace { slot: s } => entry.backspace(slot(s)).map(drop),
        Operation::Focus { slot: s } => entry.focus(slot(s)),
        Operation::Blur => {
            entry.blur();
            Ok(())
        },
        Operation::Tick => {
            entry.tick();
            Ok(())
        },
        Operation::Verify => entry.request_verify().map(drop),
        Operation::Resend => entry.request_resend().map(drop),
        Operation::SettleVerify { accept } => {
            entry.settle_verify(settlement(accept)).map(drop)
        },
        Operation::SettleResend { accept } => {
            entry.settle_resend(settlement(accept)).map(drop)
        },
    };

    match result {
        Ok(()) => OperationResult::Ok,
        Err(err) => OperationResult::Error(classify(&err)),
    }
}

fn settlement(accept: bool) -> Result<(), String> {
    if accept { Ok(()) } else { Err("rejected by model".into()) }
}

fn classify(err: &EntryError) -> OperationError {
    match err {
        EntryError::InvalidInput { .. } => OperationError::InvalidInput,
        EntryError::IndexOutOfRange { .. } => OperationError::OutOfRange,
        EntryError::IncompleteCode { .. } => OperationError::Incomplete,
        EntryError::NotExpired { .. } => OperationError::NotExpired,
        EntryError::Busy { .. } => OperationError::Busy,
        EntryError::NotPending { .. } => OperationError::NotPending,
        EntryError::AsyncFailure { .. } => OperationError::Rejected,
    }
}
