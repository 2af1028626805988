//! Operations for model-based testing.
//!
//! Operations represent all possible inputs to the control. They are
//! generated randomly by proptest (or by the fuzzer through [`Arbitrary`])
//! and applied to both the model and real implementation.

use arbitrary::Arbitrary;

/// Operations that can be applied to a code entry control.
///
/// Slot numbers are reduced modulo `length + 2`, so a share of operations
/// deliberately targets segments that do not exist.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Type a digit into a segment.
    Type {
        /// Target slot.
        slot: u8,
        /// Digit, reduced modulo 10.
        digit: u8,
    },

    /// Type something that is not a single digit.
    TypeJunk {
        /// Target slot.
        slot: u8,
        /// Which kind of junk (letter, two digits, whitespace).
        kind: u8,
    },

    /// Clear a segment directly.
    Clear {
        /// Target slot.
        slot: u8,
    },

    /// Press backspace on a segment.
    Backspace {
        /// Target slot.
        slot: u8,
    },

    /// Move focus to a segment.
    Focus {
        /// Target slot.
        slot: u8,
    },

    /// Drop focus.
    Blur,

    /// Advance the countdown by one second.
    Tick,

    /// Submit the code.
    Verify,

    /// Request a new code.
    Resend,

    /// The verify collaborator answers.
    SettleVerify {
        /// Whether the code was accepted.
        accept: bool,
    },

    /// The resend collaborator answers.
    SettleResend {
        /// Whether the new code was delivered.
        accept: bool,
    },
}

impl Operation {
    /// Map a raw slot onto `0..length + 2`.
    pub fn slot_index(slot: u8, length: usize) -> usize {
        usize::from(slot) % (length + 2)
    }

    /// Input text for [`Operation::TypeJunk`].
    pub fn junk(kind: u8) -> &'static str {
        match kind % 4 {
            0 => "a",
            1 => "12",
            2 => " ",
            _ => "٣",
        }
    }
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded.
    Ok,

    /// Operation failed with expected error.
    Error(OperationError),
}

/// Expected errors that can occur during operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// Not an empty string or a single ASCII digit.
    InvalidInput,

    /// Slot past the last segment.
    OutOfRange,

    /// Verify with an empty segment.
    Incomplete,

    /// Resend while the countdown is running.
    NotExpired,

    /// Another request is in flight.
    Busy,

    /// Settlement without a matching request.
    NotPending,

    /// The collaborator answered with a failure.
    Rejected,
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, OperationResult::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

impl From<OperationError> for OperationResult {
    fn from(err: OperationError) -> Self {
        Self::Error(err)
    }
}
