//! Error types for the code entry control.
//!
//! Every failure here is recoverable: the control never enters a state the
//! user cannot leave by editing or retrying. Errors are split by who sees
//! them. Input rejections are swallowed by the caller, submission errors are
//! reported on the status line.

use thiserror::Error;

use crate::entry::Operation;

/// Errors produced by [`crate::CodeEntry`] and its components.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// Edit value was neither a single decimal digit nor empty.
    #[error("invalid input {value:?} for segment {index}")]
    InvalidInput {
        /// Segment the edit was addressed to.
        index: usize,
        /// Rejected value.
        value: String,
    },

    /// Segment index outside `0..len`.
    #[error("segment {index} out of range for {len} segments")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of segments in the control.
        len: usize,
    },

    /// Verify attempted before every segment was filled.
    #[error("incomplete code: {filled} of {required} digits entered")]
    IncompleteCode {
        /// Segments holding a digit.
        filled: usize,
        /// Segments required for a complete code.
        required: usize,
    },

    /// Resend attempted while the current code is still valid.
    #[error("code still valid for {remaining}s")]
    NotExpired {
        /// Seconds left on the countdown.
        remaining: u32,
    },

    /// Another asynchronous action is outstanding.
    #[error("{operation} already in progress")]
    Busy {
        /// Operation currently in flight.
        operation: Operation,
    },

    /// Outcome delivered for an operation that is not in flight.
    #[error("no {operation} in progress")]
    NotPending {
        /// Operation the stale outcome belongs to.
        operation: Operation,
    },

    /// Collaborator rejected the request.
    #[error("{operation} failed: {cause}")]
    AsyncFailure {
        /// Operation that failed.
        operation: Operation,
        /// Underlying cause reported by the collaborator.
        cause: String,
    },
}

impl EntryError {
    /// Returns true if the user should be told about this error.
    ///
    /// Edit rejections and stale outcomes are dropped silently; a keystroke
    /// that does nothing is the expected feedback for a non-digit.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            Self::IncompleteCode { .. }
                | Self::NotExpired { .. }
                | Self::Busy { .. }
                | Self::AsyncFailure { .. }
        )
    }

    /// Returns true if repeating the same request later may succeed.
    ///
    /// Edit errors need different input rather than a retry, so they are
    /// never retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotExpired { .. } | Self::Busy { .. } | Self::AsyncFailure { .. })
    }
}

/// Errors from building an [`crate::EntryConfig`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A code needs at least one segment.
    #[error("code length must be at least 1")]
    ZeroLength,

    /// The countdown must start above zero.
    #[error("expiry must be at least one second")]
    ZeroExpiry,
}
