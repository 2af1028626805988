//! Observable application state types.
//!
//! This module defines the data structures that the frontend reads besides
//! the code entry itself: the transient [`Status`] line and the final
//! [`Outcome`] handed back to whoever opened the screen.

/// How the screen was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The collaborator accepted the code.
    Verified {
        /// Accepted code.
        code: String,
    },
    /// User asked to go back and enter a different number.
    ChangeNumber,
    /// Screen torn down without a result.
    Cancelled,
}

/// Tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Progress or neutral information.
    Info,
    /// Completed action.
    Success,
    /// Rejected or failed action.
    Error,
}

/// Transient message shown under the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Message tone.
    pub kind: StatusKind,
    /// Message text.
    pub text: String,
}

impl Status {
    /// Informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, text: text.into() }
    }

    /// Success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, text: text.into() }
    }

    /// Error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }
}
