//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from three distinct sources:
//! - User interactions (keys, paste, taps, resize).
//! - The countdown tick source.
//! - Outcomes of the asynchronous [`crate::CodeService`] calls.

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Text pasted into the focused segment.
    Paste(String),

    /// Pointer selected a segment.
    FocusSegment(usize),

    /// One countdown period elapsed.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// User interrupted the screen (Ctrl+C).
    Cancel,

    /// Verify collaborator accepted the code.
    VerifySucceeded,

    /// Verify collaborator rejected the code.
    VerifyFailed {
        /// Error description.
        cause: String,
    },

    /// Resend collaborator delivered a new code.
    ResendSucceeded,

    /// Resend collaborator failed.
    ResendFailed {
        /// Error description.
        cause: String,
    },
}

impl AppEvent {
    /// Returns true if this event settles an in-flight collaborator call.
    pub fn is_settlement(&self) -> bool {
        matches!(
            self,
            Self::VerifySucceeded
                | Self::VerifyFailed { .. }
                | Self::ResendSucceeded
                | Self::ResendFailed { .. }
        )
    }
}
