//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use std::time::Duration;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Tear down the screen. The result is in [`crate::App::outcome`].
    Quit,

    /// Acquire the countdown tick source.
    StartTicker {
        /// Tick period.
        interval: Duration,
    },

    /// Release the countdown tick source.
    StopTicker,

    /// Call the verify collaborator.
    Verify {
        /// Complete code.
        code: String,
    },

    /// Call the resend collaborator.
    Resend,
}
