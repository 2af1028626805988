//! Composed code entry control.
//!
//! [`CodeEntry`] ties the focus controller and expiry timer together with a
//! busy flag and the submission contracts. It uses the action pattern:
//! methods mutate local state and return [`EntryAction`]s for the caller to
//! execute (acquire or release the tick source, call a collaborator). The
//! collaborator's outcome is fed back through [`CodeEntry::settle_verify`] or
//! [`CodeEntry::settle_resend`].
//!
//! # Submission
//!
//! ```text
//!             request_verify (complete)         settle_verify(Ok)
//!   Idle ────────────────────────────> Verify ───────────────────> Verified
//!    ^                                   │
//!    └───── settle_verify(Err): reset ───┘
//!
//!             request_resend (expired)          settle_resend(Ok)
//!   Idle ────────────────────────────> Resend ───────────────────> Idle, counting
//!    ^                                   │
//!    └──── settle_resend(Err): expired ──┘
//! ```
//!
//! Only one operation may be in flight; the other is rejected with
//! [`EntryError::Busy`] until it settles.

use std::{fmt, time::Duration};

use crate::{
    config::EntryConfig,
    error::EntryError,
    expiry::{ExpiryState, ExpiryTimer, Tick},
    focus::FocusController,
    segments::{Edit, SegmentStore},
};

/// Asynchronous operation a control can have outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Checking the entered code.
    Verify,
    /// Requesting a new code.
    Resend,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verify => f.write_str("verify"),
            Self::Resend => f.write_str("resend"),
        }
    }
}

/// Instructions returned by [`CodeEntry`] for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// Acquire the periodic tick source.
    StartTicker {
        /// Tick period.
        interval: Duration,
    },

    /// Release the periodic tick source.
    StopTicker,

    /// Call the verify collaborator.
    CallVerify {
        /// Complete code, exactly N digits.
        code: String,
    },

    /// Call the resend collaborator.
    CallResend,

    /// Verification succeeded; the control is done.
    Verified {
        /// The code that was accepted.
        code: String,
    },
}

/// Request currently awaiting a collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Verify { code: String },
    Resend,
}

impl Pending {
    fn operation(&self) -> Operation {
        match self {
            Self::Verify { .. } => Operation::Verify,
            Self::Resend => Operation::Resend,
        }
    }
}

/// Segmented code entry with expiry and submission.
///
/// Pure state machine: no I/O, no clock. Fully testable in simulation.
#[derive(Debug, Clone)]
pub struct CodeEntry {
    config: EntryConfig,
    focus: FocusController,
    expiry: ExpiryTimer,
    /// In-flight collaborator request. `None` when idle.
    pending: Option<Pending>,
    /// Accepted code once verification succeeded.
    verified: Option<String>,
}

impl CodeEntry {
    /// Create a fresh control. Call [`CodeEntry::mount`] to start the
    /// countdown.
    pub fn new(config: EntryConfig) -> Self {
        Self {
            config,
            focus: FocusController::new(config.length()),
            expiry: ExpiryTimer::new(config.expiry_secs()),
            pending: None,
            verified: None,
        }
    }

    /// Actions needed when the control is first shown.
    pub fn mount(&self) -> Vec<EntryAction> {
        match self.expiry.state() {
            ExpiryState::Counting { .. } => {
                vec![EntryAction::StartTicker { interval: self.config.tick_interval() }]
            },
            ExpiryState::Expired => vec![],
        }
    }

    /// Edit segment `index`. See [`FocusController::input`].
    pub fn input(&mut self, index: usize, value: &str) -> Result<Edit, EntryError> {
        self.focus.input(index, value)
    }

    /// Edit the focused segment. No effect when nothing is focused.
    pub fn input_focused(&mut self, value: &str) -> Result<Edit, EntryError> {
        match self.focus.focused() {
            Some(index) => self.focus.input(index, value),
            None => Ok(Edit::Unchanged),
        }
    }

    /// Backspace on segment `index`. See [`FocusController::backspace`].
    pub fn backspace(&mut self, index: usize) -> Result<Edit, EntryError> {
        self.focus.backspace(index)
    }

    /// Backspace on the focused segment. No effect when nothing is focused.
    pub fn backspace_focused(&mut self) -> Result<Edit, EntryError> {
        match self.focus.focused() {
            Some(index) => self.focus.backspace(index),
            None => Ok(Edit::Unchanged),
        }
    }

    /// Move focus to `index`.
    pub fn focus(&mut self, index: usize) -> Result<(), EntryError> {
        self.focus.focus(index)
    }

    /// Drop focus.
    pub fn blur(&mut self) {
        self.focus.blur();
    }

    /// Advance the countdown by one period.
    pub fn tick(&mut self) -> (Tick, Vec<EntryAction>) {
        let tick = self.expiry.tick();
        let actions = match tick {
            Tick::Expired => vec![EntryAction::StopTicker],
            Tick::Counting { .. } | Tick::Ignored => vec![],
        };
        (tick, actions)
    }

    /// Submit the current code for verification.
    ///
    /// # Errors
    ///
    /// - `EntryError::Busy` if a request is already in flight
    /// - `EntryError::IncompleteCode` if any segment is empty; no collaborator
    ///   is contacted
    pub fn request_verify(&mut self) -> Result<Vec<EntryAction>, EntryError> {
        self.ensure_idle()?;
        let code = self.focus.store().code()?;

        self.pending = Some(Pending::Verify { code: code.clone() });
        Ok(vec![EntryAction::CallVerify { code }])
    }

    /// Apply the verify collaborator's outcome.
    ///
    /// On failure every segment is cleared and focus returns to the first.
    ///
    /// # Errors
    ///
    /// - `EntryError::NotPending` if no verify is in flight
    /// - `EntryError::AsyncFailure` carrying `cause` when the collaborator
    ///   rejected the code
    pub fn settle_verify(
        &mut self,
        outcome: Result<(), String>,
    ) -> Result<Vec<EntryAction>, EntryError> {
        let Some(Pending::Verify { code }) =
            self.pending.take_if(|p| matches!(p, Pending::Verify { .. }))
        else {
            return Err(EntryError::NotPending { operation: Operation::Verify });
        };

        match outcome {
            Ok(()) => {
                self.verified = Some(code.clone());
                Ok(vec![EntryAction::StopTicker, EntryAction::Verified { code }])
            },
            Err(cause) => {
                self.focus.reset();
                Err(EntryError::AsyncFailure { operation: Operation::Verify, cause })
            },
        }
    }

    /// Request a new code.
    ///
    /// # Errors
    ///
    /// - `EntryError::Busy` if a request is already in flight
    /// - `EntryError::NotExpired` while the countdown is running; no
    ///   collaborator is contacted
    pub fn request_resend(&mut self) -> Result<Vec<EntryAction>, EntryError> {
        self.ensure_idle()?;
        if let ExpiryState::Counting { remaining } = self.expiry.state() {
            return Err(EntryError::NotExpired { remaining });
        }

        self.pending = Some(Pending::Resend);
        Ok(vec![EntryAction::CallResend])
    }

    /// Apply the resend collaborator's outcome.
    ///
    /// Success restarts the countdown; failure leaves it expired so the user
    /// can retry.
    ///
    /// # Errors
    ///
    /// - `EntryError::NotPending` if no resend is in flight
    /// - `EntryError::AsyncFailure` carrying `cause` when delivery failed
    pub fn settle_resend(
        &mut self,
        outcome: Result<(), String>,
    ) -> Result<Vec<EntryAction>, EntryError> {
        if self.pending.take_if(|p| *p == Pending::Resend).is_none() {
            return Err(EntryError::NotPending { operation: Operation::Resend });
        }

        match outcome {
            Ok(()) => {
                self.expiry.restart();
                Ok(vec![EntryAction::StartTicker { interval: self.config.tick_interval() }])
            },
            Err(cause) => Err(EntryError::AsyncFailure { operation: Operation::Resend, cause }),
        }
    }

    fn ensure_idle(&self) -> Result<(), EntryError> {
        match &self.pending {
            Some(pending) => Err(EntryError::Busy { operation: pending.operation() }),
            None => Ok(()),
        }
    }

    /// Configuration the control was built with.
    pub fn config(&self) -> &EntryConfig {
        &self.config
    }

    /// Segment storage.
    pub fn store(&self) -> &SegmentStore {
        self.focus.store()
    }

    /// All segments in order.
    pub fn segments(&self) -> &[Option<char>] {
        self.focus.store().segments()
    }

    /// Focused segment. `None` when blurred.
    pub fn focused(&self) -> Option<usize> {
        self.focus.focused()
    }

    /// Countdown state.
    pub fn expiry(&self) -> ExpiryState {
        self.expiry.state()
    }

    /// Countdown timer.
    pub fn timer(&self) -> &ExpiryTimer {
        &self.expiry
    }

    /// Operation in flight. `None` when idle.
    pub fn busy(&self) -> Option<Operation> {
        self.pending.as_ref().map(Pending::operation)
    }

    /// Returns true if a verify request would be accepted.
    pub fn can_verify(&self) -> bool {
        self.pending.is_none() && self.focus.store().is_complete()
    }

    /// Returns true if a resend request would be accepted.
    pub fn can_resend(&self) -> bool {
        self.pending.is_none() && self.expiry.state().is_expired()
    }

    /// Accepted code. `None` until verification succeeds.
    pub fn verified_code(&self) -> Option<&str> {
        self.verified.as_deref()
    }
}
