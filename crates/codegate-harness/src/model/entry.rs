//! Model code entry state machine.
//!
//! Simplified control that tracks digits, cursor, countdown and the
//! outstanding request with plain integers. No actions, no timers: just the
//! logical state transitions.

use codegate_core::Operation as Request;

use super::{
    ObservableState,
    operation::{Operation, OperationError, OperationResult},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ModelRequest {
    Verify(String),
    Resend,
}

/// Model code entry.
///
/// Tracks the same observable state as [`codegate_core::CodeEntry`] in the
/// most direct representation available.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    digits: Vec<Option<u8>>,
    cursor: Option<usize>,
    /// Seconds left. Zero means expired.
    remaining: u32,
    initial: u32,
    restarts: u32,
    request: Option<ModelRequest>,
    verified: Option<String>,
}

impl ModelEntry {
    /// Create a model with `length` empty digits and `expiry` seconds.
    pub fn new(length: usize, expiry: u32) -> Self {
        Self {
            digits: vec![None; length],
            cursor: (length > 0).then_some(0),
            remaining: expiry,
            initial: expiry,
            restarts: 0,
            request: None,
            verified: None,
        }
    }

    /// Number of digits.
    pub fn length(&self) -> usize {
        self.digits.len()
    }

    /// Apply an operation to the model.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match self.step(op) {
            Ok(()) => OperationResult::Ok,
            Err(err) => OperationResult::Error(err),
        }
    }

    fn step(&mut self, op: &Operation) -> Result<(), OperationError> {
        let length = self.length();
        match *op {
            Operation::Type { slot, digit } => {
                let i = self.slot(slot)?;
                if self.digits[i].replace(digit % 10).is_none() {
                    self.cursor = Some((i + 1).min(length - 1));
                }
            },
            Operation::TypeJunk { slot, .. } => {
                self.slot(slot)?;
                return Err(OperationError::InvalidInput);
            },
            Operation::Clear { slot } => {
                let i = self.slot(slot)?;
                self.digits[i] = None;
            },
            Operation::Backspace { slot } => {
                let i = self.slot(slot)?;
                if self.digits[i].take().is_none() && i > 0 {
                    self.digits[i - 1] = None;
                    self.cursor = Some(i - 1);
                }
            },
            Operation::Focus { slot } => self.cursor = Some(self.slot(slot)?),
            Operation::Blur => self.cursor = None,
            Operation::Tick => self.remaining = self.remaining.saturating_sub(1),
            Operation::Verify => {
                self.idle()?;
                let code: Option<String> =
                    self.digits.iter().map(|d| d.map(|d| char::from(b'0' + d))).collect();
                let code = code.ok_or(OperationError::Incomplete)?;
                self.request = Some(ModelRequest::Verify(code));
            },
            Operation::Resend => {
                self.idle()?;
                if self.remaining > 0 {
                    return Err(OperationError::NotExpired);
                }
                self.request = Some(ModelRequest::Resend);
            },
            Operation::SettleVerify { accept } => {
                let Some(ModelRequest::Verify(code)) = self.request.clone() else {
                    return Err(OperationError::NotPending);
                };
                self.request = None;
                if !accept {
                    self.digits.fill(None);
                    self.cursor = (length > 0).then_some(0);
                    return Err(OperationError::Rejected);
                }
                self.verified = Some(code);
            },
            Operation::SettleResend { accept } => {
                if self.request != Some(ModelRequest::Resend) {
                    return Err(OperationError::NotPending);
                }
                self.request = None;
                if !accept {
                    return Err(OperationError::Rejected);
                }
                self.remaining = self.initial;
                self.restarts += 1;
            },
        }
        Ok(())
    }

    fn slot(&self, slot: u8) -> Result<usize, OperationError> {
        let i = Operation::slot_index(slot, self.length());
        if i < self.length() { Ok(i) } else { Err(OperationError::OutOfRange) }
    }

    fn idle(&self) -> Result<(), OperationError> {
        if self.request.is_some() { Err(OperationError::Busy) } else { Ok(()) }
    }

    /// Observable state for comparison with the real control.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            segments: self.digits.iter().map(|d| d.map(|d| char::from(b'0' + d))).collect(),
            focused: self.cursor,
            remaining: self.remaining,
            restarts: self.restarts,
            busy: self.request.as_ref().map(|r| match r {
                ModelRequest::Verify(_) => Request::Verify,
                ModelRequest::Resend => Request::Resend,
            }),
            verified: self.verified.clone(),
        }
    }
}
