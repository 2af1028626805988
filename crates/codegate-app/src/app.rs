//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the verification screen completely decoupled from
//! I/O, timers and the collaborators.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Routes keys, pastes and taps to the focused segment of the
//!   [`CodeEntry`].
//! - Translates submission errors into status line messages and swallows
//!   edit rejections.
//! - Records how the screen was left ([`Outcome`]).

use codegate_core::{
    CodeEntry, Edit, EntryAction, EntryConfig, EntryError, ExpiryState, Operation, Tick,
};

use crate::{AppAction, AppEvent, KeyInput, Outcome, Status};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Segments, focus, countdown and in-flight request.
    entry: CodeEntry,
    /// Phone number (or other address) the code was sent to.
    target: String,
    /// Transient status message. `None` if no message.
    status: Option<Status>,
    /// How the screen was left. `None` while still open.
    outcome: Option<Outcome>,
}

impl App {
    /// Create a new App for a code sent to `target`.
    pub fn new(config: EntryConfig, target: impl Into<String>) -> Self {
        Self {
            entry: CodeEntry::new(config),
            target: target.into(),
            status: None,
            outcome: None,
        }
    }

    /// Actions to run when the screen is first shown.
    pub fn mount(&mut self) -> Vec<AppAction> {
        let actions = self.entry.mount();
        self.lift(actions)
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Paste(text) => {
                let result = self.entry.input_focused(&text);
                self.after_edit(result)
            },
            AppEvent::FocusSegment(index) => match self.entry.focus(index) {
                Ok(()) => vec![AppAction::Render],
                Err(err) => self.reject(err),
            },
            AppEvent::Tick => match self.entry.tick() {
                (Tick::Ignored, _) => vec![],
                (Tick::Expired, actions) => {
                    tracing::debug!("code expired");
                    self.lift(actions)
                },
                (Tick::Counting { .. }, actions) => self.lift(actions),
            },
            AppEvent::Resize(..) => vec![AppAction::Render],
            AppEvent::Cancel => self.quit(),
            AppEvent::VerifySucceeded => self.settle_verify(Ok(())),
            AppEvent::VerifyFailed { cause } => self.settle_verify(Err(cause)),
            AppEvent::ResendSucceeded => self.settle_resend(Ok(())),
            AppEvent::ResendFailed { cause } => self.settle_resend(Err(cause)),
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char('r' | 'R') => self.resend(),
            KeyInput::Char(c) => {
                let mut buf = [0u8; 4];
                let result = self.entry.input_focused(c.encode_utf8(&mut buf));
                self.after_edit(result)
            },
            KeyInput::Backspace => {
                let result = self.entry.backspace_focused();
                self.after_edit(result)
            },
            KeyInput::Delete => {
                let result = self.entry.input_focused("");
                self.after_edit(result)
            },
            KeyInput::Enter => self.verify(),
            KeyInput::Esc => self.change_number(),
            KeyInput::Left | KeyInput::Right | KeyInput::Home | KeyInput::End => {
                self.navigate(key)
            },
        }
    }

    fn navigate(&mut self, key: KeyInput) -> Vec<AppAction> {
        let last = self.entry.segments().len().saturating_sub(1);
        let current = self.entry.focused();

        let target = match key {
            KeyInput::Left => current.map_or(0, |i| i.saturating_sub(1)),
            KeyInput::Right => current.map_or(0, |i| (i + 1).min(last)),
            KeyInput::End => last,
            _ => 0,
        };

        match self.entry.focus(target) {
            Ok(()) => vec![AppAction::Render],
            Err(err) => self.reject(err),
        }
    }

    fn after_edit(&mut self, result: Result<Edit, EntryError>) -> Vec<AppAction> {
        match result {
            Ok(Edit::Unchanged) => vec![],
            Ok(_) => vec![AppAction::Render],
            Err(err) => self.reject(err),
        }
    }

    /// Submit the entered code.
    pub fn verify(&mut self) -> Vec<AppAction> {
        match self.entry.request_verify() {
            Ok(actions) => {
                self.status = Some(Status::info("Verifying..."));
                self.lift(actions)
            },
            Err(err) => self.reject(err),
        }
    }

    /// Request a new code. Only accepted once the countdown expired.
    pub fn resend(&mut self) -> Vec<AppAction> {
        match self.entry.request_resend() {
            Ok(actions) => {
                self.status = Some(Status::info("Resending..."));
                self.lift(actions)
            },
            Err(err) => self.reject(err),
        }
    }

    /// Leave the screen to enter a different number.
    pub fn change_number(&mut self) -> Vec<AppAction> {
        self.outcome = Some(Outcome::ChangeNumber);
        vec![AppAction::StopTicker, AppAction::Quit]
    }

    /// Leave the screen without a result.
    pub fn quit(&mut self) -> Vec<AppAction> {
        self.outcome = Some(Outcome::Cancelled);
        vec![AppAction::StopTicker, AppAction::Quit]
    }

    fn settle_verify(&mut self, outcome: Result<(), String>) -> Vec<AppAction> {
        match self.entry.settle_verify(outcome) {
            Ok(actions) => {
                self.status = Some(Status::success("Code verified"));
                self.lift(actions)
            },
            Err(err) => self.reject(err),
        }
    }

    fn settle_resend(&mut self, outcome: Result<(), String>) -> Vec<AppAction> {
        match self.entry.settle_resend(outcome) {
            Ok(actions) => {
                self.status =
                    Some(Status::success(format!("Code has been resent to {}", self.target)));
                self.lift(actions)
            },
            Err(err) => self.reject(err),
        }
    }

    /// Convert entry actions, always ending with a render and, once a
    /// verified code was reported, a quit.
    fn lift(&mut self, actions: Vec<EntryAction>) -> Vec<AppAction> {
        let mut lifted = Vec::with_capacity(actions.len() + 2);
        let mut finished = false;

        for action in actions {
            match action {
                EntryAction::StartTicker { interval } => {
                    lifted.push(AppAction::StartTicker { interval });
                },
                EntryAction::StopTicker => lifted.push(AppAction::StopTicker),
                EntryAction::CallVerify { code } => lifted.push(AppAction::Verify { code }),
                EntryAction::CallResend => lifted.push(AppAction::Resend),
                EntryAction::Verified { code } => {
                    tracing::info!(target = %self.target, "code verified");
                    self.outcome = Some(Outcome::Verified { code });
                    finished = true;
                },
            }
        }

        lifted.push(AppAction::Render);
        if finished {
            lifted.push(AppAction::Quit);
        }
        lifted
    }

    fn reject(&mut self, err: EntryError) -> Vec<AppAction> {
        if !err.is_reportable() {
            tracing::debug!(%err, "ignored");
            return vec![];
        }

        tracing::info!(%err, "request rejected");
        self.status = Some(Status::error(self.describe(&err)));
        vec![AppAction::Render]
    }

    fn describe(&self, err: &EntryError) -> String {
        match err {
            EntryError::IncompleteCode { required, .. } => {
                format!("Please enter the complete {required}-digit code")
            },
            EntryError::NotExpired { remaining } => {
                let wait = ExpiryState::Counting { remaining: *remaining };
                format!("You can request a new code in {wait}")
            },
            EntryError::Busy { operation: Operation::Verify } => "Verifying, please wait".into(),
            EntryError::Busy { operation: Operation::Resend } => "Resending, please wait".into(),
            EntryError::AsyncFailure { operation: Operation::Verify, cause } => {
                format!("Invalid code. Please try again. ({cause})")
            },
            EntryError::AsyncFailure { operation: Operation::Resend, cause } => {
                format!("Failed to resend code. Please try again. ({cause})")
            },
            other => other.to_string(),
        }
    }

    /// The code entry control.
    pub fn entry(&self) -> &CodeEntry {
        &self.entry
    }

    /// Address the code was sent to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of segments.
    pub fn code_length(&self) -> usize {
        self.entry.segments().len()
    }

    /// All segments in order.
    pub fn segments(&self) -> &[Option<char>] {
        self.entry.segments()
    }

    /// Focused segment. `None` when blurred.
    pub fn focused(&self) -> Option<usize> {
        self.entry.focused()
    }

    /// Countdown state.
    pub fn expiry(&self) -> ExpiryState {
        self.entry.expiry()
    }

    /// Operation in flight. `None` when idle.
    pub fn busy(&self) -> Option<Operation> {
        self.entry.busy()
    }

    /// Transient status message. `None` if no message.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// How the screen was left. `None` while still open.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::StatusKind;

    fn app(length: usize, expiry: u32) -> App {
        App::new(EntryConfig::new(length, expiry).unwrap(), "+1 555 0100")
    }

    fn type_digits(app: &mut App, digits: &str) {
        for c in digits.chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
    }

    fn expire(app: &mut App) {
        while !app.expiry().is_expired() {
            let _ = app.handle(AppEvent::Tick);
        }
    }

    #[test]
    fn mount_starts_ticker() {
        let mut app = app(6, 60);
        let actions = app.mount();

        assert!(matches!(actions.as_slice(), [
            AppAction::StartTicker { interval },
            AppAction::Render
        ] if *interval == Duration::from_secs(1)));
    }

    #[test]
    fn typing_advances_focus() {
        let mut app = app(4, 60);
        type_digits(&mut app, "12");

        assert_eq!(app.segments(), &[Some('1'), Some('2'), None, None]);
        assert_eq!(app.focused(), Some(2));
    }

    #[test]
    fn backspace_over_empty_boxes_repaints() {
        let mut app = app(4, 60);
        let _ = app.handle(AppEvent::FocusSegment(2));

        let actions = app.handle(AppEvent::Key(KeyInput::Backspace));
        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.focused(), Some(1));

        let actions = app.handle(AppEvent::Key(KeyInput::Backspace));
        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.focused(), Some(0));

        assert!(app.handle(AppEvent::Key(KeyInput::Backspace)).is_empty());
        assert_eq!(app.focused(), Some(0));
    }

    #[test]
    fn resize_repaints() {
        let mut app = app(4, 60);
        assert_eq!(app.handle(AppEvent::Resize(100, 30)), vec![AppAction::Render]);
    }

    #[test]
    fn letters_are_swallowed() {
        let mut app = app(4, 60);
        let actions = app.handle(AppEvent::Key(KeyInput::Char('x')));

        assert!(actions.is_empty());
        assert!(app.status().is_none());
        assert_eq!(app.focused(), Some(0));
    }

    #[test]
    fn multi_digit_paste_is_swallowed() {
        let mut app = app(4, 60);
        let actions = app.handle(AppEvent::Paste("1234".into()));

        assert!(actions.is_empty());
        assert!(app.segments().iter().all(Option::is_none));

        let actions = app.handle(AppEvent::Paste("7".into()));
        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.segments()[0], Some('7'));
    }

    #[test]
    fn api_verify_incomplete() {
        let mut app = app(6, 60);
        type_digits(&mut app, "123");
        let actions = app.handle(AppEvent::Key(KeyInput::Enter));

        assert_eq!(actions, vec![AppAction::Render]);
        let status = app.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Please enter the complete 6-digit code");
    }

    #[test]
    fn api_verify_complete() {
        let mut app = app(4, 60);
        type_digits(&mut app, "4321");
        let actions = app.verify();

        assert!(matches!(actions.as_slice(), [
            AppAction::Verify { code },
            AppAction::Render
        ] if code == "4321"));
        assert_eq!(app.busy(), Some(Operation::Verify));
    }

    #[test]
    fn verify_success_quits_with_outcome() {
        let mut app = app(4, 60);
        type_digits(&mut app, "4321");
        let _ = app.verify();

        let actions = app.handle(AppEvent::VerifySucceeded);
        assert_eq!(actions, vec![AppAction::StopTicker, AppAction::Render, AppAction::Quit]);
        assert_eq!(app.outcome(), Some(&Outcome::Verified { code: "4321".into() }));
    }

    #[test]
    fn verify_failure_resets_and_reports() {
        let mut app = app(4, 60);
        type_digits(&mut app, "4321");
        let _ = app.verify();

        let actions = app.handle(AppEvent::VerifyFailed { cause: "expired code".into() });
        assert_eq!(actions, vec![AppAction::Render]);
        assert!(app.segments().iter().all(Option::is_none));
        assert_eq!(app.focused(), Some(0));
        assert!(app.status().is_some_and(|s| s.text.contains("expired code")));
        assert!(app.outcome().is_none());
    }

    #[test]
    fn resend_before_expiry_is_rejected() {
        let mut app = app(6, 60);
        for _ in 0..18 {
            let _ = app.handle(AppEvent::Tick);
        }
        let actions = app.handle(AppEvent::Key(KeyInput::Char('r')));

        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.busy(), None);
        assert_eq!(app.status().map(|s| s.text.as_str()), Some("You can request a new code in 0:42"));
    }

    #[test]
    fn expiry_releases_ticker() {
        let mut app = app(6, 2);
        assert_eq!(app.handle(AppEvent::Tick), vec![AppAction::Render]);
        assert_eq!(app.handle(AppEvent::Tick), vec![AppAction::StopTicker, AppAction::Render]);
        assert!(app.handle(AppEvent::Tick).is_empty());
    }

    #[test]
    fn resend_success_restarts_ticker() {
        let mut app = app(6, 2);
        expire(&mut app);

        assert_eq!(app.resend(), vec![AppAction::Resend, AppAction::Render]);
        let actions = app.handle(AppEvent::ResendSucceeded);

        assert_eq!(actions, vec![
            AppAction::StartTicker { interval: Duration::from_secs(1) },
            AppAction::Render
        ]);
        assert_eq!(app.expiry(), ExpiryState::Counting { remaining: 2 });
        assert_eq!(
            app.status().map(|s| s.text.as_str()),
            Some("Code has been resent to +1 555 0100")
        );
    }

    #[test]
    fn resend_failure_keeps_expired() {
        let mut app = app(6, 1);
        expire(&mut app);
        let _ = app.resend();

        let actions = app.handle(AppEvent::ResendFailed { cause: "no signal".into() });
        assert_eq!(actions, vec![AppAction::Render]);
        assert!(app.expiry().is_expired());
        assert_eq!(app.busy(), None);
        assert!(app.status().is_some_and(|s| s.kind == StatusKind::Error));
    }

    #[test]
    fn busy_blocks_second_submission() {
        let mut app = app(2, 1);
        type_digits(&mut app, "12");
        expire(&mut app);
        let _ = app.verify();

        assert_eq!(app.resend(), vec![AppAction::Render]);
        assert_eq!(app.status().map(|s| s.text.as_str()), Some("Verifying, please wait"));
        assert_eq!(app.busy(), Some(Operation::Verify));
    }

    #[test]
    fn stale_settlement_is_ignored() {
        let mut app = app(6, 60);
        assert!(app.handle(AppEvent::VerifySucceeded).is_empty());
        assert!(app.handle(AppEvent::ResendFailed { cause: "late".into() }).is_empty());
        assert!(app.outcome().is_none());
    }

    #[test]
    fn arrows_move_focus_within_bounds() {
        let mut app = app(3, 60);
        let _ = app.handle(AppEvent::Key(KeyInput::Left));
        assert_eq!(app.focused(), Some(0));

        let _ = app.handle(AppEvent::Key(KeyInput::End));
        assert_eq!(app.focused(), Some(2));

        let _ = app.handle(AppEvent::Key(KeyInput::Right));
        assert_eq!(app.focused(), Some(2));

        let _ = app.handle(AppEvent::Key(KeyInput::Home));
        assert_eq!(app.focused(), Some(0));
    }

    #[test]
    fn tap_out_of_range_is_ignored() {
        let mut app = app(3, 60);
        assert!(app.handle(AppEvent::FocusSegment(7)).is_empty());
        assert_eq!(app.handle(AppEvent::FocusSegment(2)), vec![AppAction::Render]);
        assert_eq!(app.focused(), Some(2));
    }

    #[test]
    fn cancel_quits_without_result() {
        let mut app = app(6, 60);
        let actions = app.handle(AppEvent::Cancel);

        assert_eq!(actions, vec![AppAction::StopTicker, AppAction::Quit]);
        assert_eq!(app.outcome(), Some(&Outcome::Cancelled));
    }

    #[test]
    fn escape_changes_number() {
        let mut app = app(6, 60);
        let actions = app.handle(AppEvent::Key(KeyInput::Esc));

        assert_eq!(actions, vec![AppAction::StopTicker, AppAction::Quit]);
        assert_eq!(app.outcome(), Some(&Outcome::ChangeNumber));
    }
}
