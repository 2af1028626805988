//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard, mouse and paste events and ratatui for rendering.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
        MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use thiserror::Error;

use crate::{App, AppEvent, Driver, KeyInput, ui};

/// How long a poll waits for terminal input before yielding.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal event stream ended.
    #[error("terminal input closed")]
    InputClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns raw mode and the alternate screen for its whole lifetime and
/// remembers where the segment boxes were last drawn so mouse clicks can be
/// mapped back to a segment.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    /// Segment boxes from the most recent render.
    segment_areas: Vec<Rect>,
    restored: bool,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    ///
    /// If any step fails the terminal is put back before the error is
    /// returned.
    pub fn new() -> Result<Self, TerminalError> {
        let terminal = enter_or_leave(
            || {
                enable_raw_mode()?;
                let mut out = stdout();
                out.execute(EnterAlternateScreen)?;
                out.execute(EnableBracketedPaste)?;
                out.execute(EnableMouseCapture)?;
                Terminal::new(CrosstermBackend::new(stdout()))
            },
            leave_terminal,
        )?;

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            segment_areas: Vec::new(),
            restored: false,
        })
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        leave_terminal();
        let _ = self.terminal.show_cursor();
    }
}

/// Run `enter`; if it fails part way, run `leave` before returning the error.
fn enter_or_leave<T>(
    enter: impl FnOnce() -> io::Result<T>,
    leave: impl FnOnce(),
) -> io::Result<T> {
    enter().inspect_err(|_| leave())
}

/// Undo every mode [`TerminalDriver::new`] enables. Safe to call for modes
/// that were never entered.
fn leave_terminal() {
    let _ = disable_raw_mode();
    let mut out = stdout();
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(DisableBracketedPaste);
    let _ = out.execute(LeaveAlternateScreen);
}

/// Convert crossterm `KeyEvent` to an [`AppEvent`].
fn convert_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let input = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(AppEvent::Cancel);
        },
        KeyCode::Char(_)
            if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            return None;
        },
        KeyCode::Char(c) => KeyInput::Char(c),
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Delete => KeyInput::Delete,
        KeyCode::Esc => KeyInput::Esc,
        KeyCode::Left => KeyInput::Left,
        KeyCode::Right => KeyInput::Right,
        KeyCode::Home => KeyInput::Home,
        KeyCode::End => KeyInput::End,
        _ => return None,
    };
    Some(AppEvent::Key(input))
}

/// Convert a crossterm `Event` to an [`AppEvent`].
///
/// `segments` are the segment boxes from the last render; a left click
/// inside one of them focuses that segment.
pub fn convert_event(event: Event, segments: &[Rect]) -> Option<AppEvent> {
    match event {
        Event::Key(key) => convert_key(key),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            ui::segment_at(segments, mouse.column, mouse.row).map(AppEvent::FocusSegment)
        },
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => Ok(convert_event(event, &self.segment_areas)),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    None => Err(TerminalError::InputClosed),
                }
            }

            // Nothing typed
            () = tokio::time::sleep(POLL_TIMEOUT) => Ok(None),
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            self.segment_areas = ui::render(frame, app);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}
