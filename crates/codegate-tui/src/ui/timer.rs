//! Countdown line
//!
//! Shows the remaining validity while counting and the resend affordance
//! once the code expired.

use codegate_core::{ExpiryState, Operation};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the countdown or resend line.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let line = match (app.expiry(), app.busy()) {
        (counting @ ExpiryState::Counting { .. }, _) => Line::from(vec![
            Span::styled("Code expires in ", Style::default().fg(Color::Gray)),
            Span::styled(
                counting.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        (ExpiryState::Expired, Some(Operation::Resend)) => {
            Line::from(Span::styled("Resending...", Style::default().fg(Color::Yellow)))
        },
        (ExpiryState::Expired, busy) => {
            let link = if busy.is_some() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
            };
            Line::from(vec![
                Span::styled("Didn't receive the code? ", Style::default().fg(Color::Gray)),
                Span::styled("Resend Code", link),
                Span::styled(" (r)", Style::default().fg(Color::DarkGray)),
            ])
        },
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
