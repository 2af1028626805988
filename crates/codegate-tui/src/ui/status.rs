//! Status line
//!
//! Displays the latest progress, success or error message.

use codegate_app::StatusKind;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::App;

/// Render the status line. Empty when there is no message.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(status) = app.status() else {
        return;
    };

    let color = match status.kind {
        StatusKind::Info => Color::Yellow,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    };

    let paragraph = Paragraph::new(status.text.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
