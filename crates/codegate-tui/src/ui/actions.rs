//! Verify button, change-number link and key hints.

use codegate_core::Operation;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the verify button. Dimmed while a submission would be rejected.
pub fn render_verify(frame: &mut Frame, app: &App, area: Rect) {
    let label = if app.busy() == Some(Operation::Verify) { "Verifying..." } else { "Verify Code" };

    let style = if app.entry().can_verify() {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let button = Line::from(Span::styled(format!("[ {label} ]"), style));
    frame.render_widget(Paragraph::new(button).alignment(Alignment::Center), area);
}

/// Render the change-number link.
pub fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled("Wrong number? ", Style::default().fg(Color::Gray)),
        Span::styled("Change Number", Style::default().fg(Color::Cyan)),
        Span::styled(" (Esc)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), area);
}

/// Render the key hints.
pub fn render_hints(frame: &mut Frame, area: Rect) {
    let hints = Paragraph::new(vec![
        Line::from("Enter verify | r resend | Esc change number"),
        Line::from("Left/Right move | Backspace delete | Ctrl+C quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(hints, area);
}
