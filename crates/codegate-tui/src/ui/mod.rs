//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into a frame.

mod actions;
mod segments;
mod status;
mod timer;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph},
};
pub use segments::{segment_at, segment_layout};

use crate::App;

const CARD_WIDTH: u16 = 60;
const CARD_HEIGHT: u16 = 16;

/// Render the entire UI.
///
/// Returns the area of every segment box so pointer input can be mapped
/// back to a segment.
pub fn render(frame: &mut Frame, app: &App) -> Vec<Rect> {
    const SEGMENT_HEIGHT: u16 = 3;

    let card = centered(frame.area(), CARD_WIDTH, CARD_HEIGHT);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // title
            Constraint::Length(1),              // sent to
            Constraint::Length(1),              // spacer
            Constraint::Length(SEGMENT_HEIGHT), // boxes
            Constraint::Length(1),              // spacer
            Constraint::Length(1),              // countdown / resend
            Constraint::Length(1),              // status
            Constraint::Length(1),              // spacer
            Constraint::Length(1),              // verify button
            Constraint::Length(1),              // change number
            Constraint::Min(0),                 // key hints
        ])
        .split(inner);

    let [
        title_area,
        sent_area,
        _,
        segments_area,
        _,
        timer_area,
        status_area,
        _,
        button_area,
        footer_area,
        hints_area,
    ] = chunks.as_ref()
    else {
        return Vec::new();
    };

    render_header(frame, app, *title_area, *sent_area);
    let boxes = segments::render(frame, app, *segments_area);
    timer::render(frame, app, *timer_area);
    status::render(frame, app, *status_area);
    actions::render_verify(frame, app, *button_area);
    actions::render_footer(frame, *footer_area);
    actions::render_hints(frame, *hints_area);
    boxes
}

fn render_header(frame: &mut Frame, app: &App, title_area: Rect, sent_area: Rect) {
    let title = Paragraph::new(Line::from("Enter Verification Code"))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, title_area);

    let sent = Paragraph::new(Line::from(format!(
        "We've sent a {}-digit code to {}",
        app.code_length(),
        app.target()
    )))
    .style(Style::default().fg(Color::Gray))
    .alignment(Alignment::Center);
    frame.render_widget(sent, sent_area);
}

/// A `width` x `height` rect centered in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
