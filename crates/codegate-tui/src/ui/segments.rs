//! Segment boxes
//!
//! One bordered box per segment, laid out in a centered row. The focused box
//! is highlighted and carries the terminal cursor.

use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Paragraph},
};

use crate::App;

const BOX_WIDTH: u16 = 5;
const BOX_GAP: u16 = 1;

/// Box areas for `count` segments centered in `area`.
///
/// The gap is dropped when the row does not fit; boxes past the right edge
/// are clipped to `area` and may end up empty.
pub fn segment_layout(area: Rect, count: usize) -> Vec<Rect> {
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    let width_with = |gap: u16| count.saturating_mul(BOX_WIDTH + gap).saturating_sub(gap);
    let gap = if width_with(BOX_GAP) <= area.width { BOX_GAP } else { 0 };
    let row_width = width_with(gap);
    let left = area.x + area.width.saturating_sub(row_width) / 2;

    (0..count)
        .map(|i| {
            let x = left.saturating_add(i.saturating_mul(BOX_WIDTH + gap));
            Rect::new(x, area.y, BOX_WIDTH, area.height).intersection(area)
        })
        .collect()
}

/// Segment whose box contains the cell at (`column`, `row`).
pub fn segment_at(segments: &[Rect], column: u16, row: u16) -> Option<usize> {
    let position = Position::new(column, row);
    segments.iter().position(|area| area.contains(position))
}

/// Render the segment row and return the box areas.
pub fn render(frame: &mut Frame, app: &App, area: Rect) -> Vec<Rect> {
    let boxes = segment_layout(area, app.code_length());

    for (index, (segment, cell)) in app.segments().iter().zip(&boxes).enumerate() {
        let focused = app.focused() == Some(index);
        let border = match (focused, segment) {
            (true, _) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            (false, Some(_)) => Style::default().fg(Color::White),
            (false, None) => Style::default().fg(Color::DarkGray),
        };

        let block = Block::bordered().border_type(BorderType::Rounded).border_style(border);
        let digit = segment.map(String::from).unwrap_or_default();
        let paragraph = Paragraph::new(digit)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, *cell);

        if focused && cell.width > 2 && cell.height > 2 {
            frame.set_cursor_position((cell.x + cell.width / 2, cell.y + 1));
        }
    }

    boxes
}
