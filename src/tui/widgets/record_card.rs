//! One record rendered as a bordered card: five labeled inputs, each with an
//! inline error line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{FIELD_COUNT, Field, RecordEntry};

/// Rows a card occupies: borders plus an input line and an error line per field.
pub const CARD_HEIGHT: u16 = 2 + 2 * FIELD_COUNT as u16;

const LABEL_WIDTH: usize = 8;

/// Builds the input line for one field.
fn input_line(entry: &RecordEntry, field: Field, focused: bool) -> Line<'_> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![Span::styled(
        format!("{:<LABEL_WIDTH$}", field.label()),
        label_style,
    )];

    let value = entry.value(field);
    if value.is_empty() && !focused {
        spans.push(Span::styled(
            field.placeholder(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::raw(value));
    }
    if focused {
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

/// Renders the record at display `position`; `focus` is the focused field, if
/// the cursor is in this record.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_record_card(
    position: usize,
    entry: &RecordEntry,
    focus: Option<Field>,
    frame: &mut Frame,
    area: Rect,
) {
    let border_color = if entry.has_errors() {
        Color::Red
    } else if focus.is_some() {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(format!(" Item {} ", position + 1))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1); 2 * FIELD_COUNT]).split(inner);

    for &field in Field::all() {
        let input_row = rows[2 * field.index()];
        let error_row = rows[2 * field.index() + 1];

        let line = input_line(entry, field, focus == Some(field));
        frame.render_widget(Paragraph::new(line), input_row);

        if let Some(err) = entry.error(field) {
            let error_line = Paragraph::new(Span::styled(
                format!("{:LABEL_WIDTH$}{err}", ""),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(error_line, error_row);
        }
    }
}
