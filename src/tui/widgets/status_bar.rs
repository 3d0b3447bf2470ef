//! Status bar widget: render timing, last operation timing and item count.

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::diagnostics::{Diagnostics, format_millis};

/// Data passed to the status bar widget; decoupled from `App` so it can be
/// rendered in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Time from startup to the end of the first frame.
    pub initial_render: Option<Duration>,
    /// Elapsed time of the most recent append/remove.
    pub last_operation: Option<Duration>,
    /// Number of records in the form.
    pub item_count: usize,
}

impl StatusBarContext {
    /// Builds the context from live diagnostics and the current record count.
    pub fn new(diagnostics: &Diagnostics, item_count: usize) -> Self {
        Self {
            initial_render: diagnostics.initial_render(),
            last_operation: diagnostics.last_operation(),
            item_count,
        }
    }
}

/// Renders three dim lines:
///
/// ```text
/// Initial render time: 1.234ms
/// Last operation time: 0.012ms
/// Number of items: 3
/// ```
///
/// Unknown timings render as `-`.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let lines = vec![
        Line::from(vec![
            Span::styled("Initial render time: ", label),
            Span::styled(format_millis(ctx.initial_render), value),
        ]),
        Line::from(vec![
            Span::styled("Last operation time: ", label),
            Span::styled(format_millis(ctx.last_operation), value),
        ]),
        Line::from(vec![
            Span::styled("Number of items: ", label),
            Span::styled(ctx.item_count.to_string(), value),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}
