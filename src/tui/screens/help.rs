//! Help screen: the form's keybindings as a scrollable table.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::tui::action::Action;
use crate::tui::app::Screen;

/// One row of the table: a section heading or a key and what it does.
enum Entry {
    Heading(&'static str),
    Binding(&'static str, &'static str),
}

static ENTRIES: &[Entry] = &[
    Entry::Heading("Moving around"),
    Entry::Binding("Tab / Shift-Tab", "next / previous field, crossing items"),
    Entry::Binding("Up / Down", "same field in the previous / next item"),
    Entry::Heading("Editing"),
    Entry::Binding("any character", "type into the focused field"),
    Entry::Binding("Backspace", "delete the last character"),
    Entry::Heading("Items"),
    Entry::Binding("Alt+a", "add item"),
    Entry::Binding("Alt+r", "remove last item (needs 2+ items)"),
    Entry::Binding("Enter", "submit"),
    Entry::Binding("any key", "dismiss the submitted popup"),
    Entry::Heading("App"),
    Entry::Binding("F1", "this help"),
    Entry::Binding("Esc", "quit"),
    Entry::Binding("Ctrl+C", "quit from anywhere"),
];

/// State for the help screen: only how far the table is scrolled.
#[derive(Debug, Clone, Default)]
pub struct HelpState {
    scroll: usize,
}

impl HelpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of table rows hidden above the top edge.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scrolls back to the first row.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    /// Up/Down scroll; `q` and Esc go back to the form.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = (self.scroll + 1).min(ENTRIES.len() - 1),
            KeyCode::Char('q') | KeyCode::Esc => return Action::Navigate(Screen::FormEntry),
            _ => {}
        }
        Action::None
    }
}

fn row(entry: &Entry) -> Row<'static> {
    match entry {
        Entry::Heading(title) => Row::new([*title, ""]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Entry::Binding(keys, what) => Row::new([format!("  {keys}"), what.to_string()])
            .style(Style::default().fg(Color::Gray)),
    }
}

/// Renders the key table and a one-line footer.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let table = Table::new(
        ENTRIES.iter().skip(state.scroll()).map(row),
        [Constraint::Length(20), Constraint::Min(0)],
    )
    .block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(table, table_area);

    frame.render_widget(
        Paragraph::new("Up/Down: scroll  q/Esc: back to the form")
            .style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}
