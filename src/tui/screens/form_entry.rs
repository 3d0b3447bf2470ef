//! Form entry screen: the growable list of record cards, the button row and
//! the timing display.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{Field, FormState};
use crate::tui::action::Action;
use crate::tui::diagnostics::Diagnostics;
use crate::tui::widgets::{CARD_HEIGHT, StatusBarContext, draw_record_card, draw_status_bar};

/// Position of the input cursor: a record (by display position) and a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub position: usize,
    pub field: Field,
}

/// State for the form entry screen.
///
/// Field values live in [`FormState`]; this only tracks where the cursor is.
#[derive(Debug, Clone, Default)]
pub struct FormEntryState {
    cursor: Cursor,
}

impl FormEntryState {
    /// Creates a new state with the cursor on the first field of the first record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Moves the cursor.
    pub fn set_cursor(&mut self, position: usize, field: Field) {
        self.cursor = Cursor { position, field };
    }

    /// Pulls the cursor back onto the last record if it points past `len`.
    pub fn clamp(&mut self, len: usize) {
        self.cursor.position = self.cursor.position.min(len.saturating_sub(1));
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    ///
    /// Editing keys produce [`Action::UpdateField`] with the full new value;
    /// `form` is only read here.
    pub fn handle_key(&mut self, key: KeyEvent, form: &FormState) -> Action {
        self.clamp(form.len());

        // AltGr arrives as CONTROL | ALT on Windows and must still type
        let alt_command = key.modifiers == KeyModifiers::ALT
            || key.modifiers == KeyModifiers::ALT | KeyModifiers::SHIFT;
        if alt_command {
            return match key.code {
                KeyCode::Char('a') | KeyCode::Char('A') => Action::AppendRecord,
                KeyCode::Char('r') | KeyCode::Char('R') if form.can_remove() => {
                    Action::RemoveLastRecord
                }
                _ => Action::None,
            };
        }
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT)
        {
            return Action::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus_next(form.len());
                Action::None
            }
            KeyCode::BackTab => {
                self.focus_prev(form.len());
                Action::None
            }
            KeyCode::Up => {
                self.cursor.position = self.cursor.position.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.cursor.position = (self.cursor.position + 1).min(form.len() - 1);
                Action::None
            }
            KeyCode::Backspace => self.edit(form, |value| {
                value.pop();
            }),
            KeyCode::Char(ch) => self.edit(form, |value| value.push(ch)),
            KeyCode::Enter => Action::Submit,
            KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    /// Next field; past the last field of a record, the first field of the
    /// next record, wrapping to the top.
    fn focus_next(&mut self, len: usize) {
        match self.cursor.field.next() {
            Some(field) => self.cursor.field = field,
            None => {
                self.cursor.field = Field::Text;
                self.cursor.position = (self.cursor.position + 1) % len;
            }
        }
    }

    /// Mirror of [`focus_next`](Self::focus_next).
    fn focus_prev(&mut self, len: usize) {
        match self.cursor.field.prev() {
            Some(field) => self.cursor.field = field,
            None => {
                self.cursor.field = Field::Url;
                self.cursor.position = (self.cursor.position + len - 1) % len;
            }
        }
    }

    fn edit(&self, form: &FormState, change: impl FnOnce(&mut String)) -> Action {
        let Cursor { position, field } = self.cursor;
        let Some(entry) = form.get(position) else {
            return Action::None;
        };
        let mut value = entry.value(field).to_string();
        change(&mut value);
        Action::UpdateField {
            position,
            field,
            value,
        }
    }
}

/// First record to draw so that the cursor's record is among `visible` cards.
fn first_visible(cursor: usize, visible: usize) -> usize {
    cursor.saturating_sub(visible.saturating_sub(1))
}

/// The "Add Item / Remove Last / Submit" row. Remove Last is dimmed when disabled.
fn button_line(can_remove: bool) -> Line<'static> {
    let remove_style = if can_remove {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    Line::from(vec![
        Span::styled("[ Add Item ]", Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled("[ Remove Last ]", remove_style),
        Span::raw("  "),
        Span::styled("[ Submit ]", Style::default().fg(Color::Cyan)),
    ])
}

/// Renders the form entry screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form_entry(
    state: &FormEntryState,
    form: &FormState,
    diagnostics: &Diagnostics,
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .title(" Form Array Performance Test ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [status_area, list_area, buttons_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_status_bar(
        &StatusBarContext::new(diagnostics, form.len()),
        frame,
        status_area,
    );

    // Record cards, scrolled so the focused record is visible
    let visible = usize::from((list_area.height / CARD_HEIGHT).max(1));
    let cursor = state.cursor();
    let first = first_visible(cursor.position, visible);
    let shown = form.records().iter().enumerate().skip(first).take(visible);
    let slots = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible]).split(list_area);
    for ((position, entry), slot) in shown.zip(slots.iter()) {
        let focus = (position == cursor.position).then_some(cursor.field);
        draw_record_card(position, entry, focus, frame, *slot);
    }

    let mut buttons = button_line(form.can_remove());
    if form.len() > visible {
        buttons.spans.push(Span::styled(
            format!("    item {} of {}", cursor.position + 1, form.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(buttons), buttons_area);

    let footer = Paragraph::new(Line::from(
        "Tab: next field  ↑↓: item  Alt+a: add  Alt+r: remove last  Enter: submit  F1: help  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
