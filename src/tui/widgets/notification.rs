//! Transient popup shown over the current screen after a successful submit.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::Submission;

const MAX_WIDTH: u16 = 64;

/// A popup message with a title and a multi-line body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    title: String,
    body: String,
}

impl Notification {
    /// Success notification carrying the submitted dataset as pretty JSON.
    pub fn submitted(submission: &Submission) -> Self {
        let body = submission
            .to_pretty_json()
            .unwrap_or_else(|e| format!("could not format dataset: {e}"));
        Self {
            title: "Form submitted successfully!".to_string(),
            body,
        }
    }

    /// Returns the title line.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Renders the notification centered in `area`, clearing what is beneath it.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    let body_lines = notification.body.lines().count() as u16;
    // borders + title + blank + body + blank + hint
    let height = body_lines.saturating_add(6).min(area.height);
    let width = area.width.min(MAX_WIDTH);

    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(popup);

    let block = Block::default()
        .title(" Submitted ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let mut lines = vec![
        Line::from(Span::styled(
            notification.title.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(notification.body.lines().map(Line::from));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to dismiss",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::model::{Field, FormState};

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn make_submission() -> Submission {
        let mut form = FormState::new();
        form.update_field(0, Field::Text, "Alice").unwrap();
        form.update_field(0, Field::Number, "25").unwrap();
        form.update_field(0, Field::Email, "a@b.com").unwrap();
        form.update_field(0, Field::Date, "2024-01-01").unwrap();
        form.update_field(0, Field::Url, "https://x.com").unwrap();
        form.submit().unwrap()
    }

    #[test]
    fn submitted_carries_dataset_json() {
        let submission = make_submission();
        let notification = Notification::submitted(&submission);
        assert_eq!(notification.title(), "Form submitted successfully!");
        assert_eq!(notification.body(), submission.to_pretty_json().unwrap());
    }

    #[test]
    fn renders_title_body_and_hint() {
        let notification = Notification::submitted(&make_submission());
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_notification(&notification, frame, frame.area()))
            .unwrap();
        let output = buffer_to_string(terminal.backend().buffer());
        assert!(output.contains("Form submitted successfully!"));
        assert!(output.contains("\"text\": \"Alice\""));
        assert!(output.contains("Press any key to dismiss"));
    }

    #[test]
    fn renders_in_tiny_area_without_panic() {
        let notification = Notification::submitted(&make_submission());
        let backend = TestBackend::new(10, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_notification(&notification, frame, frame.area()))
            .unwrap();
    }
}
