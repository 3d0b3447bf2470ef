use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};
use ratatui::{Frame, Terminal};

use crate::model::{Field, FormState};

use super::action::Action;
use super::diagnostics::Diagnostics;
use super::error::AppError;
use super::screens::{FormEntryState, HelpState, draw_form_entry, draw_help};
use super::widgets::{Notification, draw_notification};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The record list.
    FormEntry,
    /// Show keybinding help.
    Help,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    form: FormState,
    form_entry: FormEntryState,
    help: HelpState,
    notification: Option<Notification>,
    diagnostics: Diagnostics,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new `App` on the [`Screen::FormEntry`] screen with one
    /// default record. Starts the initial-render clock.
    pub fn new() -> Self {
        Self {
            screen: Screen::FormEntry,
            form: FormState::new(),
            form_entry: FormEntryState::new(),
            help: HelpState::new(),
            notification: None,
            diagnostics: Diagnostics::new(),
            should_quit: false,
        }
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        info!("starting with {} record(s)", self.form.len());
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.diagnostics.record_first_render();
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        info!("quitting with {} record(s)", self.form.len());
        Ok(())
    }

    /// Renders the current screen, with the notification on top if one is open.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.screen {
            Screen::FormEntry => {
                draw_form_entry(&self.form_entry, &self.form, &self.diagnostics, frame, area)
            }
            Screen::Help => draw_help(&self.help, frame, area),
        }
        if let Some(notification) = &self.notification {
            draw_notification(notification, frame, area);
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.notification.take().is_some() {
            return;
        }

        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.reset();
                self.screen = Screen::Help;
            }
            return;
        }

        let action = match self.screen {
            Screen::FormEntry => self.form_entry.handle_key(key, &self.form),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    /// Applies an [`Action`] to the form and navigation state.
    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.screen = screen,
            Action::UpdateField {
                position,
                field,
                value,
            } => match self.form.update_field(position, field, value) {
                Ok(state) => debug!("record {position} {field} -> {state:?}"),
                Err(e) => warn!("update ignored: {e}"),
            },
            Action::AppendRecord => {
                let id = self.diagnostics.measure(|| self.form.append());
                if let Some(position) = self.form.position_of(id) {
                    self.form_entry.set_cursor(position, Field::Text);
                }
            }
            Action::RemoveLastRecord => {
                if self.form.can_remove() {
                    self.diagnostics.measure(|| self.form.remove_last());
                    self.form_entry.clamp(self.form.len());
                }
            }
            Action::Submit => match self.form.submit() {
                Ok(submission) => {
                    self.notification = Some(Notification::submitted(&submission));
                }
                Err(e) => self.form_entry.set_cursor(e.position, e.field),
            },
            Action::Quit => self.should_quit = true,
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the form state.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Returns the form entry screen state.
    pub fn form_entry(&self) -> &FormEntryState {
        &self.form_entry
    }

    /// Returns the open notification, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Returns the timing diagnostics.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
