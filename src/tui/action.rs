//! Actions returned by screen event handlers.

use crate::model::Field;

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` applies these to the [`FormState`](crate::model::FormState)
/// and navigates between screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Replace the raw value of one field of the record at `position`.
    UpdateField {
        position: usize,
        field: Field,
        value: String,
    },
    /// Append a default record ("Add Item").
    AppendRecord,
    /// Remove the last record ("Remove Last").
    RemoveLastRecord,
    /// Validate everything and submit the dataset.
    Submit,
    /// Quit the application.
    Quit,
}
