//! TUI screen implementations.

pub mod form_entry;
pub mod help;

pub use form_entry::{Cursor, FormEntryState, draw_form_entry};
pub use help::{HelpState, draw_help};
