//! TUI: App state, event loop, screens, widgets.

pub mod action;
pub mod app;
pub mod diagnostics;
pub mod error;
pub mod screens;
pub mod widgets;

pub use app::App;
pub use diagnostics::Diagnostics;
pub use error::AppError;
