//! Reusable TUI widgets.

pub mod notification;
pub mod record_card;
pub mod status_bar;

pub use notification::{Notification, draw_notification};
pub use record_card::{CARD_HEIGHT, draw_record_card};
pub use status_bar::{StatusBarContext, draw_status_bar};
