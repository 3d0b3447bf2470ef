//! A growable list of validated form records in the terminal, with render
//! and mutation timings.
//!
//! [`model`] holds the form state and field rules and has no UI
//! dependencies; [`tui`] draws it and maps keys onto it.

pub mod config;
pub mod logging;
pub mod model;
pub mod tui;
