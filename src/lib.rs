//! focusmode - a pomodoro focus timer for study sessions
//!
//! The [`focus`] module is the timer core and has no terminal or file
//! dependencies. The rest of the crate wires it to a configuration file, a
//! statistics store, logging and a terminal UI.

pub mod cli;
pub mod config;
pub mod error;
pub mod focus;
pub mod logging;
pub mod stats;
pub mod tui;

pub use error::{Error, ReportError, Result, SettingsError};
