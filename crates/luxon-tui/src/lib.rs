//! Terminal dashboard for Luxon.
//!
//! This crate provides a standalone binary wrapper around luxon-cli's TUI functionality.
//! The actual TUI implementation lives in `luxon-cli` with the `tui` feature enabled.
//!
//! For the TUI implementation, see [`luxon_cli::tui`].

pub use luxon_cli::tui;
