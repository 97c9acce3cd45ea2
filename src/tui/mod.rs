//! Terminal User Interface module
//!
//! The single-page dashboard built on ratatui: input form, metrics panel,
//! and the assistant chat.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
