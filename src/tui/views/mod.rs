//! TUI Views module
//!
//! The single dashboard page: form, metrics, chat and status bar.

pub mod chat;
pub mod form;
pub mod metrics;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    form::render(frame, app, layout.form);
    metrics::render(frame, app, layout.metrics);
    chat::render_transcript(frame, app, layout.transcript);
    chat::render_input(frame, app, layout.chat_input);
    status_bar::render(frame, app, layout.status_bar);

    if app.active_dialog == ActiveDialog::Help {
        dialogs::help::render(frame);
    }
}
