//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::info;

use crate::ai::GeminiClient;
use crate::config::settings::Settings;
use crate::models::ApiCredential;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the dashboard until the user quits
///
/// The session lives only for this call; dropping it discards the analysis,
/// the transcript, and the credential.
pub fn run_tui(settings: &Settings, credential: ApiCredential) -> Result<()> {
    let client = GeminiClient::new(&settings.ai)?;
    let mut terminal = init_terminal()?;
    let mut app = App::new(settings, credential);
    let events = EventHandler::default();
    info!("dashboard started");

    let result = event_loop(&mut terminal, &mut app, &events, &client);

    restore_terminal()?;
    info!(messages = app.session.transcript().len(), "dashboard closed");
    result
}

fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    events: &EventHandler,
    client: &GeminiClient,
) -> Result<()> {
    loop {
        terminal.draw(|frame| super::views::render(frame, app))?;

        // The user turn is already on screen; this call blocks until the
        // assistant answers or the request times out.
        if let Some(turn) = app.pending_turn.take() {
            app.session.complete_turn(turn, client);
            app.clear_status();
            continue;
        }

        handle_event(app, events.next()?)?;

        if app.should_quit {
            return Ok(());
        }
    }
}
