//! Event handler for the TUI
//!
//! Routes keyboard events to the form, the chat panel, or the open dialog.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveDialog, App, FocusedPanel, FormField};
use super::event::Event;
use super::widgets::TextInput;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
        _ => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    // Nothing changes while a recorded turn is still unanswered
    if app.is_waiting() {
        return Ok(());
    }

    if app.has_dialog() {
        app.close_dialog();
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => {
            app.quit();
            return Ok(());
        }
        KeyCode::F(1) => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }
        KeyCode::F(5) => {
            app.calculate();
            return Ok(());
        }
        KeyCode::Tab => {
            app.toggle_panel_focus();
            return Ok(());
        }
        _ => {}
    }

    match app.focused_panel {
        FocusedPanel::Form => handle_form_key(app, key),
        FocusedPanel::Chat => handle_chat_key(app, key),
    }
}

/// Handle keys when the form is focused
fn handle_form_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Down => app.next_field(),
        KeyCode::Up | KeyCode::BackTab => app.prev_field(),
        KeyCode::Enter => {
            if app.focused_field == FormField::Calculate {
                app.calculate();
            } else {
                app.next_field();
            }
        }
        _ => match app.focused_field {
            FormField::FiscalYear => match key.code {
                KeyCode::Left | KeyCode::Char('h') => app.cycle_fiscal_year(false),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    app.cycle_fiscal_year(true)
                }
                _ => {}
            },
            FormField::ChatToggle => {
                if key.code == KeyCode::Char(' ') {
                    app.toggle_chat();
                }
            }
            FormField::ApiKey => handle_credential_key(app, key),
            FormField::Calculate => {
                if key.code == KeyCode::Char(' ') {
                    app.calculate();
                }
            }
            field => {
                if let Some(input) = app.form.input_mut(field) {
                    edit_text(input, key);
                }
            }
        },
    }
    Ok(())
}

/// Edits go straight to the session credential; nothing else holds the key
fn handle_credential_key(app: &mut App, key: KeyEvent) {
    let credential = app.session.credential_mut();
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => credential.clear(),
        KeyCode::Char(c) => credential.push(c),
        KeyCode::Backspace => credential.pop(),
        KeyCode::Delete => credential.clear(),
        _ => {}
    }
}

/// Handle keys when the chat panel is focused
fn handle_chat_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Enter => app.submit_chat(),
        KeyCode::PageUp => app.chat_scroll = app.chat_scroll.saturating_add(5),
        KeyCode::PageDown => app.chat_scroll = app.chat_scroll.saturating_sub(5),
        _ => edit_text(&mut app.chat_input, key),
    }
    Ok(())
}

/// Shared line-editing keys
fn edit_text(input: &mut TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}
