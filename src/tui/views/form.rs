//! Input form view
//!
//! One row per [`FormField`]; text rows reuse the [`TextInput`] widget.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

use crate::tui::app::{App, FocusedPanel, FormField, LABEL_WIDTH};

/// Render the form panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let panel_focused = app.focused_panel == FocusedPanel::Form;
    let block = Block::default()
        .title(" Inputs ")
        .borders(Borders::ALL)
        .border_style(border_style(panel_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for (i, field) in FormField::ALL.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let row = Rect::new(inner.x, y, inner.width, 1);
        let focused = panel_focused && app.focused_field == *field;

        match app.form.input(*field) {
            Some(input) => {
                let mut input = input.clone();
                input.focused = focused;
                frame.render_widget(&input, row);
            }
            None => frame.render_widget(control_line(app, *field, focused), row),
        }
    }
}

/// Rows that are selected or toggled rather than typed
fn control_line(app: &App, field: FormField, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let (label, value) = match field {
        FormField::FiscalYear => ("Fiscal year", format!("< FY{} >", app.form.fiscal_year)),
        FormField::ApiKey => {
            let credential = app.session.credential();
            let shown = if credential.expose().is_empty() {
                "(not set)".to_string()
            } else {
                credential.masked()
            };
            ("API key", shown)
        }
        FormField::ChatToggle => {
            let shown = if app.session.chat_enabled() {
                "[x] On"
            } else {
                "[ ] Off"
            };
            ("Chat", shown.to_string())
        }
        FormField::Calculate => {
            return Line::from(Span::styled(
                "[ Calculate ]",
                value_style.add_modifier(Modifier::BOLD),
            ));
        }
        _ => ("", String::new()),
    };

    Line::from(vec![
        Span::styled(
            format!("{:<width$}", format!("{}: ", label), width = LABEL_WIDTH),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(value, value_style),
    ])
}

pub(super) fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
