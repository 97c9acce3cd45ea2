//! Status bar view
//!
//! Shows total balance, months of burn, chat state and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::display::format_burn;
use crate::services::ChatStatus;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    spans.push(Span::styled(
        format!(" FY{} ", app.form.fiscal_year),
        Style::default().fg(Color::Cyan),
    ));

    if let Some(context) = app.session.context() {
        let total_color = if context.total_balance.is_negative() {
            Color::Red
        } else {
            Color::Yellow
        };
        spans.push(Span::raw("│ "));
        spans.push(Span::styled("Total: ", Style::default().fg(Color::White)));
        spans.push(Span::styled(
            context
                .total_balance
                .format_with_symbol(&app.settings.currency_symbol),
            Style::default().fg(total_color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Burn: ", Style::default().fg(Color::White)));
        spans.push(Span::raw(format_burn(context.months_of_burn())));
        spans.push(Span::raw(" "));
    }

    let (chat_label, chat_color) = match app.session.chat_status() {
        ChatStatus::Ready => ("Chat: ready", Color::Green),
        ChatStatus::Disabled => ("Chat: off", Color::DarkGray),
        ChatStatus::MissingCredential => ("Chat: no key", Color::Yellow),
    };
    spans.push(Span::raw("│ "));
    spans.push(Span::styled(chat_label, Style::default().fg(chat_color)));

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    // Key hints (right-aligned)
    let hints = " Esc:Quit  F1:Help  F5:Calculate  Tab:Panel ";

    let left_len: usize = spans.iter().map(|s| s.width()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
