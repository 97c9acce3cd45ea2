//! Chat view
//!
//! Transcript above, question input below. When chat is gated the input row
//! shows the reason instead of the text field.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{ChatMessage, ChatRole};
use crate::tui::app::{App, FocusedPanel};

use super::form::border_style;

/// Render the transcript panel
pub fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Assistant ")
        .borders(Borders::ALL)
        .border_style(border_style(app.focused_panel == FocusedPanel::Chat));
    let inner = block.inner(area);

    let mut lines: Vec<Line> = Vec::new();
    for message in app.session.transcript().messages() {
        push_message(&mut lines, message);
    }
    if app.is_waiting() {
        lines.push(Line::from(Span::styled(
            "Assistant is thinking...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask a question about the analysis.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let total = wrapped_height(&lines, inner.width);
    let bottom = total.saturating_sub(inner.height);
    let offset = bottom.saturating_sub(app.chat_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

/// Render the question input row
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_panel == FocusedPanel::Chat;
    let block = Block::default()
        .title(" Question ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.session.chat_status().warning() {
        Some(warning) => {
            let line = Line::from(Span::styled(warning, Style::default().fg(Color::Yellow)));
            frame.render_widget(Paragraph::new(line), inner);
        }
        None => {
            let mut input = app.chat_input.clone();
            input.focused = focused && !app.is_waiting();
            frame.render_widget(&input, inner);
        }
    }
}

fn push_message(lines: &mut Vec<Line<'static>>, message: &ChatMessage) {
    let role_style = match message.role {
        ChatRole::User => Style::default().fg(Color::Cyan),
        ChatRole::Assistant => Style::default().fg(Color::Green),
    };

    lines.push(Line::from(Span::styled(
        format!("{}:", message.role),
        role_style.add_modifier(Modifier::BOLD),
    )));
    for text in message.content.lines() {
        lines.push(Line::from(text.to_string()));
    }
    lines.push(Line::from(""));
}

/// Rows the lines occupy once wrapped to `width`
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height() {
        let lines = vec![
            Line::from("a".repeat(25)),
            Line::from(""),
            Line::from("short"),
        ];
        assert_eq!(wrapped_height(&lines, 10), 3 + 1 + 1);
    }

    #[test]
    fn test_message_lines() {
        let mut lines = Vec::new();
        push_message(&mut lines, &ChatMessage::assistant("one\ntwo"));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].to_string(), "Assistant:");
        assert_eq!(lines[2].to_string(), "two");
    }
}
