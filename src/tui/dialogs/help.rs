//! Help dialog
//!
//! Shows keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines())
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        heading("Global Keys"),
        Line::from(""),
        key_line("Esc / Ctrl+c", "Quit (nothing is saved)"),
        key_line("F1", "Show/hide help"),
        key_line("F5", "Calculate"),
        key_line("Tab", "Switch between form and chat"),
        Line::from(""),
        heading("Form"),
        Line::from(""),
        key_line("Up/Down", "Move between rows"),
        key_line("Enter", "Next row, or Calculate on the button"),
        key_line("Left/Right", "Change fiscal year"),
        key_line("Space", "Toggle chat / press Calculate"),
        key_line("Delete", "Clear the API key"),
        Line::from(""),
        heading("Chat"),
        Line::from(""),
        key_line("Enter", "Send question"),
        key_line("PgUp/PgDn", "Scroll transcript"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )]),
    ]
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>14}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
