//! Metrics view
//!
//! Shows the derived figures from the last Calculate and a per-appropriation
//! table of balances and expiry dates.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::display::format_burn;
use crate::models::{AnalysisContext, BurnEstimate, Money};
use crate::tui::app::App;

/// Render the metrics panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Analysis ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(context) = app.session.context() else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Fill in the form and press Calculate (F5).",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(2)])
        .split(inner);

    render_summary(frame, app, context, chunks[0]);
    render_table(frame, app, context, chunks[1]);
}

fn render_summary(frame: &mut Frame, app: &App, ctx: &AnalysisContext, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let burn = ctx.months_of_burn();
    let burn_color = match burn {
        BurnEstimate::NotAvailable => Color::DarkGray,
        BurnEstimate::Months(m) if m < rust_decimal::Decimal::from(3) => Color::Red,
        BurnEstimate::Months(_) => Color::Green,
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(
                "FY{} as of {}",
                ctx.fiscal_year,
                ctx.report_date.format(&app.settings.date_format)
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        metric("Total balance", amount_span(ctx.total_balance, symbol)),
        metric(
            "Monthly personnel cost",
            Span::raw(ctx.monthly_personnel_cost.format_with_symbol(symbol)),
        ),
        metric(
            "Months of burn",
            Span::styled(format_burn(burn), Style::default().fg(burn_color)),
        ),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_table(frame: &mut Frame, app: &App, ctx: &AnalysisContext, area: Rect) {
    let symbol = app.settings.currency_symbol.as_str();
    let header = Row::new(vec!["Code", "Balance", "Expires"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = ctx
        .appropriations
        .iter()
        .map(|(code, summary)| {
            Row::new(vec![
                Cell::from(code.as_str()),
                Cell::from(amount_span(summary.balance, symbol)),
                Cell::from(
                    summary
                        .expiry_date
                        .format(&app.settings.date_format)
                        .to_string(),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(18),
            Constraint::Min(10),
        ],
    )
    .header(header);

    frame.render_widget(table, area);
}

fn metric(label: &str, value: Span<'static>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<24}", format!("{}:", label)), Style::default().fg(Color::White)),
        value,
    ])
}

fn amount_span(amount: Money, symbol: &str) -> Span<'static> {
    let color = if amount.is_negative() {
        Color::Red
    } else {
        Color::Yellow
    };
    Span::styled(amount.format_with_symbol(symbol), Style::default().fg(color))
}
