use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Tabs},
    Frame,
};

use super::panel;
use crate::models::TypeFilter;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_signed, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    render_filter_bar(f, chunks[0], app);
    render_table(f, chunks[1], app);
}

fn render_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let filters = TypeFilter::all();
    let titles: Vec<Line> = filters
        .iter()
        .map(|t| Line::from(format!(" {t} ")))
        .collect();
    let selected = filters
        .iter()
        .position(|t| *t == app.type_filter)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::dim_style())
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│");

    f.render_widget(tabs, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_transactions();

    if visible.is_empty() {
        let msg = if app.search_input.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions ({})", app.type_filter),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Add one with :add-txn <date> <type> <amount> <category>",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions matching '{}'", app.search_input),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to clear the search",
                    theme::dim_style(),
                )),
            ]
        };
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(panel("Transactions (0)")),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Category", "Type", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", txn.date)),
                Cell::from(truncate(&txn.category, 30)),
                Cell::from(txn.txn_type.to_string()),
                Cell::from(Span::styled(
                    format_signed(txn.signed_amount(), &app.currency),
                    amount_style,
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(16),
    ];

    let search = if app.search_input.is_empty() {
        String::new()
    } else {
        format!(" search: '{}'", app.search_input)
    };
    let title = format!("Transactions ({}){search}", visible.len());

    let table = Table::new(rows, widths).header(header).block(panel(&title));
    f.render_widget(table, area);
}
