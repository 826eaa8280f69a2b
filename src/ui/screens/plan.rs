use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use super::dashboard::warning_lines;
use super::panel;
use crate::ui::app::{App, PlanFocus};
use crate::ui::theme;
use crate::ui::util::{format_amount, format_ratio, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(10)])
        .split(columns[1]);

    render_income(f, left[0], app);
    render_bills(f, left[1], app);
    render_allocations(f, right[0], app);
    render_summary(f, right[1], app);
}

fn render_income(f: &mut Frame, area: Rect, app: &App) {
    let plan = app.state.plan();
    let cur = app.currency.as_str();

    let lines = vec![
        Line::from(vec![
            Span::styled("Income   ", theme::dim_style()),
            Span::styled(format_amount(plan.income, cur), theme::income_style()),
        ]),
        Line::from(vec![
            Span::styled("Saving   ", theme::dim_style()),
            Span::styled(
                format!("{}%", plan.saving_percent.normalize()),
                theme::normal_style(),
            ),
            Span::styled(
                format!("  = {}", format_amount(app.summary.saving_amount, cur)),
                theme::dim_style(),
            ),
        ]),
        Line::from(Span::styled(":income <amt>  :saving <pct>", theme::dim_style())),
    ];

    f.render_widget(
        Paragraph::new(lines).block(panel(&format!("Plan {}", plan.month))),
        area,
    );
}

fn focus_marker(app: &App, focus: PlanFocus) -> &'static str {
    if app.plan_focus == focus {
        "▸ "
    } else {
        ""
    }
}

fn render_bills(f: &mut Frame, area: Rect, app: &App) {
    let bills = &app.state.plan().fixed_bills;
    let focused = app.plan_focus == PlanFocus::Bills;
    let title = format!(
        "{}Fixed bills ({})",
        focus_marker(app, PlanFocus::Bills),
        format_amount(app.summary.fixed_total, &app.currency)
    );

    if bills.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No fixed bills", theme::dim_style())),
            Line::from(Span::styled("Add one with :bill <name> <amount>", theme::dim_style())),
        ])
        .centered()
        .block(panel(&title));
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = bills
        .iter()
        .enumerate()
        .map(|(i, bill)| {
            let style = if focused && i == app.bill_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", truncate(&bill.name, 19)), style),
                Span::styled(
                    format!("{:>14}", format_amount(bill.amount, &app.currency)),
                    style,
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel(&title)), area);
}

fn render_allocations(f: &mut Frame, area: Rect, app: &App) {
    let s = &app.summary;
    let focused = app.plan_focus == PlanFocus::Allocations;
    let title = format!(
        "{}Allocations of {} ({}%)",
        focus_marker(app, PlanFocus::Allocations),
        format_amount(s.variable_budget, &app.currency),
        s.allocation_sum.normalize()
    );

    let items: Vec<ListItem> = s
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let is_cursor = focused && i == app.allocation_index;
            let name_style = if is_cursor {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            let color = if line.delta < Decimal::ZERO {
                theme::RED
            } else if line.progress >= Decimal::new(9, 1) {
                theme::YELLOW
            } else {
                theme::GREEN
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("P{:<3}", line.priority), theme::dim_style()),
                Span::styled(format!("{:<12}", truncate(&line.name, 11)), name_style),
                Span::styled(
                    format!("{:>4}% ", line.percent.normalize()),
                    theme::normal_style(),
                ),
                Span::styled(
                    format!(
                        "{}/{} ",
                        format_amount(line.actual, &app.currency),
                        format_amount(line.planned, &app.currency)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(line.progress, 16), Style::default().fg(color)),
                Span::styled(
                    format!(" {}", format_ratio(line.progress)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel(&title)), area);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let s = &app.summary;
    let cur = app.currency.as_str();

    let saved = if app.is_plan_saved() {
        Span::styled("● saved", theme::income_style())
    } else if s.can_save() {
        Span::styled("○ unsaved, :save to keep", theme::dim_style())
    } else {
        Span::styled("○ cannot save until allocations total 100%", theme::dim_style())
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("After saving     ", theme::dim_style()),
            Span::styled(format_amount(s.after_saving, cur), theme::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("Variable budget  ", theme::dim_style()),
            Span::styled(
                format_amount(s.variable_budget, cur),
                theme::normal_style().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Status           ", theme::dim_style()),
            Span::styled(s.status.to_string(), theme::normal_style()),
            Span::raw("  "),
            saved,
        ]),
        Line::from(""),
    ];
    lines.extend(warning_lines(s));

    f.render_widget(Paragraph::new(lines).block(panel("Summary")), area);
}
