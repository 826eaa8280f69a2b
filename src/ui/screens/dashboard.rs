use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::budget::BudgetSummary;
use crate::ui::app::App;
use crate::ui::ring::{self, Slice};
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Ring + breakdown
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(chunks[1]);

    render_ring(f, body[0], app);
    render_breakdown(f, body[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let s = &app.summary;
    let income_count = app.state.transactions().iter().filter(|t| t.is_income()).count();
    let expense_count = app.state.transactions().iter().filter(|t| t.is_expense()).count();

    render_card(
        f,
        cards[0],
        "Income",
        s.total_income,
        theme::GREEN,
        format!("{income_count} txns"),
        &app.currency,
    );
    render_card(
        f,
        cards[1],
        "Spent",
        s.total_spent,
        theme::RED,
        format!("{expense_count} txns"),
        &app.currency,
    );
    render_card(
        f,
        cards[2],
        "Variable budget",
        s.variable_budget,
        sign_color(s.variable_budget),
        format!("{} plan", app.state.plan().month),
        &app.currency,
    );
    render_card(
        f,
        cards[3],
        "Remaining",
        s.remaining,
        sign_color(s.remaining),
        "budget - spent".to_string(),
        &app.currency,
    );
}

fn sign_color(amount: Decimal) -> Color {
    if amount >= Decimal::ZERO {
        theme::GREEN
    } else {
        theme::RED
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: Color,
    subtitle: String,
    currency: &str,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount, currency),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn render_ring(f: &mut Frame, area: Rect, app: &App) {
    let slices = ring::layout(&app.summary.buckets);

    if slices.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with :add-txn",
            theme::dim_style(),
        )))
        .centered()
        .block(panel("Spending"));
        f.render_widget(msg, area);
        return;
    }

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(30)])
        .split(area);

    let center = format_amount(app.summary.remaining, &app.currency);
    ring::render(f, split[0], panel("Spending"), &slices, &center);
    render_legend(f, split[1], app, &slices);
}

fn render_legend(f: &mut Frame, area: Rect, app: &App, slices: &[Slice]) {
    let items: Vec<ListItem> = slices
        .iter()
        .map(|slice| {
            let bucket = app.summary.buckets.iter().find(|b| b.name == slice.label);
            let matched = bucket.is_some_and(|b| b.matched);
            let share = bucket.map(|b| b.share).unwrap_or_default();
            let name_style = if matched {
                theme::normal_style()
            } else {
                theme::dim_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    "● ",
                    Style::default().fg(theme::ring_color(slice.color_slot)),
                ),
                Span::styled(format!("{:<11}", truncate(&slice.label, 11)), name_style),
                Span::styled(
                    format!("{:>10}", format_amount(slice.value, &app.currency)),
                    theme::normal_style(),
                ),
                Span::styled(format!(" {share:>3}%"), theme::dim_style()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel("Categories")), area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let s = &app.summary;
    let cur = app.currency.as_str();

    let row = |label: &str, amount: Decimal, style: Style| {
        Line::from(vec![
            Span::styled(format!("{label:<18}"), theme::dim_style()),
            Span::styled(format!("{:>14}", format_amount(amount, cur)), style),
        ])
    };

    let mut lines = vec![
        row("Income", s.income, theme::normal_style()),
        row("Saving", s.saving_amount, theme::normal_style()),
        row("Fixed bills", s.fixed_total, theme::normal_style()),
        row(
            "Variable budget",
            s.variable_budget,
            theme::normal_style().add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];
    lines.extend(warning_lines(s));

    f.render_widget(Paragraph::new(lines).block(panel("Summary")), area);
}

/// Independent warnings: a plan can be impossible and over budget at once.
pub(crate) fn warning_lines(s: &BudgetSummary) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if s.is_impossible() {
        lines.push(Line::from(Span::styled(
            "⚠ Plan impossible: savings and bills exceed income",
            theme::expense_style().add_modifier(Modifier::BOLD),
        )));
    }
    if s.is_over_budget() {
        lines.push(Line::from(Span::styled(
            "⚠ Over budget: spending exceeds the variable budget",
            theme::warning_style(),
        )));
    }
    if !s.can_save() {
        lines.push(Line::from(Span::styled(
            format!("⚠ Allocations total {}%", s.allocation_sum.normalize()),
            theme::warning_style(),
        )));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled("✓ On track", theme::income_style())));
    }
    lines
}
