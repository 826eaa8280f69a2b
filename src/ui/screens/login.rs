use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::panel;
use crate::ui::app::{App, LoginField};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let [column] = Layout::horizontal([Constraint::Length(48)])
        .flex(Flex::Center)
        .areas(area);
    let [form] = Layout::vertical([Constraint::Length(14)])
        .flex(Flex::Center)
        .areas(column);

    let block = panel("BudgetFlow");
    let inner = block.inner(form);
    f.render_widget(block, form);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tagline
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(1),
            Constraint::Min(1), // Hint
        ])
        .split(inner);

    let tagline = Paragraph::new(Line::from(Span::styled(
        "Plan the month, track the spending.",
        theme::dim_style(),
    )))
    .centered();
    f.render_widget(tagline, rows[0]);

    render_field(
        f,
        rows[1],
        "Email",
        &app.login_email,
        app.login_field == LoginField::Email,
    );
    let masked = "•".repeat(app.login_password.chars().count());
    render_field(
        f,
        rows[2],
        "Password",
        &masked,
        app.login_field == LoginField::Password,
    );

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(theme::ACCENT)),
        Span::styled(" switch field  ", theme::dim_style()),
        Span::styled("Enter", Style::default().fg(theme::ACCENT)),
        Span::styled(" log in  ", theme::dim_style()),
        Span::styled("Esc", Style::default().fg(theme::ACCENT)),
        Span::styled(" quit", theme::dim_style()),
    ]))
    .centered();
    f.render_widget(hint, rows[4]);
}

fn render_field(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused { theme::ACCENT } else { theme::OVERLAY };
    let cursor = if focused { "█" } else { "" };

    let field = Paragraph::new(Line::from(vec![
        Span::styled(value.to_string(), theme::normal_style()),
        Span::styled(cursor, Style::default().fg(theme::ACCENT)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(field, area);
}
