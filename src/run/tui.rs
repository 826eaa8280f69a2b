use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rust_decimal::Decimal;
use std::io;

use crate::config::Config;
use crate::store::State;
use crate::ui::app::{App, InputMode, LoginField, PendingAction, PlanFocus, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(state: State, config: &Config) -> Result<()> {
    let mut app = App::new(state, config.currency.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(month = %config.month, "terminal ui started");
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "terminal ui failed");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab bar, status bar, command bar, table borders and header
            let content_height = f.area().height.saturating_sub(7) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            handle_key(key, app)?;
        }
    }
    Ok(())
}

pub(crate) fn handle_key(key: KeyEvent, app: &mut App) -> Result<()> {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return Ok(());
    }
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    if !app.session.is_logged_in() {
        handle_login_input(key, app);
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app)?,
        InputMode::Command => handle_command_input(key, app)?,
        InputMode::Search => handle_search_input(key, app),
        InputMode::Confirm => handle_confirm_input(key, app),
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_login_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_field = match app.login_field {
                LoginField::Email => LoginField::Password,
                LoginField::Password => LoginField::Email,
            };
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Esc => app.running = false,
        KeyCode::Backspace => {
            login_field_mut(app).pop();
        }
        KeyCode::Char(c) => {
            app.status_message.clear();
            login_field_mut(app).push(c);
        }
        _ => {}
    }
}

fn login_field_mut(app: &mut App) -> &mut String {
    match app.login_field {
        LoginField::Email => &mut app.login_email,
        LoginField::Password => &mut app.login_password,
    }
}

fn handle_normal_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
            app.screen = Screen::Transactions;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, Screen::Transactions),
        KeyCode::Char('3') => switch_screen(app, Screen::Plan),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 {
                screens.len() - 1
            } else {
                idx - 1
            };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Esc => {
            app.status_message.clear();
            app.search_input.clear();
            app.clamp_cursors();
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('H') => commands::handle_command("prev-month", app)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app)?,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('D') => match app.screen {
            Screen::Transactions => commands::handle_command("delete-txn", app)?,
            Screen::Plan if app.plan_focus == PlanFocus::Bills => {
                commands::handle_command("delete-bill", app)?;
            }
            _ => {}
        },
        KeyCode::Char('f') if app.screen == Screen::Plan => {
            app.plan_focus = match app.plan_focus {
                PlanFocus::Bills => PlanFocus::Allocations,
                PlanFocus::Allocations => PlanFocus::Bills,
            };
        }
        KeyCode::Char('+') | KeyCode::Char('=') => adjust_percent(app, Decimal::ONE),
        KeyCode::Char('-') => adjust_percent(app, Decimal::NEGATIVE_ONE),
        KeyCode::Char('<') => adjust_priority(app, -1),
        KeyCode::Char('>') => adjust_priority(app, 1),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            // Live search: filter as you type
            app.transaction_index = 0;
            app.transaction_scroll = 0;
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.transaction_index = 0;
            app.transaction_scroll = 0;
        }
        _ => {}
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteTransaction { id, label } => {
                        app.apply(|s| s.delete_transaction(id));
                        app.set_status(format!("Deleted: {label}"));
                    }
                    PendingAction::DeleteBill { id, name } => {
                        app.apply(|s| s.delete_bill(id));
                        app.set_status(format!("Deleted bill: {name}"));
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    tracing::debug!(%screen, "switch screen");
    app.screen = screen;
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let len = app.visible_transactions().len();
            let page = app.visible_rows.max(1);
            scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Plan => match app.plan_focus {
            PlanFocus::Bills => {
                if app.bill_index + 1 < app.state.plan().fixed_bills.len() {
                    app.bill_index += 1;
                }
            }
            PlanFocus::Allocations => {
                if app.allocation_index + 1 < app.summary.lines.len() {
                    app.allocation_index += 1;
                }
            }
        },
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Plan => match app.plan_focus {
            PlanFocus::Bills => app.bill_index = app.bill_index.saturating_sub(1),
            PlanFocus::Allocations => {
                app.allocation_index = app.allocation_index.saturating_sub(1);
            }
        },
        _ => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Plan => match app.plan_focus {
            PlanFocus::Bills => app.bill_index = 0,
            PlanFocus::Allocations => app.allocation_index = 0,
        },
        _ => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let len = app.visible_transactions().len();
            let page = app.visible_rows.max(1);
            scroll_to_bottom(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Plan => match app.plan_focus {
            PlanFocus::Bills => {
                app.bill_index = app.state.plan().fixed_bills.len().saturating_sub(1);
            }
            PlanFocus::Allocations => {
                app.allocation_index = app.summary.lines.len().saturating_sub(1);
            }
        },
        _ => {}
    }
}

// ── Plan adjustments ─────────────────────────────────────────

fn adjust_percent(app: &mut App, delta: Decimal) {
    if app.screen != Screen::Plan || app.plan_focus != PlanFocus::Allocations {
        return;
    }
    let Some(line) = app.selected_line() else {
        return;
    };
    let (id, name, percent) = (line.id.clone(), line.name.clone(), line.percent + delta);

    app.apply(|s| s.update_allocation_percent(&id, percent));
    let stored = app
        .selected_line()
        .map(|l| l.percent)
        .unwrap_or_default();
    let msg = format!(
        "{name}: {}% (total {}%)",
        stored.normalize(),
        app.summary.allocation_sum.normalize()
    );
    app.set_status(msg);
}

fn adjust_priority(app: &mut App, delta: i64) {
    if app.screen != Screen::Plan || app.plan_focus != PlanFocus::Allocations {
        return;
    }
    let Some(line) = app.selected_line() else {
        return;
    };
    let id = line.id.clone();
    let priority = crate::input::clamp_priority(i64::from(line.priority) + delta);

    app.apply(|s| s.update_allocation_priority(&id, priority));
    app.follow_allocation(&id);
    if let Some(line) = app.selected_line() {
        let msg = format!("{}: priority {}", line.name, line.priority);
        app.set_status(msg);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;
    use crate::store::demo_state;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_key(key(KeyCode::Char(c)), app).unwrap();
        }
    }

    fn logged_in() -> App {
        let mut app = App::new(demo_state("2026-02").unwrap(), "€".to_string());
        handle_key(key(KeyCode::Enter), &mut app).unwrap();
        app
    }

    #[test]
    fn test_login_flow() {
        let mut app = App::new(demo_state("2026-02").unwrap(), "€".to_string());
        type_str(&mut app, "ana@example.com");
        handle_key(key(KeyCode::Tab), &mut app).unwrap();
        type_str(&mut app, "secret");
        assert_eq!(app.login_password, "secret");
        handle_key(key(KeyCode::Enter), &mut app).unwrap();

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.session.user(), Some("ana@example.com"));
        assert!(app.login_password.is_empty());
    }

    #[test]
    fn test_digits_switch_tabs_after_login() {
        let mut app = logged_in();
        handle_key(key(KeyCode::Char('3')), &mut app).unwrap();
        assert_eq!(app.screen, Screen::Plan);
        handle_key(key(KeyCode::Tab), &mut app).unwrap();
        assert_eq!(app.screen, Screen::Dashboard);
        handle_key(key(KeyCode::BackTab), &mut app).unwrap();
        assert_eq!(app.screen, Screen::Plan);
    }

    #[test]
    fn test_command_mode_runs_command() {
        let mut app = logged_in();
        type_str(&mut app, ":income 3000");
        assert_eq!(app.input_mode, InputMode::Command);
        handle_key(key(KeyCode::Enter), &mut app).unwrap();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.state.plan().income, dec!(3000));
    }

    #[test]
    fn test_delete_transaction_with_confirmation() {
        let mut app = logged_in();
        handle_key(key(KeyCode::Char('2')), &mut app).unwrap();
        let before = app.state.transactions().len();

        handle_key(key(KeyCode::Char('D')), &mut app).unwrap();
        assert_eq!(app.input_mode, InputMode::Confirm);
        handle_key(key(KeyCode::Char('n')), &mut app).unwrap();
        assert_eq!(app.state.transactions().len(), before);

        handle_key(key(KeyCode::Char('D')), &mut app).unwrap();
        handle_key(key(KeyCode::Char('y')), &mut app).unwrap();
        assert_eq!(app.state.transactions().len(), before - 1);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_live_search_filters_ledger() {
        let mut app = logged_in();
        type_str(&mut app, "/cour");
        assert_eq!(app.screen, Screen::Transactions);
        assert_eq!(app.visible_transactions().len(), 1);
        handle_key(key(KeyCode::Esc), &mut app).unwrap();
        assert_eq!(app.visible_transactions().len(), 6);
    }

    #[test]
    fn test_plan_percent_and_priority_keys() {
        let mut app = logged_in();
        handle_key(key(KeyCode::Char('3')), &mut app).unwrap();
        // First line is Courses (priority 1, 45%).
        handle_key(key(KeyCode::Char('+')), &mut app).unwrap();
        assert_eq!(app.summary.lines[0].percent, dec!(46));
        assert!(!app.summary.can_save());

        handle_key(key(KeyCode::Char('>')), &mut app).unwrap();
        handle_key(key(KeyCode::Char('>')), &mut app).unwrap();
        let line = app.selected_line().unwrap();
        assert_eq!(line.name, "Courses");
        assert_eq!(line.priority, 3);
    }

    #[test]
    fn test_plan_focus_toggle_and_delete_bill() {
        let mut app = logged_in();
        handle_key(key(KeyCode::Char('3')), &mut app).unwrap();
        handle_key(key(KeyCode::Char('f')), &mut app).unwrap();
        assert_eq!(app.plan_focus, PlanFocus::Bills);

        handle_key(key(KeyCode::Char('j')), &mut app).unwrap();
        handle_key(key(KeyCode::Char('D')), &mut app).unwrap();
        handle_key(key(KeyCode::Char('y')), &mut app).unwrap();

        let names: Vec<&str> = app
            .state
            .plan()
            .fixed_bills
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["Loyer", "Téléphone"]);
        assert_eq!(app.summary.fixed_total, dec!(765));
    }

    #[test]
    fn test_month_keys() {
        let mut app = logged_in();
        handle_key(key(KeyCode::Char('L')), &mut app).unwrap();
        assert_eq!(app.state.plan().month, "2026-03");
        handle_key(key(KeyCode::Char('H')), &mut app).unwrap();
        handle_key(key(KeyCode::Char('H')), &mut app).unwrap();
        assert_eq!(app.state.plan().month, "2026-01");
    }

    #[test]
    fn test_help_closes_on_any_key_and_ctrl_q_quits() {
        let mut app = logged_in();
        handle_key(key(KeyCode::Char('?')), &mut app).unwrap();
        assert!(app.show_help);
        handle_key(key(KeyCode::Char('x')), &mut app).unwrap();
        assert!(!app.show_help);

        handle_key(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            &mut app,
        )
        .unwrap();
        assert!(!app.running);
    }
}
