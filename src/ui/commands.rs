use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Months;

use super::app::{App, InputMode, PendingAction, PlanFocus, Screen};
use super::util::format_amount;
use crate::input::{self, NewBill, NewTransaction};
use crate::models::TypeFilter;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit BudgetFlow", cmd_quit, r);
    register_command!("quit", "Quit BudgetFlow", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("p", "Go to Plan", cmd_plan, r);
    register_command!("plan", "Go to Plan", cmd_plan, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("i", "Set monthly income (e.g. :income 2400)", cmd_income, r);
    register_command!("income", "Set monthly income (e.g. :income 2400)", cmd_income, r);
    register_command!("sv", "Set savings percent (e.g. :saving 15)", cmd_saving, r);
    register_command!("saving", "Set savings percent (e.g. :saving 15)", cmd_saving, r);
    register_command!("b", "Add fixed bill (e.g. :bill Internet 30)", cmd_bill, r);
    register_command!("bill", "Add fixed bill (e.g. :bill Internet 30)", cmd_bill, r);
    register_command!(
        "bill-amount",
        "Change selected bill amount (e.g. :bill-amount 40)",
        cmd_bill_amount,
        r
    );
    register_command!("delete-bill", "Delete selected bill", cmd_delete_bill, r);
    register_command!(
        "pct",
        "Set allocation percent (e.g. :percent Courses 40)",
        cmd_percent,
        r
    );
    register_command!(
        "percent",
        "Set allocation percent (e.g. :percent Courses 40)",
        cmd_percent,
        r
    );
    register_command!(
        "priority",
        "Set allocation priority 1-10 (e.g. :priority Courses 2)",
        cmd_priority,
        r
    );
    register_command!(
        "a",
        "Add transaction (e.g. :add-txn 2026-02-12 expense 19.90 Courses)",
        cmd_add_txn,
        r
    );
    register_command!(
        "add-txn",
        "Add transaction (e.g. :add-txn 2026-02-12 expense 19.90 Courses)",
        cmd_add_txn,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "f",
        "Filter transactions (all, income, expense)",
        cmd_filter,
        r
    );
    register_command!(
        "filter",
        "Filter transactions (all, income, expense)",
        cmd_filter,
        r
    );
    register_command!("s", "Search categories (e.g. :search courses)", cmd_search, r);
    register_command!(
        "search",
        "Search categories (e.g. :search courses)",
        cmd_search,
        r
    );
    register_command!("m", "Set plan month (e.g. :month 2026-03)", cmd_month, r);
    register_command!("month", "Set plan month (e.g. :month 2026-03)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("w", "Save plan (allocations must total 100%)", cmd_save, r);
    register_command!("save", "Save plan (allocations must total 100%)", cmd_save, r);
    register_command!("logout", "Log out", cmd_logout, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, args, "running command");
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `"<name...> <value>"` on the last space.
fn split_last(args: &str) -> Option<(&str, &str)> {
    let mut parts = args.rsplitn(2, ' ');
    let value = parts.next()?;
    let name = parts.next()?.trim();
    Some((name, value))
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_plan(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Plan;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_logout(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.logout();
    Ok(())
}

// ── Plan ─────────────────────────────────────────────────────

fn cmd_income(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :income <amount>");
        return Ok(());
    }
    let income = input::parse_income(args);
    app.apply(|s| s.update_income(income));
    let msg = format!("Income: {}", format_amount(income, &app.currency));
    app.set_status(msg);
    Ok(())
}

fn cmd_saving(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :saving <percent 0-100>");
        return Ok(());
    }
    let percent = input::parse_percent(args);
    app.apply(|s| s.update_saving_percent(percent));
    let msg = format!(
        "Saving {percent}% = {}",
        format_amount(app.summary.saving_amount, &app.currency)
    );
    app.set_status(msg);
    Ok(())
}

fn cmd_bill(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some((name, amount)) = split_last(args) else {
        app.set_status("Usage: :bill <name> <amount>");
        return Ok(());
    };

    match NewBill::parse(name, amount) {
        Ok(bill) => {
            let msg = format!(
                "Added bill: {} {}",
                bill.name,
                format_amount(bill.amount, &app.currency)
            );
            app.apply(|s| s.add_bill(bill));
            app.bill_index = app.state.plan().fixed_bills.len().saturating_sub(1);
            app.plan_focus = PlanFocus::Bills;
            app.set_status(msg);
        }
        Err(e) => app.set_status(format!("Bill not added: {e}")),
    }
    Ok(())
}

fn cmd_bill_amount(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :bill-amount [name] <amount>");
        return Ok(());
    }

    let (bill, raw) = match split_last(args) {
        Some((name, raw)) => (
            app.state
                .plan()
                .fixed_bills
                .iter()
                .find(|b| b.name == name)
                .cloned(),
            raw,
        ),
        None if input::is_number(args) => (app.selected_bill().cloned(), args),
        None => {
            app.set_status("Usage: :bill-amount [name] <amount>");
            return Ok(());
        }
    };

    let Some(bill) = bill else {
        app.set_status("No such bill");
        return Ok(());
    };

    let amount = input::parse_bill_amount(raw);
    app.apply(|s| s.update_bill_amount(bill.id, amount));
    let stored = app
        .state
        .plan()
        .find_bill(bill.id)
        .map(|b| b.amount)
        .unwrap_or_default();
    let msg = format!("{}: {}", bill.name, format_amount(stored, &app.currency));
    app.set_status(msg);
    Ok(())
}

fn cmd_delete_bill(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.screen != Screen::Plan {
        app.set_status("Navigate to Plan and select a bill first");
        return Ok(());
    }

    let Some(bill) = app.selected_bill() else {
        app.set_status("No bills to delete");
        return Ok(());
    };

    let (id, name) = (bill.id, bill.name.clone());
    app.confirm_message = format!("Delete bill '{name}'?");
    app.pending_action = Some(PendingAction::DeleteBill { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

/// Which allocation a `"[allocation name] <value>"` argument refers to.
enum Target<'a> {
    Found(String, String, &'a str),
    Unknown,
    /// A lone token that is not a value, e.g. a name with the value missing.
    MissingValue,
}

/// Resolve `"[allocation name] <value>"`, falling back to the allocation
/// under the cursor when only a number is given.
fn target_allocation<'a>(args: &'a str, app: &App) -> Target<'a> {
    let found = match split_last(args) {
        Some((name, raw)) => app
            .state
            .plan()
            .find_allocation(name)
            .map(|a| (a.id.clone(), a.name.clone(), raw)),
        None if input::is_number(args) => app
            .selected_line()
            .map(|l| (l.id.clone(), l.name.clone(), args)),
        None => return Target::MissingValue,
    };
    match found {
        Some((id, name, raw)) => Target::Found(id, name, raw),
        None => Target::Unknown,
    }
}

fn cmd_percent(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :percent [allocation] <percent 0-100>");
        return Ok(());
    }
    let (id, name, raw) = match target_allocation(args, app) {
        Target::Found(id, name, raw) => (id, name, raw),
        Target::Unknown => {
            app.set_status("No such allocation");
            return Ok(());
        }
        Target::MissingValue => {
            app.set_status("Usage: :percent [allocation] <percent 0-100>");
            return Ok(());
        }
    };

    let percent = input::parse_percent(raw);
    app.apply(|s| s.update_allocation_percent(&id, percent));
    let msg = format!(
        "{name}: {percent}% (total {}%)",
        app.summary.allocation_sum.normalize()
    );
    app.set_status(msg);
    Ok(())
}

fn cmd_priority(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :priority [allocation] <1-10>");
        return Ok(());
    }
    let (id, name, raw) = match target_allocation(args, app) {
        Target::Found(id, name, raw) => (id, name, raw),
        Target::Unknown => {
            app.set_status("No such allocation");
            return Ok(());
        }
        Target::MissingValue => {
            app.set_status("Usage: :priority [allocation] <1-10>");
            return Ok(());
        }
    };

    let priority = input::parse_priority(raw);
    app.apply(|s| s.update_allocation_priority(&id, priority));
    app.follow_allocation(&id);
    app.set_status(format!("{name}: priority {priority}"));
    Ok(())
}

fn cmd_save(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if !app.summary.can_save() {
        app.set_status(format!(
            "Cannot save: allocations total {}%, they must total 100%",
            app.summary.allocation_sum.normalize()
        ));
        return Ok(());
    }

    app.saved_plan = Some(app.state.plan().clone());
    tracing::info!(month = %app.state.plan().month, "plan saved");
    let msg = format!("Plan for {} saved (in memory)", app.state.plan().month);
    app.set_status(msg);
    Ok(())
}

fn cmd_month(args: &str, app: &mut App) -> anyhow::Result<()> {
    match input::parse_month(args) {
        Ok(first_day) => {
            app.apply(|s| s.set_month(first_day));
            let msg = format!("Month: {}", app.state.plan().month);
            app.set_status(msg);
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    advance_month(app, 1)
}

fn cmd_prev_month(_args: &str, app: &mut App) -> anyhow::Result<()> {
    advance_month(app, -1)
}

fn advance_month(app: &mut App, delta: i32) -> anyhow::Result<()> {
    let Ok(date) = input::parse_month(&app.state.plan().month) else {
        return Ok(());
    };
    let new_date = if delta > 0 {
        date.checked_add_months(Months::new(1))
    } else {
        date.checked_sub_months(Months::new(1))
    };

    if let Some(d) = new_date {
        app.apply(|s| s.set_month(d));
        let msg = format!("Month: {}", app.state.plan().month);
        app.set_status(msg);
    }
    Ok(())
}

// ── Transactions ─────────────────────────────────────────────

fn cmd_add_txn(args: &str, app: &mut App) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.splitn(4, ' ').collect();
    if parts.len() < 4 {
        app.set_status(
            "Usage: :add-txn <YYYY-MM-DD> <income|expense> <amount> <category>",
        );
        return Ok(());
    }

    match NewTransaction::parse(parts[0], parts[1], parts[2], parts[3]) {
        Ok(txn) => {
            let msg = format!(
                "Added {}: {} {}",
                txn.txn_type.as_str(),
                txn.category,
                format_amount(txn.amount, &app.currency)
            );
            app.apply(|s| s.add_transaction(txn));
            let new_id = app.state.last_id();
            if let Some(pos) = app
                .visible_transactions()
                .iter()
                .position(|t| t.id.0 == new_id)
            {
                app.transaction_index = pos;
            }
            app.set_status(msg);
        }
        Err(e) => app.set_status(format!("Transaction not added: {e}")),
    }
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    let Some(txn) = app.selected_transaction() else {
        app.set_status("No transactions to delete");
        return Ok(());
    };

    let id = txn.id;
    let label = format!(
        "{} {} {}",
        txn.date,
        txn.category,
        format_amount(txn.amount, &app.currency)
    );
    app.confirm_message = format!("Delete '{label}'?");
    app.pending_action = Some(PendingAction::DeleteTransaction { id, label });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(filter) = TypeFilter::parse(args) else {
        app.set_status("Usage: :filter all|income|expense");
        return Ok(());
    };
    app.type_filter = filter;
    app.screen = Screen::Transactions;
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    app.set_status(format!("Showing: {filter}"));
    Ok(())
}

fn cmd_search(args: &str, app: &mut App) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Transactions;
    app.transaction_index = 0;
    app.transaction_scroll = 0;

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }
    Ok(())
}
