use crate::budget::{AllocationLine, BudgetSummary};
use crate::models::{BillId, FixedBill, Plan, Transaction, TxnId, TypeFilter};
use crate::session::Session;
use crate::store::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Login,
    Dashboard,
    Transactions,
    Plan,
}

impl Screen {
    /// Screens reachable from the tab bar once logged in.
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions, Self::Plan]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "Login"),
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Plan => write!(f, "Plan"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: TxnId, label: String },
    DeleteBill { id: BillId, name: String },
}

/// Which list the cursor moves on the Plan screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlanFocus {
    Bills,
    Allocations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoginField {
    Email,
    Password,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency: String,

    // Login
    pub(crate) session: Session,
    pub(crate) login_email: String,
    pub(crate) login_password: String,
    pub(crate) login_field: LoginField,

    // Budget state, recomputed together
    pub(crate) state: State,
    pub(crate) summary: BudgetSummary,
    pub(crate) saved_plan: Option<Plan>,

    // Transactions
    pub(crate) type_filter: TypeFilter,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Plan
    pub(crate) plan_focus: PlanFocus,
    pub(crate) bill_index: usize,
    pub(crate) allocation_index: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(state: State, currency: String) -> Self {
        let summary = state.summary();
        Self {
            running: true,
            screen: Screen::Login,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,
            currency,

            session: Session::default(),
            login_email: String::new(),
            login_password: String::new(),
            login_field: LoginField::Email,

            state,
            summary,
            saved_plan: None,

            type_filter: TypeFilter::All,
            transaction_index: 0,
            transaction_scroll: 0,

            plan_focus: PlanFocus::Allocations,
            bill_index: 0,
            allocation_index: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Replace the state snapshot and recompute everything derived from it.
    pub(crate) fn apply(&mut self, mutation: impl FnOnce(&State) -> State) {
        self.state = mutation(&self.state);
        self.summary = self.state.summary();
        tracing::debug!(
            variable_budget = %self.summary.variable_budget,
            remaining = %self.summary.remaining,
            status = %self.summary.status,
            "state updated"
        );
        self.clamp_cursors();
    }

    /// Ledger rows after the type filter and the category search.
    pub(crate) fn visible_transactions(&self) -> Vec<&Transaction> {
        let needle = self.search_input.to_lowercase();
        self.state
            .transactions()
            .iter()
            .filter(|t| self.type_filter.matches(t))
            .filter(|t| needle.is_empty() || t.category.to_lowercase().contains(&needle))
            .collect()
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.visible_transactions()
            .get(self.transaction_index)
            .copied()
    }

    pub(crate) fn selected_bill(&self) -> Option<&FixedBill> {
        self.state.plan().fixed_bills.get(self.bill_index)
    }

    /// Allocation under the cursor, in priority order.
    pub(crate) fn selected_line(&self) -> Option<&AllocationLine> {
        self.summary.lines.get(self.allocation_index)
    }

    /// Keep the cursor on allocation `id` after a priority change reorders
    /// the lines.
    pub(crate) fn follow_allocation(&mut self, id: &str) {
        if let Some(pos) = self.summary.lines.iter().position(|l| l.id == id) {
            self.allocation_index = pos;
        }
    }

    pub(crate) fn is_plan_saved(&self) -> bool {
        self.saved_plan.as_ref() == Some(self.state.plan())
    }

    pub(crate) fn submit_login(&mut self) {
        self.session.login(&self.login_email, &self.login_password);
        self.login_password.clear();
        self.screen = Screen::Dashboard;
        let user = self.session.user().unwrap_or("demo").to_string();
        self.set_status(format!("Welcome, {user}"));
    }

    pub(crate) fn logout(&mut self) {
        self.session.logout();
        self.screen = Screen::Login;
        self.input_mode = InputMode::Normal;
        self.login_field = LoginField::Email;
        self.pending_action = None;
        self.set_status("Logged out");
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn clamp_cursors(&mut self) {
        let txns = self.visible_transactions().len();
        let bills = self.state.plan().fixed_bills.len();
        let lines = self.summary.lines.len();

        self.transaction_index = self.transaction_index.min(txns.saturating_sub(1));
        self.transaction_scroll = self.transaction_scroll.min(self.transaction_index);
        self.bill_index = self.bill_index.min(bills.saturating_sub(1));
        self.allocation_index = self.allocation_index.min(lines.saturating_sub(1));
    }
}
