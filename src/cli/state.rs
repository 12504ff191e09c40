use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use tracing::{info, warn};

use crate::calc::format::{is_oversized, iso, parse_date, parse_money};
use crate::calc::goal::{validate_progress, GoalForm, ProgressUpdate};
use crate::cli::input::{Form, FormKey, LineEdit};
use crate::database::db::LocalStorage;
use crate::database::models::{CategoryUpdate, GoalCategory, ProgressKind};
use crate::error::FieldErrors;
use crate::latency::Latency;
use crate::pages::expenses::{CategoryForm, ExpenseSort, ExpenseTab, TemplateForm};
use crate::pages::goals::GoalSort;
use crate::pages::login::LoginField;
use crate::pages::registration::RegistrationField;
use crate::pages::timeline::{AmountRange, StoryTheme, TimeRange, TimelineView, CATEGORY_OPTIONS};
use crate::pages::{Mounted, QuickExpenseForm};
use crate::router::{self, Navigator, NAV_ITEMS};

// Goal modal field order.
const G_TITLE: usize = 0;
const G_DESCRIPTION: usize = 1;
const G_TARGET: usize = 2;
const G_CURRENT: usize = 3;
const G_DATE: usize = 4;
const G_CATEGORY: usize = 5;
const G_ICON: usize = 6;
const G_MOTIVATION: usize = 7;
const G_MONTHLY: usize = 8;

/// Overlay that captures every key until submitted or cancelled.
#[derive(Debug, Clone)]
pub enum Modal {
    GoTo(Form),
    QuickExpense(Form),
    Goal { form: Form, editing: Option<i64> },
    Progress { form: Form, goal_id: i64 },
    Category { form: Form, editing: Option<String> },
    NewEntryCategory(Form),
    BulkCategory(Form),
    Template(Form),
    Receipt(Form),
}

impl Modal {
    pub fn form(&self) -> &Form {
        match self {
            Modal::GoTo(f)
            | Modal::QuickExpense(f)
            | Modal::NewEntryCategory(f)
            | Modal::BulkCategory(f)
            | Modal::Template(f)
            | Modal::Receipt(f) => f,
            Modal::Goal { form, .. } | Modal::Progress { form, .. } | Modal::Category { form, .. } => form,
        }
    }

    fn form_mut(&mut self) -> &mut Form {
        match self {
            Modal::GoTo(f)
            | Modal::QuickExpense(f)
            | Modal::NewEntryCategory(f)
            | Modal::BulkCategory(f)
            | Modal::Template(f)
            | Modal::Receipt(f) => f,
            Modal::Goal { form, .. } | Modal::Progress { form, .. } | Modal::Category { form, .. } => form,
        }
    }
}

/// Work started by a key press and finished on the next tick, once the busy
/// frame has been drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Login,
    Register,
    SubmitExpense,
    ScanReceipt,
    DeleteGoal(i64),
    /// Submit of the open modal.
    Modal,
}

pub struct App {
    pub storage: LocalStorage,
    pub latency: Latency,
    pub nav: Navigator,
    pub page: Mounted,
    pub status: String,
    pub quit: bool,
    pub modal: Option<Modal>,
    /// Cursor in the page's main list.
    pub list: ListState,
    /// Focused field on login, registration and the expense entry form.
    pub focus: usize,
    /// Expense entry form is capturing keystrokes.
    pub editing: bool,
    pub chapter: usize,
    quick: QuickExpenseForm,
    pending: Option<Pending>,
}

impl App {
    /// Mounts `initial`, following the login redirect if already signed in.
    pub async fn start(storage: LocalStorage, latency: Latency, initial: &str) -> Self {
        let now = Utc::now();
        let mut app = Self {
            storage,
            latency,
            nav: Navigator::new(initial),
            page: Mounted::mount(router::resolve(initial), initial, now),
            status: String::new(),
            quit: false,
            modal: None,
            list: ListState::default(),
            focus: 0,
            editing: false,
            chapter: 0,
            quick: QuickExpenseForm::new(now.date_naive()),
            pending: None,
        };
        app.enter().await;
        app
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    pub async fn go(&mut self, path: &str) {
        self.nav.navigate(path);
        self.enter().await;
    }

    pub async fn back(&mut self) {
        if self.nav.back().is_some() {
            self.enter().await;
        }
    }

    /// Mounts the page for the current path. A login page that finds a
    /// stored session navigates on to the dashboard.
    async fn enter(&mut self) {
        loop {
            let page = self.nav.page();
            self.page = Mounted::mount(page, self.nav.path(), self.now());
            self.modal = None;
            self.focus = 0;
            self.editing = false;
            self.chapter = 0;
            self.list = ListState::default();
            self.list.select(Some(0));

            let redirect = match &self.page {
                Mounted::Login(p) => match p.on_mount(&self.storage).await {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(error = %e, "session check failed");
                        None
                    }
                },
                _ => None,
            };
            match redirect {
                Some(to) => {
                    self.nav.navigate(to);
                }
                None => break,
            }
        }
        info!(path = %self.nav.path(), page = ?self.page.page(), "page mounted");
    }

    /// A submit or load is waiting or running.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some() || self.page.is_busy()
    }

    /// The open modal has been submitted and is waiting for its result.
    pub fn is_saving_modal(&self) -> bool {
        self.pending == Some(Pending::Modal)
    }

    /// Work that must happen after a frame is drawn, so the loading state
    /// is visible first.
    pub async fn tick(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.finish(pending).await;
            return;
        }
        let now = self.now();
        if let Mounted::Dashboard(p) = &mut self.page {
            if p.is_loading {
                p.load(&self.latency, now).await;
            }
        }
    }

    async fn finish(&mut self, pending: Pending) {
        let now = self.now();
        if pending == Pending::Modal {
            if let Some(modal) = self.modal.take() {
                self.submit_modal(modal).await;
            }
            return;
        }
        let route = match (pending, &mut self.page) {
            (Pending::Login, Mounted::Login(p)) => p.complete_submit(&self.storage, &self.latency).await,
            (Pending::Register, Mounted::Registration(p)) => p.complete_submit(&self.latency).await,
            (Pending::SubmitExpense, Mounted::Expenses(p)) => {
                if let Some(id) = p.complete_submit_expense(&self.latency, now).await {
                    self.status = format!("Expense #{id} added to your story");
                }
                None
            }
            (Pending::ScanReceipt, Mounted::Expenses(p)) => {
                p.finish_scan(&self.latency, now.date_naive()).await;
                None
            }
            (Pending::DeleteGoal(id), Mounted::Goals(p)) => {
                if p.delete_goal(id, &self.latency).await {
                    self.status = "Goal deleted".into();
                }
                None
            }
            (pending, page) => {
                warn!(?pending, page = ?page.page(), "pending work dropped after page change");
                None
            }
        };
        if let Some(route) = route {
            self.go(route).await;
        }
        self.clamp_list();
    }

    fn list_len(&self) -> usize {
        match &self.page {
            Mounted::Dashboard(p) => p.alerts.len(),
            Mounted::Timeline(p) => p.filtered_events().len(),
            Mounted::Goals(p) => p.visible_goals().len(),
            Mounted::Expenses(p) => match p.tab {
                ExpenseTab::List => p.visible_expenses().len(),
                ExpenseTab::Categories => p.categories.len(),
                ExpenseTab::Templates => p.templates().count(),
                ExpenseTab::Entry | ExpenseTab::Receipt => 0,
            },
            _ => 0,
        }
    }

    fn move_list(&mut self, delta: isize) {
        let n = self.list_len();
        if n == 0 {
            self.list.select(None);
            return;
        }
        let cur = self.list.selected().unwrap_or(0) as isize;
        let next = (cur + delta).rem_euclid(n as isize) as usize;
        self.list.select(Some(next));
    }

    /// Keeps the cursor inside the list after it shrank.
    fn clamp_list(&mut self) {
        let n = self.list_len();
        match (n, self.list.selected()) {
            (0, _) => self.list.select(None),
            (n, Some(i)) if i >= n => self.list.select(Some(n - 1)),
            (_, None) => self.list.select(Some(0)),
            _ => {}
        }
    }

    fn selected(&self) -> usize {
        self.list.selected().unwrap_or(0)
    }

    pub async fn handle_key(&mut self, k: KeyEvent) -> anyhow::Result<()> {
        if k.kind != KeyEventKind::Press {
            return Ok(());
        }
        if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
            self.quit = true;
            return Ok(());
        }

        if self.pending.is_some() {
            return Ok(());
        }

        if let Some(modal) = self.modal.take() {
            self.handle_modal(modal, k).await;
            return Ok(());
        }

        match self.page.page() {
            router::Page::Login => {
                self.handle_login(k).await;
                return Ok(());
            }
            router::Page::Registration => {
                self.handle_registration(k).await;
                return Ok(());
            }
            _ => {}
        }

        if self.editing {
            self.handle_entry_edit(k);
            return Ok(());
        }

        let has_header = self.page.page().has_header();
        match k.code {
            KeyCode::Char('q') => {
                self.quit = true;
                return Ok(());
            }
            KeyCode::Char('g') => {
                self.modal = Some(Modal::GoTo(Form::new("Go to path", &[("Path", "/")])));
                return Ok(());
            }
            KeyCode::Char('b') => {
                self.back().await;
                return Ok(());
            }
            KeyCode::Char(c @ '1'..='4') if has_header => {
                let idx = c as usize - '1' as usize;
                self.go(NAV_ITEMS[idx].path).await;
                return Ok(());
            }
            KeyCode::Char('L') if has_header => {
                self.logout().await;
                return Ok(());
            }
            KeyCode::Char('a') if has_header => {
                self.open_quick_expense();
                return Ok(());
            }
            KeyCode::Up => {
                self.move_list(-1);
                return Ok(());
            }
            KeyCode::Down => {
                self.move_list(1);
                return Ok(());
            }
            _ => {}
        }

        let route = match self.page.page() {
            router::Page::Dashboard => self.handle_dashboard(k),
            router::Page::FinancialStoryTimeline => {
                self.handle_timeline(k);
                None
            }
            router::Page::GoalSettingAndPlanning => {
                self.handle_goals(k);
                None
            }
            router::Page::ExpenseEntryAndManagement => {
                self.handle_expenses(k);
                None
            }
            router::Page::NotFound => match (&self.page, k.code) {
                (Mounted::NotFound(p), KeyCode::Enter | KeyCode::Char('h')) => Some(p.home()),
                _ => None,
            },
            router::Page::Login | router::Page::Registration => None,
        };
        if let Some(route) = route {
            self.go(route).await;
        }
        self.clamp_list();
        Ok(())
    }

    async fn logout(&mut self) {
        let route = match &mut self.page {
            Mounted::Dashboard(p) => p.logout(),
            Mounted::Timeline(p) => p.logout(),
            Mounted::Goals(p) => p.logout(),
            Mounted::Expenses(p) => p.logout(),
            _ => return,
        };
        self.status = "Signed out".into();
        self.go(route).await;
    }

    // ============= Login / registration =============

    async fn handle_login(&mut self, k: KeyEvent) {
        let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
        let Mounted::Login(p) = &mut self.page else { return };
        let route = match k.code {
            KeyCode::Esc => {
                self.quit = true;
                None
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                self.focus = 1 - self.focus.min(1);
                None
            }
            KeyCode::Enter => {
                if p.begin_submit() {
                    self.pending = Some(Pending::Login);
                }
                None
            }
            KeyCode::Char('r') if ctrl => {
                p.toggle_remember_me();
                None
            }
            KeyCode::Char('f') if ctrl => {
                p.forgot_password();
                None
            }
            KeyCode::Char('n') if ctrl => Some(router::REGISTRATION),
            _ => {
                let (field, current) = match self.focus {
                    0 => (LoginField::Email, p.form.email.as_str()),
                    _ => (LoginField::Password, p.form.password.as_str()),
                };
                if let Some(value) = edit_value(current, &k) {
                    p.set_field(field, value);
                }
                None
            }
        };
        if let Some(route) = route {
            self.go(route).await;
        }
    }

    async fn handle_registration(&mut self, k: KeyEvent) {
        const FIELDS: [RegistrationField; 4] = [
            RegistrationField::FullName,
            RegistrationField::Email,
            RegistrationField::Password,
            RegistrationField::ConfirmPassword,
        ];
        let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
        let Mounted::Registration(p) = &mut self.page else { return };
        let route = match k.code {
            KeyCode::Esc => {
                self.quit = true;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELDS.len();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
                None
            }
            KeyCode::Enter => {
                if p.begin_submit() {
                    self.pending = Some(Pending::Register);
                }
                None
            }
            KeyCode::Char('t') if ctrl => {
                p.toggle_terms();
                None
            }
            KeyCode::Char('p') if ctrl => {
                p.toggle_privacy();
                None
            }
            KeyCode::Char('l') if ctrl => Some(router::LOGIN),
            _ => {
                let field = FIELDS[self.focus.min(FIELDS.len() - 1)];
                let current = match field {
                    RegistrationField::FullName => &p.form.full_name,
                    RegistrationField::Email => &p.form.email,
                    RegistrationField::Password => &p.form.password,
                    RegistrationField::ConfirmPassword => &p.form.confirm_password,
                };
                if let Some(value) = edit_value(current, &k) {
                    p.set_field(field, value);
                }
                None
            }
        };
        if let Some(route) = route {
            self.go(route).await;
        }
    }

    // ============= Dashboard =============

    fn handle_dashboard(&mut self, k: KeyEvent) -> Option<&'static str> {
        let idx = self.selected();
        let Mounted::Dashboard(p) = &mut self.page else { return None };
        match k.code {
            KeyCode::Enter => {
                let alert = p.alerts.get(idx)?;
                let action = alert.actions.iter().find(|a| a.primary).or(alert.actions.first())?;
                let route = p.alert_action(alert.id, &action.label);
                if route.is_none() {
                    self.status = format!("{}: noted", action.label);
                }
                route
            }
            KeyCode::Char('x') => {
                let id = p.alerts.get(idx)?.id;
                p.dismiss_alert(id);
                None
            }
            KeyCode::Left => {
                self.chapter = self.chapter.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.chapter = (self.chapter + 1).min(p.chapters.len().saturating_sub(1));
                None
            }
            KeyCode::Char('c') => {
                let chapter = p.chapters.get(self.chapter)?;
                Some(p.chapter_details(chapter))
            }
            _ => None,
        }
    }

    // ============= Timeline =============

    fn handle_timeline(&mut self, k: KeyEvent) {
        let idx = self.selected();
        let Mounted::Timeline(p) = &mut self.page else { return };
        match k.code {
            KeyCode::Enter => {
                if let Some(id) = p.filtered_events().get(idx).map(|e| e.id) {
                    p.toggle_event(id);
                }
            }
            KeyCode::Left | KeyCode::Right if !p.chapters.is_empty() => {
                let n = p.chapters.len();
                let cur = p.chapters.iter().position(|c| c.id == p.active_chapter).unwrap_or(0);
                let next = if k.code == KeyCode::Left { (cur + n - 1) % n } else { (cur + 1) % n };
                let id = p.chapters[next].id.clone();
                p.select_chapter(&id);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => p.zoom_in(),
            KeyCode::Char('-') => p.zoom_out(),
            KeyCode::Char('v') => {
                let order = TimelineView::ZOOM_ORDER;
                let i = order.iter().position(|v| *v == p.view).unwrap_or(0);
                p.set_view(order[(i + 1) % order.len()]);
            }
            KeyCode::Char('f') => {
                let i = CATEGORY_OPTIONS
                    .iter()
                    .position(|(id, _)| id.map(str::to_string) == p.filters.category)
                    .unwrap_or(0);
                let (next, _) = CATEGORY_OPTIONS[(i + 1) % CATEGORY_OPTIONS.len()];
                p.filters.category = next.map(str::to_string);
            }
            KeyCode::Char('t') => {
                let i = StoryTheme::ALL.iter().position(|t| *t == p.filters.story_theme).unwrap_or(0);
                p.filters.story_theme = StoryTheme::ALL[(i + 1) % StoryTheme::ALL.len()];
            }
            KeyCode::Char('r') => {
                let i = TimeRange::ALL.iter().position(|t| *t == p.filters.time_range).unwrap_or(0);
                p.filters.time_range = TimeRange::ALL[(i + 1) % TimeRange::ALL.len()];
            }
            KeyCode::Char('s') => {
                let next = match p.filters.amount_range {
                    AmountRange::All => AmountRange::Small,
                    AmountRange::Small => AmountRange::Medium,
                    AmountRange::Medium => AmountRange::Large,
                    AmountRange::Large => AmountRange::Large,
                };
                p.filters.toggle_amount(next);
            }
            KeyCode::Char('m') => p.filters.show_milestones = !p.filters.show_milestones,
            KeyCode::Char('x') => p.clear_filters(),
            KeyCode::Char('e') => {
                p.export();
                if let Some(notice) = &p.notice {
                    self.status = notice.clone();
                }
            }
            _ => {}
        }
    }

    // ============= Goals =============

    fn handle_goals(&mut self, k: KeyEvent) {
        let idx = self.selected();
        let today = self.now().date_naive();
        let Mounted::Goals(p) = &mut self.page else { return };
        let selected = p.visible_goals().get(idx).map(|g| g.id);
        match k.code {
            KeyCode::Char('n') => {
                self.modal = Some(Modal::Goal { form: goal_modal("New Goal", &GoalForm::blank()), editing: None });
            }
            KeyCode::Char('e') => {
                if let Some(goal) = selected.and_then(|id| p.goal(id)) {
                    let mut form = GoalForm::from_goal(goal);
                    form.recalculate_monthly_target(today);
                    self.modal = Some(Modal::Goal { form: goal_modal("Edit Goal", &form), editing: Some(goal.id) });
                }
            }
            KeyCode::Char('p') => {
                if let Some(goal_id) = selected {
                    let form = Form::new(
                        "Update Progress",
                        &[("Amount", ""), ("Type (add/subtract/set)", "add"), ("Note", ""), ("Date", iso(&today).as_str())],
                    );
                    self.modal = Some(Modal::Progress { form, goal_id });
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = selected {
                    self.pending = Some(Pending::DeleteGoal(id));
                }
            }
            KeyCode::Char('f') => {
                p.selected_category = match p.selected_category {
                    None => Some(GoalCategory::ALL[0]),
                    Some(c) => {
                        let i = GoalCategory::ALL.iter().position(|x| *x == c).unwrap_or(0);
                        GoalCategory::ALL.get(i + 1).copied()
                    }
                };
            }
            KeyCode::Char('o') => {
                let i = GoalSort::ALL.iter().position(|s| *s == p.sort_by).unwrap_or(0);
                p.sort_by = GoalSort::ALL[(i + 1) % GoalSort::ALL.len()];
            }
            _ => {}
        }
    }

    // ============= Expenses =============

    fn handle_expenses(&mut self, k: KeyEvent) {
        let idx = self.selected();
        let now = self.now();
        let Mounted::Expenses(p) = &mut self.page else { return };

        match k.code {
            KeyCode::Tab | KeyCode::BackTab => {
                let tabs = ExpenseTab::ALL;
                let i = tabs.iter().position(|t| *t == p.tab).unwrap_or(0);
                let n = tabs.len();
                p.tab = if k.code == KeyCode::Tab { tabs[(i + 1) % n] } else { tabs[(i + n - 1) % n] };
                self.list.select(Some(0));
                return;
            }
            _ => {}
        }

        match p.tab {
            ExpenseTab::Entry => match k.code {
                KeyCode::Char('i') | KeyCode::Enter => self.editing = true,
                KeyCode::Left | KeyCode::Right if self.focus == ENTRY_CATEGORY => {
                    cycle_entry_category(p, k.code == KeyCode::Right)
                }
                KeyCode::Char('j') => self.focus = (self.focus + 1) % entry_field_count(p.form.show_advanced),
                KeyCode::Char('k') => {
                    let n = entry_field_count(p.form.show_advanced);
                    self.focus = (self.focus + n - 1) % n;
                }
                KeyCode::Char('r') => p.form.is_recurring = !p.form.is_recurring,
                KeyCode::Char('v') => {
                    p.form.show_advanced = !p.form.show_advanced;
                    self.focus = self.focus.min(entry_field_count(p.form.show_advanced) - 1);
                }
                KeyCode::Char('n') => {
                    self.modal = Some(Modal::NewEntryCategory(Form::new("New Category", &[("Name", "")])));
                }
                KeyCode::Char('c') => p.reset_form(now.date_naive()),
                KeyCode::Char('s') => {
                    if p.begin_submit_expense() {
                        self.pending = Some(Pending::SubmitExpense);
                    } else if is_oversized(&p.form.amount) {
                        self.status = "Amount is too large".into();
                    } else {
                        self.status = "Amount, description and category are required".into();
                    }
                }
                _ => {}
            },
            ExpenseTab::List => {
                let selected = p.visible_expenses().get(idx).map(|e| e.id);
                match k.code {
                    KeyCode::Char(' ') => {
                        if let Some(id) = selected {
                            p.toggle_selected(id);
                        }
                    }
                    KeyCode::Char('A') => p.toggle_select_all(),
                    KeyCode::Char('f') => {
                        let ids: Vec<Option<String>> =
                            std::iter::once(None).chain(p.categories.iter().map(|c| Some(c.id.clone()))).collect();
                        let i = ids.iter().position(|c| *c == p.filter_category).unwrap_or(0);
                        p.filter_category = ids[(i + 1) % ids.len()].clone();
                    }
                    KeyCode::Char('o') => {
                        let i = ExpenseSort::ALL.iter().position(|s| *s == p.sort_by).unwrap_or(0);
                        p.sort_by = ExpenseSort::ALL[(i + 1) % ExpenseSort::ALL.len()];
                    }
                    KeyCode::Char('m') if !p.selected.is_empty() => {
                        self.modal = Some(Modal::BulkCategory(Form::new("Move selected to category", &[("Category id", "")])));
                    }
                    KeyCode::Char('x') => {
                        if let Some(id) = selected {
                            p.delete_expense(id);
                        }
                    }
                    _ => {}
                }
            }
            ExpenseTab::Categories => {
                let selected = p.categories.get(idx).cloned();
                match k.code {
                    KeyCode::Char('n') => {
                        let d = CategoryForm::default();
                        let form = Form::new(
                            "New Category",
                            &[("Name", ""), ("Icon", d.icon.as_str()), ("Description", ""), ("Color", d.color.as_str())],
                        );
                        self.modal = Some(Modal::Category { form, editing: None });
                    }
                    KeyCode::Char('e') => match selected {
                        Some(c) if c.is_custom => {
                            let form = Form::new(
                                "Edit Category",
                                &[
                                    ("Name", c.name.as_str()),
                                    ("Icon", c.icon.as_str()),
                                    ("Description", c.description.as_str()),
                                    ("Color", c.color.as_str()),
                                ],
                            );
                            self.modal = Some(Modal::Category { form, editing: Some(c.id) });
                        }
                        Some(_) => self.status = "Built-in categories cannot be edited".into(),
                        None => {}
                    },
                    KeyCode::Char('x') => {
                        if let Some(c) = selected {
                            if !p.delete_category(&c.id) {
                                self.status = "Built-in categories cannot be deleted".into();
                            }
                        }
                    }
                    _ => {}
                }
            }
            ExpenseTab::Receipt => match k.code {
                KeyCode::Char('o') => {
                    self.modal = Some(Modal::Receipt(Form::new("Scan receipt image", &[("File path", "")])));
                }
                KeyCode::Enter => {
                    if let Some(id) = p.accept_receipt(now) {
                        self.status = format!("Receipt saved as expense #{id}");
                    }
                }
                KeyCode::Char('r') => p.reset_receipt(),
                _ => {}
            },
            ExpenseTab::Templates => {
                let selected = p.templates().nth(idx).map(|t| t.id.clone());
                match k.code {
                    KeyCode::Enter => {
                        if let Some(id) = selected.and_then(|t| p.use_template(&t, now)) {
                            self.status = format!("Template expense #{id} added");
                            self.list.select(Some(0));
                        }
                    }
                    KeyCode::Char('n') => {
                        let d = TemplateForm::default();
                        let form = Form::new(
                            "New Template",
                            &[("Name", ""), ("Description", ""), ("Amount", ""), ("Category id", ""), ("Icon", d.icon.as_str())],
                        );
                        self.modal = Some(Modal::Template(form));
                    }
                    _ => {}
                }
            }
        }
    }

    fn handle_entry_edit(&mut self, k: KeyEvent) {
        let Mounted::Expenses(p) = &mut self.page else {
            self.editing = false;
            return;
        };
        let n = entry_field_count(p.form.show_advanced);
        match k.code {
            KeyCode::Esc | KeyCode::Enter => self.editing = false,
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % n,
            KeyCode::BackTab | KeyCode::Up => self.focus = (self.focus + n - 1) % n,
            KeyCode::Left | KeyCode::Right if self.focus == ENTRY_CATEGORY => {
                cycle_entry_category(p, k.code == KeyCode::Right)
            }
            _ => {
                let target = match self.focus {
                    ENTRY_AMOUNT => &mut p.form.amount,
                    ENTRY_DESCRIPTION => &mut p.form.description,
                    ENTRY_DATE => &mut p.form.date,
                    ENTRY_NARRATIVE => &mut p.form.narrative,
                    _ => return,
                };
                if let Some(value) = edit_value(target, &k) {
                    *target = value;
                }
            }
        }
    }

    // ============= Quick expense =============

    fn open_quick_expense(&mut self) {
        let today = iso(&self.now().date_naive());
        self.modal = Some(Modal::QuickExpense(Form::new(
            "Quick Expense",
            &[("Amount", ""), ("Description", ""), ("Category id", ""), ("Date", today.as_str())],
        )));
    }

    // ============= Modals =============

    async fn handle_modal(&mut self, mut modal: Modal, k: KeyEvent) {
        match modal.form_mut().handle_key(&k) {
            FormKey::Cancel => return,
            FormKey::Submit => {}
            FormKey::Edited => {
                if let Modal::Goal { form, .. } = &mut modal {
                    let focus = form.focus;
                    if [G_TARGET, G_CURRENT, G_DATE].contains(&focus) {
                        let mut goal = read_goal_form(form);
                        goal.recalculate_monthly_target(self.now().date_naive());
                        form.fields[G_MONTHLY].edit.set(goal.monthly_target);
                    }
                }
                self.modal = Some(modal);
                return;
            }
            FormKey::Moved | FormKey::Ignored => {
                self.modal = Some(modal);
                return;
            }
        }

        if matches!(modal, Modal::QuickExpense(_) | Modal::Goal { .. } | Modal::Progress { .. }) {
            let error = self.precheck(&modal);
            let deferred = error.is_none();
            modal.form_mut().error = error;
            self.modal = Some(modal);
            if deferred {
                self.pending = Some(Pending::Modal);
            }
            return;
        }
        self.submit_modal(modal).await;
    }

    /// Field errors a modal can report before its simulated request starts.
    fn precheck(&mut self, modal: &Modal) -> Option<String> {
        let today = self.now().date_naive();
        match modal {
            Modal::QuickExpense(form) => {
                self.fill_quick(form);
                if is_oversized(&self.quick.amount) {
                    Some("Amount is too large".into())
                } else if !self.quick.is_valid() || parse_money(&self.quick.amount).is_none() {
                    Some("Amount, description and category are required".into())
                } else {
                    None
                }
            }
            Modal::Goal { form, editing } => read_goal_form(form)
                .validate(today, editing.is_none())
                .err()
                .map(|errors| summarize(&errors)),
            Modal::Progress { form, goal_id } => {
                let update = match read_progress(form, today) {
                    Ok(update) => update,
                    Err(message) => return Some(message),
                };
                let Mounted::Goals(p) = &self.page else { return None };
                let goal = p.goal(*goal_id)?;
                validate_progress(goal, &update).err().map(|errors| summarize(&errors))
            }
            _ => None,
        }
    }

    fn fill_quick(&mut self, form: &Form) {
        self.quick.amount = form.trimmed(0);
        self.quick.description = form.trimmed(1);
        self.quick.category = form.trimmed(2);
        self.quick.date = form.trimmed(3);
    }

    async fn submit_modal(&mut self, mut modal: Modal) {
        let now = self.now();
        let keep = match &mut modal {
            Modal::GoTo(form) => {
                let path = form.trimmed(0);
                self.go(&path).await;
                false
            }
            Modal::QuickExpense(form) => {
                self.fill_quick(form);
                match self.quick.submit(&self.latency, now.date_naive()).await {
                    Some(expense) => {
                        match &mut self.page {
                            Mounted::Expenses(p) => {
                                p.add_expense(expense, now);
                            }
                            _ => info!(description = %expense.description, "quick expense recorded"),
                        }
                        self.status = "Expense added".into();
                        false
                    }
                    None => {
                        form.error = Some("Amount, description and category are required".into());
                        true
                    }
                }
            }
            Modal::Goal { form, editing } => {
                let goal_form = read_goal_form(form);
                let Mounted::Goals(p) = &mut self.page else { return };
                let result = match editing {
                    None => p.create_goal(&goal_form, &self.latency, now).await.map(|_| true),
                    Some(id) => p.update_goal(*id, &goal_form, &self.latency, now).await,
                };
                match result {
                    Ok(_) => {
                        self.status = if editing.is_some() { "Goal updated" } else { "Goal created" }.into();
                        false
                    }
                    Err(errors) => {
                        form.error = Some(summarize(&errors));
                        true
                    }
                }
            }
            Modal::Progress { form, goal_id } => {
                let Mounted::Goals(p) = &mut self.page else { return };
                match read_progress(form, now.date_naive()) {
                    Err(message) => {
                        form.error = Some(message);
                        true
                    }
                    Ok(update) => match p.update_progress(*goal_id, &update, &self.latency, now).await {
                        Ok(_) => {
                            self.status = "Progress updated".into();
                            false
                        }
                        Err(errors) => {
                            form.error = Some(summarize(&errors));
                            true
                        }
                    },
                }
            }
            Modal::Category { form, editing } => {
                let Mounted::Expenses(p) = &mut self.page else { return };
                match editing {
                    None => {
                        let category = CategoryForm {
                            name: form.trimmed(0),
                            icon: form.trimmed(1),
                            description: form.trimmed(2),
                            color: form.trimmed(3),
                        };
                        match p.create_category(&category, now) {
                            Some(_) => false,
                            None => {
                                form.error = Some("Category name is required".into());
                                true
                            }
                        }
                    }
                    Some(id) => {
                        let update = CategoryUpdate {
                            name: Some(form.trimmed(0)).filter(|s| !s.is_empty()),
                            icon: Some(form.trimmed(1)).filter(|s| !s.is_empty()),
                            description: Some(form.trimmed(2)),
                            color: Some(form.trimmed(3)).filter(|s| !s.is_empty()),
                        };
                        p.update_category(id, update);
                        false
                    }
                }
            }
            Modal::NewEntryCategory(form) => {
                let Mounted::Expenses(p) = &mut self.page else { return };
                match p.quick_create_category(&form.trimmed(0), now) {
                    Some(_) => false,
                    None => {
                        form.error = Some("Category name is required".into());
                        true
                    }
                }
            }
            Modal::BulkCategory(form) => {
                let Mounted::Expenses(p) = &mut self.page else { return };
                let category = form.trimmed(0);
                if p.category(&category).is_none() {
                    form.error = Some(format!("Unknown category {category:?}"));
                    true
                } else {
                    let changed = p.bulk_update_category(&category);
                    self.status = format!("{changed} expenses moved to {}", p.category_label(&category));
                    false
                }
            }
            Modal::Template(form) => {
                let Mounted::Expenses(p) = &mut self.page else { return };
                let template = TemplateForm {
                    name: form.trimmed(0),
                    description: form.trimmed(1),
                    amount: form.trimmed(2),
                    category: form.trimmed(3),
                    icon: form.trimmed(4),
                };
                match p.create_template(&template, now) {
                    Some(_) => false,
                    None => {
                        form.error = Some("Name, amount and category are required".into());
                        true
                    }
                }
            }
            Modal::Receipt(form) => {
                let Mounted::Expenses(p) = &mut self.page else { return };
                let path = std::path::PathBuf::from(form.trimmed(0));
                match p.begin_scan(&path).await {
                    Ok(true) => {
                        self.pending = Some(Pending::ScanReceipt);
                        false
                    }
                    Ok(false) => {
                        form.error = Some("Please choose an image file".into());
                        true
                    }
                    Err(e) => {
                        warn!(error = %e, path = %path.display(), "receipt scan failed");
                        form.error = Some(format!("Could not read file: {e}"));
                        true
                    }
                }
            }
        };
        if keep {
            self.modal = Some(modal);
        }
        self.clamp_list();
    }
}

pub const ENTRY_AMOUNT: usize = 0;
pub const ENTRY_DESCRIPTION: usize = 1;
pub const ENTRY_CATEGORY: usize = 2;
pub const ENTRY_DATE: usize = 3;
pub const ENTRY_NARRATIVE: usize = 4;

/// The narrative field only exists while advanced options are shown.
pub fn entry_field_count(show_advanced: bool) -> usize {
    if show_advanced {
        5
    } else {
        4
    }
}

fn cycle_entry_category(p: &mut crate::pages::ExpensesPage, forward: bool) {
    let n = p.categories.len();
    if n == 0 {
        return;
    }
    let cur = p.categories.iter().position(|c| c.id == p.form.category);
    let next = match (cur, forward) {
        (None, true) => 0,
        (None, false) => n - 1,
        (Some(i), true) => (i + 1) % n,
        (Some(i), false) => (i + n - 1) % n,
    };
    p.form.category = p.categories[next].id.clone();
}

/// Runs one editing key against `current`; `Some` carries the new value.
fn edit_value(current: &str, key: &KeyEvent) -> Option<String> {
    let mut edit = LineEdit::with(current);
    edit.handle(key).then_some(edit.value)
}

fn goal_modal(title: &'static str, form: &GoalForm) -> Form {
    let category = form.category.map(|c| c.as_str()).unwrap_or("");
    Form::new(
        title,
        &[
            ("Title", form.title.as_str()),
            ("Description", form.description.as_str()),
            ("Target amount", form.target_amount.as_str()),
            ("Current amount", form.current_amount.as_str()),
            ("Target date (YYYY-MM-DD)", form.target_date.as_str()),
            ("Category", category),
            ("Icon", form.icon.as_str()),
            ("Motivation", form.motivation_message.as_str()),
            ("Monthly target", form.monthly_target.as_str()),
        ],
    )
}

fn read_goal_form(form: &Form) -> GoalForm {
    GoalForm {
        title: form.value(G_TITLE).to_string(),
        description: form.value(G_DESCRIPTION).to_string(),
        target_amount: form.trimmed(G_TARGET),
        current_amount: form.trimmed(G_CURRENT),
        target_date: form.trimmed(G_DATE),
        category: GoalCategory::parse(form.value(G_CATEGORY)),
        icon: form.value(G_ICON).to_string(),
        motivation_message: form.value(G_MOTIVATION).to_string(),
        monthly_target: form.trimmed(G_MONTHLY),
    }
}

/// Reads the progress modal. Unknown update types are refused rather than
/// treated as an add.
fn read_progress(form: &Form, today: chrono::NaiveDate) -> Result<ProgressUpdate, String> {
    let kind = ProgressKind::parse(form.value(1)).ok_or_else(|| "Type must be add, subtract or set".to_string())?;
    if is_oversized(form.value(0)) {
        return Err("Amount is too large".into());
    }
    Ok(ProgressUpdate {
        amount: parse_money(form.value(0)).unwrap_or_default(),
        kind,
        note: form.trimmed(2),
        date: parse_date(form.value(3)).unwrap_or(today),
    })
}

fn summarize(errors: &FieldErrors) -> String {
    errors.iter().map(|(_, msg)| msg).collect::<Vec<_>>().join("; ")
}
