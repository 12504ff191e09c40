//! Expense entry and management: the entry form, the list with filtering and
//! bulk edits, the category manager, the receipt scanner and quick templates.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calc::budget::{self, BudgetImpact, BudgetLimits};
use crate::calc::format::{iso, parse_date, parse_money};
use crate::calc::narrative::expense_story_impact;
use crate::database::models::{
    Category, CategoryUpdate, Expense, ExpenseSource, IdClock, NewExpense, QuickTemplate, User,
};
use crate::database::seed;
use crate::error::Result;
use crate::latency::{Latency, DEFAULT_DELAY, RECEIPT_SCAN_DELAY};

pub const DEFAULT_CATEGORY_ICON: &str = "📦";
pub const DEFAULT_CATEGORY_COLOR: &str = "#6B7280";
pub const DEFAULT_TEMPLATE_ICON: &str = "⚡";

pub const AVAILABLE_ICONS: [&str; 16] = [
    "🍽️", "🚗", "🛍️", "🎬", "📄", "🏥", "📚", "🏠", "💡", "📱", "✈️", "🎯", "💰", "🎨", "⚽", "📦",
];

pub const AVAILABLE_COLORS: [&str; 12] = [
    "#EF4444", "#F97316", "#F59E0B", "#84CC16", "#10B981", "#06B6D4", "#3B82F6", "#6366F1", "#8B5CF6",
    "#EC4899", "#6B7280", "#374151",
];

const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "heic"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseTab {
    Entry,
    List,
    Categories,
    Receipt,
    Templates,
}

impl ExpenseTab {
    pub const ALL: [ExpenseTab; 5] = [Self::Entry, Self::List, Self::Categories, Self::Receipt, Self::Templates];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Entry => "Add Expense",
            Self::List => "Expense List",
            Self::Categories => "Categories",
            Self::Receipt => "Receipt Scanner",
            Self::Templates => "Quick Templates",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseSort {
    Date,
    Amount,
    Category,
    Description,
}

impl ExpenseSort {
    pub const ALL: [ExpenseSort; 4] = [Self::Date, Self::Amount, Self::Category, Self::Description];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Date => "Date (Newest First)",
            Self::Amount => "Amount (Highest First)",
            Self::Category => "Category",
            Self::Description => "Description",
        }
    }
}

/// The "Add Expense" form, fields as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub narrative: String,
    pub is_recurring: bool,
    pub show_advanced: bool,
}

impl ExpenseForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            category: String::new(),
            date: iso(&today),
            narrative: String::new(),
            is_recurring: false,
            show_advanced: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.amount.is_empty() && !self.description.is_empty() && !self.category.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub icon: String,
    pub description: String,
    pub color: String,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            icon: DEFAULT_CATEGORY_ICON.into(),
            description: String::new(),
            color: DEFAULT_CATEGORY_COLOR.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateForm {
    pub name: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub icon: String,
}

impl Default for TemplateForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            amount: String::new(),
            category: String::new(),
            icon: DEFAULT_TEMPLATE_ICON.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptItem {
    pub name: String,
    pub price: Decimal,
}

/// What the scanner "reads" off any receipt image.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptExtraction {
    pub amount: Decimal,
    pub merchant: String,
    pub date: NaiveDate,
    pub category: String,
    pub items: Vec<ReceiptItem>,
    pub confidence: Decimal,
    pub story_context: String,
}

impl ReceiptExtraction {
    pub fn mock(today: NaiveDate) -> Self {
        Self {
            amount: Decimal::new(2499, 2),
            merchant: "Bella Vista Restaurant".into(),
            date: today,
            category: "food".into(),
            items: vec![
                ReceiptItem { name: "Margherita Pizza".into(), price: Decimal::new(1899, 2) },
                ReceiptItem { name: "Soft Drink".into(), price: Decimal::new(350, 2) },
                ReceiptItem { name: "Tax".into(), price: Decimal::new(250, 2) },
            ],
            confidence: Decimal::new(92, 2),
            story_context: "A delightful dining experience at Bella Vista Restaurant becomes part of your food & dining story, representing moments of nourishment and social connection.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptScan {
    pub file_name: String,
    pub size_bytes: u64,
    pub is_processing: bool,
    pub extraction: Option<ReceiptExtraction>,
}

impl ReceiptScan {
    pub fn size_mb(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Display-only usage counts per built-in category.
pub fn category_usage(id: &str) -> u32 {
    match id {
        "food" => 45,
        "transport" => 23,
        "shopping" => 18,
        "entertainment" => 12,
        "bills" => 8,
        "healthcare" => 5,
        "education" => 3,
        "other" => 15,
        _ => 0,
    }
}

/// Usage bar fill, 50 uses being a full bar.
pub fn usage_percent(usage: u32) -> u32 {
    (usage * 2).min(100)
}

#[derive(Debug, Clone)]
pub struct ExpensesPage {
    pub user: Option<User>,
    pub tab: ExpenseTab,
    pub expenses: Vec<Expense>,
    pub categories: Vec<Category>,
    pub budget_limits: BudgetLimits,
    pub default_templates: Vec<QuickTemplate>,
    pub custom_templates: Vec<QuickTemplate>,

    pub form: ExpenseForm,
    pub is_submitting: bool,

    pub filter_category: Option<String>,
    pub sort_by: ExpenseSort,
    pub selected: BTreeSet<i64>,

    pub receipt: Option<ReceiptScan>,
    ids: IdClock,
}

impl ExpensesPage {
    pub fn mount(today: NaiveDate) -> Self {
        Self {
            user: Some(seed::page_user()),
            tab: ExpenseTab::Entry,
            expenses: seed::expenses(),
            categories: seed::categories(),
            budget_limits: seed::budget_limits(),
            default_templates: seed::default_templates(),
            custom_templates: Vec::new(),
            form: ExpenseForm::new(today),
            is_submitting: false,
            filter_category: None,
            sort_by: ExpenseSort::Date,
            selected: BTreeSet::new(),
            receipt: None,
            ids: IdClock::default(),
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    // ============= Totals =============

    pub fn total_spent(&self) -> Decimal {
        budget::total_spent(&self.expenses)
    }

    pub fn monthly_spending(&self, today: NaiveDate) -> Decimal {
        budget::monthly_spending(&self.expenses, today)
    }

    // ============= Entry form =============

    /// Story sentence previewed under the form once amount and category are
    /// filled in.
    pub fn story_impact_preview(&self) -> Option<String> {
        if self.form.amount.is_empty() || self.form.category.is_empty() {
            return None;
        }
        let amount = parse_money(&self.form.amount)?;
        let name = self.category(&self.form.category).map(|c| c.name.as_str());
        Some(expense_story_impact(name, &amount))
    }

    /// Budget impact of the amount currently typed into the form.
    pub fn budget_impact_preview(&self) -> Option<BudgetImpact> {
        budget::budget_impact(
            &self.expenses,
            &self.budget_limits,
            parse_money(&self.form.amount),
            &self.form.category,
        )
    }

    /// Prepends an expense with a fresh id and timestamp. Shared by every
    /// source of new expenses.
    pub fn add_expense(&mut self, expense: NewExpense, now: DateTime<Utc>) -> i64 {
        let id = self.ids.next(now);
        let expense = expense.into_expense(id, now);
        info!(id, amount = %expense.amount, category = %expense.category, source = ?expense.source, "expense added");
        self.expenses.insert(0, expense);
        id
    }

    /// Submits the entry form. Missing required fields are a silent no-op,
    /// as is a second submit while one is in flight.
    pub async fn submit_expense(&mut self, latency: &Latency, now: DateTime<Utc>) -> Option<i64> {
        if !self.begin_submit_expense() {
            return None;
        }
        self.complete_submit_expense(latency, now).await
    }

    /// Checks the entry form and marks the page as submitting.
    pub fn begin_submit_expense(&mut self) -> bool {
        if !self.form.is_valid() || self.is_submitting {
            return false;
        }
        if parse_money(&self.form.amount).is_none() {
            warn!(amount = %self.form.amount, "unparseable expense amount");
            return false;
        }
        self.is_submitting = true;
        true
    }

    /// Finishes a submit started by `begin_submit_expense`.
    pub async fn complete_submit_expense(&mut self, latency: &Latency, now: DateTime<Utc>) -> Option<i64> {
        latency.simulate(DEFAULT_DELAY).await;
        self.is_submitting = false;

        let amount = parse_money(&self.form.amount)?;
        let story_impact = self.story_impact_preview();

        let today = now.date_naive();
        let form = std::mem::replace(&mut self.form, ExpenseForm::new(today));
        let expense = NewExpense {
            amount,
            description: form.description,
            category: form.category,
            date: parse_date(&form.date).unwrap_or(today),
            narrative: Some(form.narrative).filter(|n| !n.is_empty()),
            is_recurring: form.is_recurring,
            story_impact,
            source: ExpenseSource::Manual,
        };
        Some(self.add_expense(expense, now))
    }

    pub fn reset_form(&mut self, today: NaiveDate) {
        self.form = ExpenseForm::new(today);
    }

    /// "Create new category" from inside the entry form. Selects the new
    /// category on success.
    pub fn quick_create_category(&mut self, name: &str, now: DateTime<Utc>) -> Option<String> {
        let form = CategoryForm {
            name: name.to_string(),
            description: "Custom category".into(),
            ..CategoryForm::default()
        };
        let id = self.create_category(&form, now)?;
        self.form.category = id.clone();
        Some(id)
    }

    // ============= List =============

    pub fn visible_expenses(&self) -> Vec<&Expense> {
        let mut list: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|e| self.filter_category.as_ref().map_or(true, |c| &e.category == c))
            .collect();
        match self.sort_by {
            ExpenseSort::Date => list.sort_by(|a, b| b.date.cmp(&a.date)),
            ExpenseSort::Amount => list.sort_by(|a, b| b.amount.cmp(&a.amount)),
            ExpenseSort::Category => {
                let names: HashMap<&str, String> =
                    self.categories.iter().map(|c| (c.id.as_str(), c.name.to_lowercase())).collect();
                list.sort_by_key(|e| names.get(e.category.as_str()).cloned().unwrap_or_default());
            }
            ExpenseSort::Description => list.sort_by_key(|e| e.description.to_lowercase()),
        }
        list
    }

    pub fn empty_list_message(&self) -> &'static str {
        if self.filter_category.is_some() {
            "No expenses in this category yet."
        } else {
            "Start adding expenses to build your financial story."
        }
    }

    pub fn toggle_selected(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Selects every visible expense, or clears the selection when all of
    /// them are already selected.
    pub fn toggle_select_all(&mut self) {
        let visible: BTreeSet<i64> = self.visible_expenses().iter().map(|e| e.id).collect();
        if !visible.is_empty() && visible == self.selected {
            self.selected.clear();
        } else {
            self.selected = visible;
        }
    }

    /// Moves every selected expense to `category`. Returns how many changed.
    pub fn bulk_update_category(&mut self, category: &str) -> usize {
        if category.is_empty() || self.selected.is_empty() {
            return 0;
        }
        let mut changed = 0;
        for e in self.expenses.iter_mut().filter(|e| self.selected.contains(&e.id)) {
            e.category = category.to_string();
            changed += 1;
        }
        info!(changed, category, "bulk category update");
        self.selected.clear();
        changed
    }

    pub fn delete_expense(&mut self, id: i64) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        self.selected.remove(&id);
        let removed = before != self.expenses.len();
        if removed {
            info!(id, "expense deleted");
        }
        removed
    }

    // ============= Categories =============

    pub fn create_category(&mut self, form: &CategoryForm, now: DateTime<Utc>) -> Option<String> {
        let name = form.name.trim();
        if name.is_empty() {
            return None;
        }
        let id = format!("custom_{}", self.ids.next(now));
        self.categories.push(Category {
            id: id.clone(),
            name: name.to_string(),
            icon: form.icon.clone(),
            description: form.description.clone(),
            color: form.color.clone(),
            is_custom: true,
        });
        info!(%id, name, "category created");
        Some(id)
    }

    /// Only custom categories can be edited.
    pub fn update_category(&mut self, id: &str, update: CategoryUpdate) -> bool {
        match self.categories.iter_mut().find(|c| c.id == id && c.is_custom) {
            Some(category) => {
                category.apply(update);
                true
            }
            None => false,
        }
    }

    /// Only custom categories can be deleted. Expenses keep the dangling id
    /// and show as uncategorized.
    pub fn delete_category(&mut self, id: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| !(c.id == id && c.is_custom));
        let removed = before != self.categories.len();
        if removed {
            info!(id, "category deleted");
            if self.filter_category.as_deref() == Some(id) {
                self.filter_category = None;
            }
        }
        removed
    }

    pub fn category_label(&self, id: &str) -> String {
        self.category(id).map(|c| c.name.clone()).unwrap_or_else(|| "Uncategorized".into())
    }

    // ============= Receipt scanner =============

    /// Starts a scan of the image at `path`. Non-image files are ignored
    /// (`Ok(false)`); a missing file is an I/O error.
    pub async fn scan_receipt(&mut self, path: &Path, latency: &Latency, today: NaiveDate) -> Result<bool> {
        if !self.begin_scan(path).await? {
            return Ok(false);
        }
        self.finish_scan(latency, today).await;
        Ok(true)
    }

    /// Picks up the file and shows it as processing. `Ok(false)` for
    /// non-image files.
    pub async fn begin_scan(&mut self, path: &Path) -> Result<bool> {
        if !is_image(path) {
            warn!(path = %path.display(), "not an image, receipt ignored");
            return Ok(false);
        }
        let meta = tokio::fs::metadata(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.receipt = Some(ReceiptScan { file_name, size_bytes: meta.len(), is_processing: true, extraction: None });
        Ok(true)
    }

    /// Waits for the simulated extraction of the receipt picked up by
    /// `begin_scan`.
    pub async fn finish_scan(&mut self, latency: &Latency, today: NaiveDate) {
        if !self.receipt.as_ref().is_some_and(|r| r.is_processing) {
            return;
        }
        latency.simulate(RECEIPT_SCAN_DELAY).await;
        if let Some(scan) = self.receipt.as_mut() {
            scan.is_processing = false;
            scan.extraction = Some(ReceiptExtraction::mock(today));
            info!(file = %scan.file_name, "receipt processed");
        }
    }

    /// Turns the extraction into an expense and switches to the list.
    pub fn accept_receipt(&mut self, now: DateTime<Utc>) -> Option<i64> {
        let data = self.receipt.take()?.extraction?;
        let id = self.add_expense(
            NewExpense {
                amount: data.amount,
                description: format!("{} - Receipt Upload", data.merchant),
                category: data.category,
                date: data.date,
                narrative: Some(data.story_context),
                is_recurring: false,
                story_impact: None,
                source: ExpenseSource::Receipt,
            },
            now,
        );
        self.tab = ExpenseTab::List;
        Some(id)
    }

    pub fn reset_receipt(&mut self) {
        self.receipt = None;
    }

    // ============= Templates =============

    pub fn templates(&self) -> impl Iterator<Item = &QuickTemplate> {
        self.default_templates.iter().chain(self.custom_templates.iter())
    }

    /// Logs an expense from the template dated today, then shows the list.
    pub fn use_template(&mut self, template_id: &str, now: DateTime<Utc>) -> Option<i64> {
        let t = self.templates().find(|t| t.id == template_id)?.clone();
        let id = self.add_expense(
            NewExpense {
                amount: t.amount,
                description: t.description,
                category: t.category,
                date: now.date_naive(),
                narrative: Some(t.story_context),
                is_recurring: false,
                story_impact: None,
                source: ExpenseSource::Template(t.id),
            },
            now,
        );
        self.tab = ExpenseTab::List;
        Some(id)
    }

    /// Needs a name, a parseable amount and a category.
    pub fn create_template(&mut self, form: &TemplateForm, now: DateTime<Utc>) -> Option<String> {
        if form.name.is_empty() || form.category.is_empty() {
            return None;
        }
        let amount = parse_money(&form.amount)?;
        let id = format!("custom_{}", self.ids.next(now));
        self.custom_templates.push(QuickTemplate {
            id: id.clone(),
            name: form.name.clone(),
            description: form.description.clone(),
            amount,
            category: form.category.clone(),
            icon: form.icon.clone(),
            frequency: None,
            story_context: format!("Your personalized {} expense template", form.name.to_lowercase()),
            is_custom: true,
        });
        info!(%id, name = %form.name, "template created");
        Some(id)
    }

    pub fn logout(&mut self) -> &'static str {
        crate::auth::logout(&mut self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::budget::Severity;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 10, 12, 0, 0).unwrap()
    }

    fn page() -> ExpensesPage {
        ExpensesPage::mount(now().date_naive())
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn submit_prepends_and_resets() {
        let mut page = page();
        page.form.amount = "150".into();
        page.form.description = "Concert tickets".into();
        page.form.category = "entertainment".into();

        let id = page.submit_expense(&Latency::none(), now()).await.unwrap();
        assert_eq!(page.expenses.len(), 6);
        let first = &page.expenses[0];
        assert_eq!(first.id, id);
        assert_eq!(first.amount, dec("150"));
        assert_eq!(first.narrative, None);
        assert_eq!(
            first.story_impact.as_deref(),
            Some("This Entertainment represents a significant chapter in your financial story, potentially affecting your monthly budget by 7.5%.")
        );
        assert_eq!(page.form, ExpenseForm::new(now().date_naive()));
    }

    #[tokio::test]
    async fn incomplete_form_is_ignored() {
        let mut page = page();
        page.form.amount = "10".into();
        page.form.description = "Snack".into();
        assert_eq!(page.submit_expense(&Latency::none(), now()).await, None);
        assert_eq!(page.expenses.len(), 5);
        assert_eq!(page.form.amount, "10");
    }

    #[test]
    fn budget_preview_tracks_the_form() {
        let mut page = page();
        assert_eq!(page.budget_impact_preview(), None);
        page.form.category = "entertainment".into();
        page.form.amount = "140".into();
        let impact = page.budget_impact_preview().unwrap();
        assert_eq!(impact.current_spent, dec("15.99"));
        assert!(impact.is_over_budget);
        assert_eq!(impact.severity(), Severity::Critical);
    }

    #[test]
    fn oversized_amount_has_no_preview_and_is_not_submitted() {
        let mut page = page();
        page.form.amount = "79228162514264337593543950335".into();
        page.form.description = "Yacht".into();
        page.form.category = "entertainment".into();
        assert_eq!(page.budget_impact_preview(), None);
        assert_eq!(page.story_impact_preview(), None);
        assert!(!page.begin_submit_expense());
        assert!(!page.is_submitting);

        page.form.amount = "1000000000000".into();
        let impact = page.budget_impact_preview().unwrap();
        assert!(impact.is_over_budget);
    }

    #[tokio::test]
    async fn submit_stays_busy_until_completed() {
        let mut page = page();
        page.form.amount = "12".into();
        page.form.description = "Lunch".into();
        page.form.category = "food".into();
        assert!(page.begin_submit_expense());
        assert!(page.is_submitting);
        assert!(!page.begin_submit_expense());
        assert_eq!(page.expenses.len(), 5);

        let id = page.complete_submit_expense(&Latency::none(), now()).await.unwrap();
        assert!(!page.is_submitting);
        assert_eq!(page.expenses[0].id, id);
    }

    #[test]
    fn sorting_and_filtering() {
        let mut page = page();
        let ids = |p: &ExpensesPage| p.visible_expenses().iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);

        page.sort_by = ExpenseSort::Amount;
        assert_eq!(ids(&page), vec![5, 3, 2, 1, 4]);

        page.sort_by = ExpenseSort::Category;
        // Bills, Entertainment, Food x2, Transportation
        assert_eq!(ids(&page), vec![5, 4, 1, 3, 2]);

        page.sort_by = ExpenseSort::Description;
        assert_eq!(ids(&page), vec![5, 2, 1, 4, 3]);

        page.filter_category = Some("food".into());
        assert_eq!(ids(&page), vec![1, 3]);
        page.filter_category = Some("shopping".into());
        assert!(page.visible_expenses().is_empty());
        assert_eq!(page.empty_list_message(), "No expenses in this category yet.");
    }

    #[test]
    fn bulk_update_and_delete() {
        let mut page = page();
        page.toggle_selected(1);
        page.toggle_selected(2);
        page.toggle_selected(2);
        page.toggle_selected(3);
        assert_eq!(page.bulk_update_category("shopping"), 2);
        assert!(page.selected.is_empty());
        assert_eq!(page.expenses.iter().filter(|e| e.category == "shopping").count(), 2);

        page.toggle_select_all();
        assert_eq!(page.selected.len(), 5);
        page.toggle_select_all();
        assert!(page.selected.is_empty());

        page.toggle_selected(4);
        assert!(page.delete_expense(4));
        assert!(!page.delete_expense(4));
        assert!(page.selected.is_empty());
    }

    #[test]
    fn custom_category_lifecycle() {
        let mut page = page();
        assert_eq!(page.create_category(&CategoryForm::default(), now()), None);

        let form = CategoryForm { name: "Fitness".into(), ..CategoryForm::default() };
        let id = page.create_category(&form, now()).unwrap();
        assert_eq!(id, format!("custom_{}", now().timestamp_millis()));
        assert_eq!(page.categories.len(), 9);

        let update = CategoryUpdate { name: Some("Fitness & Health".into()), ..CategoryUpdate::default() };
        assert!(page.update_category(&id, update.clone()));
        assert_eq!(page.category(&id).unwrap().name, "Fitness & Health");
        assert!(!page.update_category("food", update));

        assert!(!page.delete_category("food"));
        assert!(page.delete_category(&id));
        assert_eq!(page.categories.len(), 8);
    }

    #[test]
    fn quick_create_selects_new_category() {
        let mut page = page();
        let id = page.quick_create_category("Pets", now()).unwrap();
        assert_eq!(page.form.category, id);
        assert_eq!(page.category(&id).unwrap().description, "Custom category");
    }

    #[tokio::test]
    async fn receipt_scan_and_accept() {
        let mut page = page();
        let dir = tempfile::tempdir().unwrap();

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "hello").unwrap();
        assert!(!page.scan_receipt(&text, &Latency::none(), now().date_naive()).await.unwrap());
        assert!(page.receipt.is_none());

        let missing = dir.path().join("missing.png");
        assert!(page.scan_receipt(&missing, &Latency::none(), now().date_naive()).await.is_err());

        let image = dir.path().join("receipt.JPG");
        std::fs::write(&image, vec![0u8; 2048]).unwrap();
        assert!(page.scan_receipt(&image, &Latency::none(), now().date_naive()).await.unwrap());
        let scan = page.receipt.as_ref().unwrap();
        assert!(!scan.is_processing);
        assert_eq!(scan.extraction.as_ref().unwrap().amount, dec("24.99"));

        let id = page.accept_receipt(now()).unwrap();
        assert_eq!(page.tab, ExpenseTab::List);
        assert!(page.receipt.is_none());
        let added = &page.expenses[0];
        assert_eq!(added.id, id);
        assert_eq!(added.description, "Bella Vista Restaurant - Receipt Upload");
        assert_eq!(added.source, ExpenseSource::Receipt);
        assert_eq!(added.date, now().date_naive());
    }

    #[test]
    fn templates_use_and_create() {
        let mut page = page();
        assert_eq!(page.templates().count(), 6);

        page.use_template("coffee", now()).unwrap();
        let added = &page.expenses[0];
        assert_eq!(added.amount, dec("4.50"));
        assert_eq!(added.source, ExpenseSource::Template("coffee".into()));
        assert_eq!(page.tab, ExpenseTab::List);

        assert_eq!(page.create_template(&TemplateForm { name: "Gym".into(), ..TemplateForm::default() }, now()), None);
        let form = TemplateForm {
            name: "Gym Day".into(),
            amount: "12".into(),
            category: "healthcare".into(),
            ..TemplateForm::default()
        };
        let id = page.create_template(&form, now()).unwrap();
        let t = page.templates().find(|t| t.id == id).unwrap();
        assert_eq!(t.story_context, "Your personalized gym day expense template");
        assert!(t.is_custom);
        assert_eq!(page.templates().count(), 7);
    }

    #[test]
    fn totals() {
        let page = page();
        assert_eq!(page.total_spent(), dec("300.48"));
        assert_eq!(page.monthly_spending(now().date_naive()), dec("300.48"));
        assert_eq!(usage_percent(category_usage("food")), 90);
        assert_eq!(usage_percent(category_usage("custom_1")), 0);
    }
}
