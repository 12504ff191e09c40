//! End-to-end page flows: goals, budget impact, expenses and routing.

use chrono::{NaiveDate, TimeZone, Utc};
use financial_storyteller::calc::budget::{budget_impact, BudgetImpact, BudgetLimits, Severity};
use financial_storyteller::calc::goal::{GoalForm, ProgressUpdate};
use financial_storyteller::database::models::{ExpenseSource, GoalCategory, ProgressKind};
use financial_storyteller::latency::Latency;
use financial_storyteller::pages::expenses::{ExpenseSort, ExpenseTab};
use financial_storyteller::pages::{ExpensesPage, GoalsPage, Mounted};
use financial_storyteller::router::{self, breadcrumbs, resolve, Navigator, Page};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn monthly_target_for_a_ten_month_goal() {
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut form = GoalForm {
        target_amount: "5000".into(),
        current_amount: "0".into(),
        target_date: "2025-10-28".into(),
        ..GoalForm::blank()
    };
    form.recalculate_monthly_target(today);
    assert_eq!(form.monthly_target, "500.00");
}

#[test]
fn transport_expense_pushes_over_budget() {
    let limits = BudgetLimits::from([("transport".to_string(), dec("300"))]);
    let mut page = ExpensesPage::mount(NaiveDate::from_ymd_opt(2025, 11, 10).unwrap());
    page.expenses.retain(|e| e.category != "transport");
    page.add_expense(
        financial_storyteller::database::models::NewExpense {
            amount: dec("250"),
            description: "Car service".into(),
            category: "transport".into(),
            date: NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
            narrative: None,
            is_recurring: false,
            story_impact: None,
            source: ExpenseSource::Manual,
        },
        Utc::now(),
    );

    let impact = budget_impact(&page.expenses, &limits, Some(dec("60")), "transport").unwrap();
    assert_eq!(impact.new_total, dec("310"));
    assert!(impact.is_over_budget);
    assert_eq!(impact.remaining_budget, dec("-10"));
    assert_eq!(impact.severity(), Severity::Critical);

    let exact = BudgetImpact::compute(dec("250"), dec("300"), dec("50"));
    assert!(!exact.is_over_budget);
}

#[tokio::test]
async fn goal_lifecycle() {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
    let latency = Latency::none();
    let mut page = GoalsPage::mount();

    let form = GoalForm {
        title: "Japan Trip".into(),
        target_amount: "5000".into(),
        target_date: "2025-10-28".into(),
        category: Some(GoalCategory::Travel),
        monthly_target: "500.00".into(),
        ..GoalForm::blank()
    };
    let id = page.create_goal(&form, &latency, now).await.unwrap();
    let goal = page.goal(id).unwrap();
    assert_eq!(goal.progress, Decimal::ZERO);
    assert_eq!(goal.milestones.iter().filter(|m| m.achieved).count(), 0);

    let update = ProgressUpdate {
        amount: dec("2500"),
        kind: ProgressKind::Add,
        note: "Bonus".into(),
        date: now.date_naive(),
    };
    assert!(page.update_progress(id, &update, &latency, now).await.unwrap());
    let goal = page.goal(id).unwrap();
    assert_eq!(goal.progress, dec("50"));
    assert_eq!(goal.milestones.iter().filter(|m| m.achieved).count(), 2);
    assert_eq!(goal.progress_history.len(), 1);

    let too_much = ProgressUpdate { amount: dec("9000"), kind: ProgressKind::Subtract, ..update };
    let errors = page.update_progress(id, &too_much, &latency, now).await.unwrap_err();
    assert_eq!(errors.get("amount"), Some("Cannot subtract more than current amount"));

    assert!(page.delete_goal(id, &latency).await);
    assert!(page.goal(id).is_none());
}

#[tokio::test]
async fn expense_entry_to_list() {
    let now = Utc.with_ymd_and_hms(2025, 11, 10, 18, 0, 0).unwrap();
    let mut page = ExpensesPage::mount(now.date_naive());

    page.form.amount = "42".into();
    page.form.description = "Book club".into();
    page.form.category = "education".into();
    page.form.narrative = "Monthly read".into();
    let id = page.submit_expense(&Latency::none(), now).await.unwrap();

    page.tab = ExpenseTab::List;
    page.filter_category = Some("education".into());
    page.sort_by = ExpenseSort::Amount;
    let visible = page.visible_expenses();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, id);
    assert_eq!(visible[0].narrative.as_deref(), Some("Monthly read"));
    assert_eq!(
        visible[0].story_impact.as_deref(),
        Some("A small but meaningful addition to your Education story, contributing to your daily financial narrative.")
    );
}

#[test]
fn routing_table_and_breadcrumbs() {
    assert_eq!(resolve("/"), Page::Dashboard);
    assert_eq!(resolve(router::EXPENSES), Page::ExpenseEntryAndManagement);
    assert_eq!(resolve("/dashboard/"), Page::NotFound);

    let labels: Vec<_> = breadcrumbs(router::GOALS).iter().map(|c| c.label).collect();
    assert_eq!(labels, vec!["Dashboard", "Goals"]);

    let mut nav = Navigator::new(router::LOGIN);
    nav.navigate(router::DASHBOARD);
    nav.navigate("/nope");
    assert_eq!(nav.page(), Page::NotFound);
    assert_eq!(nav.back(), Some(Page::Dashboard));
    assert_eq!(nav.back(), Some(Page::Login));
    assert_eq!(nav.back(), None);
}

#[test]
fn mounting_reseeds_page_state() {
    let now = Utc::now();
    let Mounted::Expenses(mut first) = Mounted::mount(Page::ExpenseEntryAndManagement, router::EXPENSES, now) else {
        panic!("expected expenses page");
    };
    first.delete_expense(1);
    assert_eq!(first.expenses.len(), 4);

    let Mounted::Expenses(second) = Mounted::mount(Page::ExpenseEntryAndManagement, router::EXPENSES, now) else {
        panic!("expected expenses page");
    };
    assert_eq!(second.expenses.len(), 5);
}
