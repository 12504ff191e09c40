//! Budget impact of a prospective expense against its category limit.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::calc::format::fixed2;
use crate::calc::saturating_sum;
use crate::database::models::Expense;

pub type BudgetLimits = HashMap<String, Decimal>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetImpact {
    pub current_spent: Decimal,
    pub budget: Decimal,
    pub new_total: Decimal,
    pub percentage_used: Decimal,
    pub remaining_budget: Decimal,
    pub is_over_budget: bool,
}

/// Display severity. Independent of the narrative tier, which uses different
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Caution,
    Healthy,
}

impl BudgetImpact {
    pub fn compute(current_spent: Decimal, budget: Decimal, new_amount: Decimal) -> Self {
        let new_total = current_spent.saturating_add(new_amount);
        let percentage_used = crate::calc::percent_of(new_total, budget);
        Self {
            current_spent,
            budget,
            new_total,
            percentage_used,
            remaining_budget: budget.saturating_sub(new_total),
            is_over_budget: new_total > budget,
        }
    }

    pub fn severity(&self) -> Severity {
        if self.is_over_budget {
            Severity::Critical
        } else if self.percentage_used > Decimal::from(80) {
            Severity::Warning
        } else if self.percentage_used > Decimal::from(60) {
            Severity::Caution
        } else {
            Severity::Healthy
        }
    }

    pub fn narrative(&self) -> String {
        if self.is_over_budget {
            let over = self.remaining_budget.abs();
            format!(
                "This expense would take you ${} over your budget, adding an unexpected twist to this month's financial story.",
                fixed2(&over)
            )
        } else if self.percentage_used > Decimal::from(90) {
            format!(
                "You're approaching the climax of this category's budget story - only ${} remaining.",
                fixed2(&self.remaining_budget)
            )
        } else if self.percentage_used > Decimal::from(70) {
            format!(
                "This expense moves your story into the rising action phase, with ${} left for this category.",
                fixed2(&self.remaining_budget)
            )
        } else {
            format!(
                "A comfortable addition to your financial narrative, leaving ${} for future chapters in this category.",
                fixed2(&self.remaining_budget)
            )
        }
    }
}

pub fn spent_in_category(expenses: &[Expense], category: &str) -> Decimal {
    saturating_sum(expenses.iter().filter(|e| e.category == category).map(|e| e.amount))
}

/// Impact of adding `new_amount` to `category`. `None` when there is nothing to
/// show: no amount, no category, or no limit configured for the category.
pub fn budget_impact(
    expenses: &[Expense],
    limits: &BudgetLimits,
    new_amount: Option<Decimal>,
    category: &str,
) -> Option<BudgetImpact> {
    let amount = new_amount.filter(|a| !a.is_zero())?;
    if category.is_empty() {
        return None;
    }
    let budget = *limits.get(category)?;
    if budget.is_zero() {
        return None;
    }
    Some(BudgetImpact::compute(spent_in_category(expenses, category), budget, amount))
}

pub fn total_spent(expenses: &[Expense]) -> Decimal {
    saturating_sum(expenses.iter().map(|e| e.amount))
}

pub fn monthly_spending(expenses: &[Expense], today: NaiveDate) -> Decimal {
    saturating_sum(
        expenses
            .iter()
            .filter(|e| e.date.month() == today.month() && e.date.year() == today.year())
            .map(|e| e.amount),
    )
}
