//! Floating "quick expense" form available on every authenticated page.

use chrono::NaiveDate;
use tracing::info;

use crate::calc::format::{iso, parse_date, parse_money};
use crate::database::models::{ExpenseSource, NewExpense};
use crate::latency::{Latency, DEFAULT_DELAY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickExpenseForm {
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub is_submitting: bool,
}

impl QuickExpenseForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            category: String::new(),
            date: iso(&today),
            is_submitting: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.amount.is_empty() && !self.description.is_empty() && !self.category.is_empty()
    }

    /// `None` when a required field is missing or unparseable; the form is
    /// left as typed in that case.
    pub async fn submit(&mut self, latency: &Latency, today: NaiveDate) -> Option<NewExpense> {
        if !self.is_valid() || self.is_submitting {
            return None;
        }
        let amount = parse_money(&self.amount)?;

        self.is_submitting = true;
        latency.simulate(DEFAULT_DELAY).await;
        self.is_submitting = false;

        let expense = NewExpense {
            amount,
            description: self.description.clone(),
            category: self.category.clone(),
            date: parse_date(&self.date).unwrap_or(today),
            narrative: None,
            is_recurring: false,
            story_impact: None,
            source: ExpenseSource::Manual,
        };
        info!(amount = %expense.amount, category = %expense.category, "quick expense submitted");
        *self = Self::new(today);
        Some(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn requires_amount_description_and_category() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
        let mut form = QuickExpenseForm::new(today);
        form.amount = "12.50".into();
        form.description = "Coffee".into();
        assert!(form.submit(&Latency::none(), today).await.is_none());

        form.category = "food".into();
        let expense = form.submit(&Latency::none(), today).await.unwrap();
        assert_eq!(expense.amount.to_string(), "12.50");
        assert_eq!(expense.date, today);
        assert!(form.amount.is_empty());
    }
}
