use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where an expense came from. Manual entries are the common case; receipt and
/// template entries carry extra provenance for the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", tag = "kind", content = "templateId")]
pub enum ExpenseSource {
    #[default]
    Manual,
    Receipt,
    Template(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub narrative: Option<String>,
    pub is_recurring: bool,
    pub timestamp: DateTime<Utc>,
    pub story_impact: Option<String>,
    pub source: ExpenseSource,
}

/// Expense payload before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub narrative: Option<String>,
    pub is_recurring: bool,
    pub story_impact: Option<String>,
    pub source: ExpenseSource,
}

impl NewExpense {
    pub fn into_expense(self, id: i64, timestamp: DateTime<Utc>) -> Expense {
        Expense {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
            narrative: self.narrative,
            is_recurring: self.is_recurring,
            timestamp,
            story_impact: self.story_impact,
            source: self.source,
        }
    }
}
