use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Emergency,
    Travel,
    Home,
    Education,
    Retirement,
    Investment,
    Debt,
    Vehicle,
    Health,
    Other,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 10] = [
        Self::Emergency,
        Self::Travel,
        Self::Home,
        Self::Education,
        Self::Retirement,
        Self::Investment,
        Self::Debt,
        Self::Vehicle,
        Self::Health,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Travel => "travel",
            Self::Home => "home",
            Self::Education => "education",
            Self::Retirement => "retirement",
            Self::Investment => "investment",
            Self::Debt => "debt",
            Self::Vehicle => "vehicle",
            Self::Health => "health",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Emergency => "🛡️ Emergency Fund",
            Self::Travel => "✈️ Travel & Vacation",
            Self::Home => "🏠 Home & Property",
            Self::Education => "🎓 Education",
            Self::Retirement => "🏖️ Retirement",
            Self::Investment => "📈 Investment",
            Self::Debt => "💳 Debt Payoff",
            Self::Vehicle => "🚗 Vehicle",
            Self::Health => "🏥 Health & Wellness",
            Self::Other => "🎯 Other Goal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub percentage: u32,
    pub description: String,
    pub achieved: bool,
}

impl Milestone {
    pub fn new(percentage: u32, description: &str, achieved: bool) -> Self {
        Self { percentage, description: description.to_string(), achieved }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressKind {
    Add,
    Subtract,
    Set,
}

impl ProgressKind {
    pub const ALL: [ProgressKind; 3] = [ProgressKind::Add, ProgressKind::Subtract, ProgressKind::Set];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Set => "set",
        }
    }

    /// Case-insensitive; anything but the three kind names is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|k| k.as_str().eq_ignore_ascii_case(s))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Add => "➕ Add Money",
            Self::Subtract => "➖ Subtract Money",
            Self::Set => "🎯 Set Total Amount",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub id: i64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: ProgressKind,
    pub note: String,
    pub date: NaiveDate,
    pub new_total: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// A savings goal. `progress` and `monthly_target` are stored alongside the
/// amounts and only refreshed by the handlers that explicitly recompute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    pub icon: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub progress: Decimal,
    pub target_date: NaiveDate,
    pub monthly_target: Decimal,
    pub motivation_message: String,
    pub story_narrative: String,
    pub milestones: Vec<Milestone>,
    pub progress_history: Vec<ProgressEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
