use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Expense,
    Income,
    Savings,
}

/// Static, display-only entry on the story timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: i64,
    pub date: NaiveDate,
    pub title: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub amount: Decimal,
    pub story_text: String,
    pub location: String,
    pub payment_method: String,
    pub tags: Vec<String>,
    pub insights: String,
    pub is_milestone: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterPhase {
    Past,
    Present,
    Future,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryChapter {
    pub id: String,
    pub title: String,
    pub phase: ChapterPhase,
    pub period: String,
    pub summary: String,
    pub event_count: u32,
    pub total_amount: Decimal,
    pub highlights: Vec<String>,
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressRow {
    pub name: String,
    pub current: Decimal,
    pub target: Decimal,
    pub percentage: u32,
    pub time_left: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSummary {
    pub period: String,
    pub total_events: u32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_savings: Decimal,
    pub income_growth: i32,
    pub expense_growth: i32,
    pub savings_rate: u32,
    pub milestones: u32,
    pub new_milestones: u32,
    pub story_narrative: String,
    pub story_tags: Vec<String>,
    pub goal_progress: Vec<GoalProgressRow>,
}
