use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timeline::ChapterPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Warning,
    Info,
    Error,
    Goal,
    Milestone,
}

impl AlertKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
            Self::Error => "✖",
            Self::Goal => "◎",
            Self::Milestone => "🏆",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertAction {
    pub label: String,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub context: String,
    pub progress: Option<u32>,
    pub timestamp: DateTime<Utc>,
    pub actions: Vec<AlertAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub kind: String,
    pub label: String,
    pub value: String,
    pub trend: Trend,
    pub change: String,
    pub description: String,
    pub progress: u32,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterMetric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialChapter {
    pub id: String,
    pub phase: ChapterPhase,
    pub title: String,
    pub period: String,
    pub progress: u32,
    pub narrative: String,
    pub metrics: Vec<ChapterMetric>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub title: String,
    pub period: String,
    pub mood: Mood,
    pub score: u32,
    pub narrative: String,
    pub achievements: Vec<String>,
    pub challenges: Vec<String>,
    pub insight: String,
    pub headline_metric: String,
    pub headline_description: String,
}
