use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekdays,
    Weekly,
    Monthly,
    Occasional,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekdays => "weekdays",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Occasional => "occasional",
        }
    }
}

/// One-tap expense preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub icon: String,
    pub frequency: Option<Frequency>,
    pub story_context: String,
    pub is_custom: bool,
}
