//! Fixed sentence tables keyed by category. Purely cosmetic.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calc::format::fmt_money_whole;
use crate::database::models::GoalCategory;

pub fn goal_story(category: GoalCategory, target_amount: &Decimal) -> String {
    let amount = fmt_money_whole(target_amount);
    match category {
        GoalCategory::Emergency => format!(
            "Building your financial safety net of {amount} will give you peace of mind and security for unexpected life events."
        ),
        GoalCategory::Travel => format!(
            "Your dream adventure awaits! Save {amount} to create unforgettable memories and explore new horizons."
        ),
        GoalCategory::Home => format!(
            "Every dollar saved brings you closer to the keys of your dream home. Your future self will thank you for this {amount} investment."
        ),
        GoalCategory::Education => format!(
            "Investing in knowledge pays the best interest. Your {amount} education goal is an investment in your future success."
        ),
        GoalCategory::Retirement => format!(
            "Your future retired self is counting on today's decisions. This {amount} goal is building your freedom and comfort."
        ),
        GoalCategory::Investment => format!(
            "Growing your wealth through smart investments. This {amount} goal will compound into your financial independence."
        ),
        GoalCategory::Debt => format!(
            "Breaking free from debt chains! Paying off {amount} will liberate your financial future and reduce stress."
        ),
        GoalCategory::Vehicle => format!(
            "Your reliable transportation solution is within reach. Save {amount} for the vehicle that fits your lifestyle."
        ),
        GoalCategory::Health => format!(
            "Investing in your health is investing in your quality of life. This {amount} goal supports your wellbeing journey."
        ),
        GoalCategory::Other => format!(
            "Every great achievement starts with a decision to try. Your {amount} goal represents your commitment to success."
        ),
    }
}

pub fn category_theme(category_id: &str) -> &'static str {
    match category_id {
        "food" => "Nourishment & Social Connections",
        "transport" => "Journey & Movement",
        "shopping" => "Lifestyle & Choices",
        "entertainment" => "Joy & Experiences",
        "bills" => "Stability & Responsibility",
        "healthcare" => "Wellness & Care",
        "education" => "Growth & Learning",
        "other" => "Life's Surprises",
        _ => "Personal Expression",
    }
}

/// Sentence attached to a freshly entered expense.
pub fn expense_story_impact(category_name: Option<&str>, amount: &Decimal) -> String {
    if *amount > Decimal::ONE_HUNDRED {
        let share = (*amount / Decimal::from(2000) * Decimal::ONE_HUNDRED).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        format!(
            "This {} represents a significant chapter in your financial story, potentially affecting your monthly budget by {:.1}%.",
            category_name.unwrap_or("expense"),
            share
        )
    } else {
        format!(
            "A small but meaningful addition to your {} story, contributing to your daily financial narrative.",
            category_name.unwrap_or("spending")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_story_embeds_amount() {
        let s = goal_story(GoalCategory::Travel, &Decimal::from(8000));
        assert!(s.starts_with("Your dream adventure awaits! Save $8,000"));
    }

    #[test]
    fn unknown_category_theme_falls_back() {
        assert_eq!(category_theme("food"), "Nourishment & Social Connections");
        assert_eq!(category_theme("custom_1"), "Personal Expression");
    }

    #[test]
    fn story_impact_switches_on_hundred() {
        let big = expense_story_impact(Some("Bills & Utilities"), &Decimal::from(125));
        assert!(big.contains("significant chapter"));
        assert!(big.ends_with("by 6.3%."), "{big}");

        let small = expense_story_impact(None, &Decimal::from(100));
        assert!(small.contains("your spending story"));
    }
}
