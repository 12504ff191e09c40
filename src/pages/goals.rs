//! Goal planning: the goal grid, its filters and the create / edit / progress
//! handlers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::calc::format::{parse_date, parse_money};
use crate::calc::goal::{
    apply_progress, default_milestones, goal_stats, progress_percent, validate_progress, GoalForm, GoalStats,
    ProgressUpdate,
};
use crate::calc::narrative::goal_story;
use crate::database::models::{Goal, GoalCategory, IdClock, User};
use crate::database::seed;
use crate::error::FieldErrors;
use crate::latency::{Latency, DEFAULT_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalSort {
    Progress,
    Amount,
    Date,
    Name,
}

impl GoalSort {
    pub const ALL: [GoalSort; 4] = [Self::Progress, Self::Amount, Self::Date, Self::Name];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Progress => "Progress",
            Self::Amount => "Target Amount",
            Self::Date => "Target Date",
            Self::Name => "Name",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoalsPage {
    pub user: Option<User>,
    pub goals: Vec<Goal>,
    /// `None` shows every category.
    pub selected_category: Option<GoalCategory>,
    pub sort_by: GoalSort,
    pub is_submitting: bool,
    ids: IdClock,
}

impl GoalsPage {
    pub fn mount() -> Self {
        Self {
            user: Some(seed::page_user()),
            goals: seed::goals(),
            selected_category: None,
            sort_by: GoalSort::Progress,
            is_submitting: false,
            ids: IdClock::default(),
        }
    }

    pub fn goal(&self, id: i64) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn category_counts(&self) -> BTreeMap<GoalCategory, usize> {
        let mut counts = BTreeMap::new();
        for g in &self.goals {
            *counts.entry(g.category).or_insert(0) += 1;
        }
        counts
    }

    pub fn visible_goals(&self) -> Vec<&Goal> {
        let mut goals: Vec<&Goal> = self
            .goals
            .iter()
            .filter(|g| self.selected_category.map_or(true, |c| g.category == c))
            .collect();
        match self.sort_by {
            GoalSort::Progress => goals.sort_by(|a, b| b.progress.cmp(&a.progress)),
            GoalSort::Amount => goals.sort_by(|a, b| b.target_amount.cmp(&a.target_amount)),
            GoalSort::Date => goals.sort_by_key(|g| g.target_date),
            GoalSort::Name => goals.sort_by_key(|g| g.title.to_lowercase()),
        }
        goals
    }

    pub fn empty_message(&self) -> String {
        match self.selected_category {
            None => "Start your financial journey by creating your first goal.".to_string(),
            Some(c) => format!("No goals found in the {} category.", c.as_str()),
        }
    }

    pub fn stats(&self) -> GoalStats {
        goal_stats(&self.goals)
    }

    /// Validates the create form, waits, then appends the goal. Progress is
    /// derived unclamped from the typed amounts.
    pub async fn create_goal(&mut self, form: &GoalForm, latency: &Latency, now: DateTime<Utc>) -> Result<i64, FieldErrors> {
        form.validate(now.date_naive(), true)?;
        let parsed = ParsedForm::from(form)?;

        self.is_submitting = true;
        latency.simulate(DEFAULT_DELAY).await;
        self.is_submitting = false;

        let id = self.ids.next(now);
        let goal = Goal {
            id,
            title: form.title.clone(),
            description: form.description.clone(),
            category: parsed.category,
            icon: form.icon.clone(),
            target_amount: parsed.target,
            current_amount: parsed.current,
            progress: progress_percent(parsed.current, parsed.target),
            target_date: parsed.target_date,
            monthly_target: parsed.monthly_target,
            motivation_message: form.motivation_message.clone(),
            story_narrative: goal_story(parsed.category, &parsed.target),
            milestones: default_milestones(),
            progress_history: Vec::new(),
            created_at: now,
            updated_at: None,
        };
        info!(id, title = %goal.title, target = %goal.target_amount, "goal created");
        self.goals.push(goal);
        Ok(id)
    }

    /// Replaces the editable fields of goal `id`. `progress` and the narrative
    /// are re-derived; milestones and history are kept as they were.
    pub async fn update_goal(
        &mut self,
        id: i64,
        form: &GoalForm,
        latency: &Latency,
        now: DateTime<Utc>,
    ) -> Result<bool, FieldErrors> {
        form.validate(now.date_naive(), false)?;
        let parsed = ParsedForm::from(form)?;

        self.is_submitting = true;
        latency.simulate(DEFAULT_DELAY).await;
        self.is_submitting = false;

        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(false);
        };
        goal.title = form.title.clone();
        goal.description = form.description.clone();
        goal.category = parsed.category;
        goal.icon = form.icon.clone();
        goal.target_amount = parsed.target;
        goal.current_amount = parsed.current;
        goal.progress = progress_percent(parsed.current, parsed.target);
        goal.target_date = parsed.target_date;
        goal.monthly_target = parsed.monthly_target;
        goal.motivation_message = form.motivation_message.clone();
        goal.story_narrative = goal_story(parsed.category, &parsed.target);
        goal.updated_at = Some(now);
        info!(id, progress = %goal.progress, "goal updated");
        Ok(true)
    }

    pub async fn delete_goal(&mut self, id: i64, latency: &Latency) -> bool {
        self.is_submitting = true;
        latency.simulate(DEFAULT_DELAY).await;
        self.is_submitting = false;

        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        let removed = before != self.goals.len();
        if removed {
            info!(id, "goal deleted");
        }
        removed
    }

    /// Add / subtract / set on goal `id`. `Ok(false)` when the goal is gone.
    pub async fn update_progress(
        &mut self,
        id: i64,
        update: &ProgressUpdate,
        latency: &Latency,
        now: DateTime<Utc>,
    ) -> Result<bool, FieldErrors> {
        let Some(goal) = self.goal(id) else {
            return Ok(false);
        };
        validate_progress(goal, update)?;

        self.is_submitting = true;
        latency.simulate(DEFAULT_DELAY).await;
        self.is_submitting = false;

        let entry_id = self.ids.next(now);
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(false);
        };
        apply_progress(goal, update, entry_id, now);
        info!(id, kind = ?update.kind, new_total = %goal.current_amount, "goal progress updated");
        Ok(true)
    }

    pub fn logout(&mut self) -> &'static str {
        crate::auth::logout(&mut self.user)
    }
}

/// Typed values out of a form that already passed validation.
struct ParsedForm {
    category: GoalCategory,
    target: Decimal,
    current: Decimal,
    target_date: chrono::NaiveDate,
    monthly_target: Decimal,
}

impl ParsedForm {
    fn from(form: &GoalForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let target = parse_money(&form.target_amount);
        let target_date = parse_date(&form.target_date);
        if target.is_none() {
            errors.insert("targetAmount", "Target amount must be greater than 0");
        }
        if target_date.is_none() {
            errors.insert("targetDate", "Target date is required");
        }
        if form.category.is_none() {
            errors.insert("category", "Please select a category");
        }
        match (target, target_date, form.category) {
            (Some(target), Some(target_date), Some(category)) => Ok(Self {
                category,
                target,
                current: parse_money(&form.current_amount).unwrap_or_default(),
                target_date,
                monthly_target: parse_money(&form.monthly_target).unwrap_or_default(),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::ProgressKind;
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn trip_form() -> GoalForm {
        GoalForm {
            title: "Japan Trip".into(),
            target_amount: "5000".into(),
            current_amount: "1000".into(),
            target_date: "2025-10-28".into(),
            category: Some(GoalCategory::Travel),
            ..GoalForm::blank()
        }
    }

    #[test]
    fn default_sort_is_progress_descending() {
        let page = GoalsPage::mount();
        let titles: Vec<_> = page.visible_goals().iter().map(|g| g.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["New Car Fund", "Emergency Fund", "European Adventure", "Home Down Payment", "Master's Degree"]
        );
    }

    #[test]
    fn filter_and_other_sorts() {
        let mut page = GoalsPage::mount();
        page.sort_by = GoalSort::Date;
        assert_eq!(page.visible_goals()[0].title, "New Car Fund");
        page.sort_by = GoalSort::Amount;
        assert_eq!(page.visible_goals()[0].title, "Home Down Payment");
        page.sort_by = GoalSort::Name;
        assert_eq!(page.visible_goals()[0].title, "Emergency Fund");

        page.selected_category = Some(GoalCategory::Travel);
        assert_eq!(page.visible_goals().len(), 1);
        page.selected_category = Some(GoalCategory::Debt);
        assert!(page.visible_goals().is_empty());
        assert_eq!(page.empty_message(), "No goals found in the debt category.");

        assert_eq!(page.category_counts().get(&GoalCategory::Emergency), Some(&1));
    }

    #[tokio::test]
    async fn create_appends_with_derived_fields() {
        let mut page = GoalsPage::mount();
        let mut form = trip_form();
        form.recalculate_monthly_target(now().date_naive());
        let id = page.create_goal(&form, &Latency::none(), now()).await.unwrap();

        let goal = page.goal(id).unwrap();
        assert_eq!(page.goals.len(), 6);
        assert_eq!(goal.progress, dec("20"));
        assert_eq!(goal.monthly_target, dec("400.00"));
        assert_eq!(goal.milestones.len(), 4);
        assert!(goal.story_narrative.contains("$5,000"));
    }

    #[tokio::test]
    async fn extreme_amounts_are_rejected_or_stay_in_range() {
        let mut page = GoalsPage::mount();
        let mut form = trip_form();
        form.target_amount = "0.0000001".into();
        form.current_amount = "100000000000000000000000".into();
        let err = page.create_goal(&form, &Latency::none(), now()).await.unwrap_err();
        assert_eq!(err.get("currentAmount"), Some("Current amount is too large"));

        form.current_amount = "1000000000000".into();
        let id = page.create_goal(&form, &Latency::none(), now()).await.unwrap();
        assert_eq!(page.goal(id).unwrap().progress, dec("1000000000000000000000"));
        assert_eq!(page.stats().total_goals, 6);
    }

    #[tokio::test]
    async fn create_rejects_past_dates_but_edit_accepts_them() {
        let mut page = GoalsPage::mount();
        let mut form = trip_form();
        form.target_date = "2024-06-01".into();
        let err = page.create_goal(&form, &Latency::none(), now()).await.unwrap_err();
        assert_eq!(err.get("targetDate"), Some("Target date must be in the future"));

        assert_eq!(page.update_goal(1, &form, &Latency::none(), now()).await, Ok(true));
        let goal = page.goal(1).unwrap();
        assert_eq!(goal.target_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(goal.progress, dec("20"));
        assert!(goal.updated_at.is_some());
    }

    #[tokio::test]
    async fn edit_keeps_progress_unclamped() {
        let mut page = GoalsPage::mount();
        let form = GoalForm { target_amount: "500".into(), current_amount: "750".into(), ..trip_form() };
        page.update_goal(2, &form, &Latency::none(), now()).await.unwrap();
        assert_eq!(page.goal(2).unwrap().progress, dec("150"));
    }

    #[tokio::test]
    async fn progress_update_and_delete() {
        let mut page = GoalsPage::mount();
        let update = ProgressUpdate {
            amount: dec("6500"),
            kind: ProgressKind::Add,
            note: "Bonus".into(),
            date: now().date_naive(),
        };
        assert_eq!(page.update_progress(1, &update, &Latency::none(), now()).await, Ok(true));
        let goal = page.goal(1).unwrap();
        assert_eq!(goal.current_amount, dec("15000"));
        assert_eq!(goal.progress, dec("100"));
        assert!(goal.milestones.iter().all(|m| m.achieved));
        assert_eq!(goal.progress_history.len(), 3);

        let too_much = ProgressUpdate { kind: ProgressKind::Subtract, amount: dec("20000"), ..update };
        let err = page.update_progress(1, &too_much, &Latency::none(), now()).await.unwrap_err();
        assert_eq!(err.get("amount"), Some("Cannot subtract more than current amount"));

        assert!(page.delete_goal(1, &Latency::none()).await);
        assert!(!page.delete_goal(1, &Latency::none()).await);
        assert_eq!(page.goals.len(), 4);
    }
}
