//! Goal arithmetic: monthly targets, progress updates, milestones, and the
//! summary statistics shown above the goal grid.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calc::saturating_sum;
use crate::database::models::{Goal, GoalCategory, Milestone, ProgressEntry, ProgressKind};
use crate::error::FieldErrors;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const DAYS_PER_MONTH: i64 = 30;

pub fn default_milestones() -> Vec<Milestone> {
    vec![
        Milestone::new(25, "Great start!", false),
        Milestone::new(50, "Halfway there!", false),
        Milestone::new(75, "Almost done!", false),
        Milestone::new(100, "Goal achieved!", false),
    ]
}

/// `max(1, ceil(days / 30))`. A target date in the past still yields one month.
pub fn months_remaining(today: NaiveDate, target_date: NaiveDate) -> i64 {
    let days = (target_date - today).num_days();
    // ceil for both signs
    let months = -((-days).div_euclid(DAYS_PER_MONTH));
    months.max(1)
}

/// Amount still to save per month, rounded to cents.
pub fn monthly_target(
    target: Decimal,
    current: Decimal,
    today: NaiveDate,
    target_date: NaiveDate,
) -> Decimal {
    let remaining = target.saturating_sub(current);
    let months = Decimal::from(months_remaining(today, target_date));
    remaining
        .checked_div(months)
        .unwrap_or(remaining)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `current / target * 100`, unclamped. Zero when there is no target.
pub fn progress_percent(current: Decimal, target: Decimal) -> Decimal {
    crate::calc::percent_of(current, target)
}

/// Progress as shown after an explicit update: capped at 100.
pub fn clamped_progress(current: Decimal, target: Decimal) -> Decimal {
    progress_percent(current, target).min(HUNDRED)
}

pub fn next_amount(current: Decimal, kind: ProgressKind, amount: Decimal) -> Decimal {
    match kind {
        ProgressKind::Add => current.saturating_add(amount),
        ProgressKind::Subtract => current.saturating_sub(amount).max(Decimal::ZERO),
        ProgressKind::Set => amount,
    }
}

pub fn refresh_milestones(milestones: &mut [Milestone], progress: Decimal) {
    for m in milestones.iter_mut() {
        m.achieved = progress >= Decimal::from(m.percentage);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub amount: Decimal,
    pub kind: ProgressKind,
    pub note: String,
    pub date: NaiveDate,
}

/// Checks a progress update against the goal before it is applied.
pub fn validate_progress(goal: &Goal, update: &ProgressUpdate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if update.amount <= Decimal::ZERO {
        errors.insert("amount", "Amount must be greater than 0");
    }
    if update.kind == ProgressKind::Subtract && update.amount > goal.current_amount {
        errors.insert("amount", "Cannot subtract more than current amount");
    }
    if update.kind == ProgressKind::Set && update.amount < Decimal::ZERO {
        errors.insert("amount", "Total amount cannot be negative");
    }
    errors.into_result()
}

/// Applies an add/subtract/set update: moves `current_amount`, re-derives the
/// capped progress, re-flags milestones and records a history entry.
pub fn apply_progress(goal: &mut Goal, update: &ProgressUpdate, id: i64, now: DateTime<Utc>) {
    let new_amount = next_amount(goal.current_amount, update.kind, update.amount);
    let progress = clamped_progress(new_amount, goal.target_amount);

    goal.current_amount = new_amount;
    goal.progress = progress;
    goal.updated_at = Some(now);
    refresh_milestones(&mut goal.milestones, progress);
    goal.progress_history.push(ProgressEntry {
        id,
        amount: update.amount,
        kind: update.kind,
        note: update.note.clone(),
        date: update.date,
        new_total: new_amount,
        timestamp: now,
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTier {
    High,
    Medium,
    Low,
}

pub fn progress_tier(progress: Decimal) -> ProgressTier {
    if progress >= Decimal::from(80) {
        ProgressTier::High
    } else if progress >= Decimal::from(50) {
        ProgressTier::Medium
    } else {
        ProgressTier::Low
    }
}

pub fn time_remaining(today: NaiveDate, target_date: NaiveDate) -> String {
    let days = (target_date - today).num_days();
    match days {
        d if d < 0 => "Overdue".to_string(),
        0 => "Due today".to_string(),
        1 => "1 day left".to_string(),
        d if d < 30 => format!("{d} days left"),
        d if d < 365 => format!("{} months left", (d + 29) / 30),
        d => format!("{} years left", (d + 364) / 365),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalStats {
    pub total_goals: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub total_target: Decimal,
    pub total_current: Decimal,
    pub total_progress: Decimal,
    pub average_progress: Decimal,
}

pub fn goal_stats(goals: &[Goal]) -> GoalStats {
    let total_goals = goals.len();
    let completed = goals.iter().filter(|g| g.progress >= HUNDRED).count();
    let in_progress = goals
        .iter()
        .filter(|g| g.progress > Decimal::ZERO && g.progress < HUNDRED)
        .count();
    let not_started = goals.iter().filter(|g| g.progress.is_zero()).count();
    let total_target = saturating_sum(goals.iter().map(|g| g.target_amount));
    let total_current = saturating_sum(goals.iter().map(|g| g.current_amount));

    let (total_progress, average_progress) = if total_goals == 0 {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let avg = saturating_sum(goals.iter().map(|g| g.progress)) / Decimal::from(total_goals);
        (progress_percent(total_current, total_target), avg)
    };

    GoalStats {
        total_goals,
        completed,
        in_progress,
        not_started,
        total_target,
        total_current,
        total_progress,
        average_progress,
    }
}

/// Raw goal form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalForm {
    pub title: String,
    pub description: String,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: String,
    pub category: Option<GoalCategory>,
    pub icon: String,
    pub motivation_message: String,
    pub monthly_target: String,
}

impl GoalForm {
    pub fn blank() -> Self {
        Self {
            current_amount: "0".into(),
            icon: "Target".into(),
            ..Default::default()
        }
    }

    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            title: goal.title.clone(),
            description: goal.description.clone(),
            target_amount: goal.target_amount.to_string(),
            current_amount: goal.current_amount.to_string(),
            target_date: crate::calc::format::iso(&goal.target_date),
            category: Some(goal.category),
            icon: goal.icon.clone(),
            motivation_message: goal.motivation_message.clone(),
            monthly_target: goal.monthly_target.to_string(),
        }
    }

    /// Re-derives the monthly target field after the amount or date changed.
    /// Does nothing until both a target amount and a date are present.
    pub fn recalculate_monthly_target(&mut self, today: NaiveDate) {
        let (Some(target), Some(date)) = (
            crate::calc::format::parse_money(&self.target_amount),
            crate::calc::format::parse_date(&self.target_date),
        ) else {
            return;
        };
        let current = crate::calc::format::parse_money(&self.current_amount).unwrap_or_default();
        let monthly = monthly_target(target, current, today, date);
        self.monthly_target = crate::calc::format::fixed2(&monthly);
    }

    /// `require_future` is set by the create form; the edit form accepts any date.
    pub fn validate(&self, today: NaiveDate, require_future: bool) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.insert("title", "Goal title is required");
        }
        match crate::calc::format::parse_money(&self.target_amount) {
            Some(t) if t > Decimal::ZERO => {}
            None if crate::calc::format::is_oversized(&self.target_amount) => {
                errors.insert("targetAmount", "Target amount is too large")
            }
            _ => errors.insert("targetAmount", "Target amount must be greater than 0"),
        }
        if !self.current_amount.trim().is_empty() {
            match crate::calc::format::parse_money(&self.current_amount) {
                Some(c) if c < Decimal::ZERO => errors.insert("currentAmount", "Current amount cannot be negative"),
                Some(_) => {}
                None if crate::calc::format::is_oversized(&self.current_amount) => {
                    errors.insert("currentAmount", "Current amount is too large")
                }
                None => errors.insert("currentAmount", "Current amount must be a number"),
            }
        }
        if self.target_date.trim().is_empty() {
            errors.insert("targetDate", "Target date is required");
        } else if require_future {
            match crate::calc::format::parse_date(&self.target_date) {
                Some(d) if d > today => {}
                _ => errors.insert("targetDate", "Target date must be in the future"),
            }
        } else if crate::calc::format::parse_date(&self.target_date).is_none() {
            errors.insert("targetDate", "Target date is required");
        }
        if self.category.is_none() {
            errors.insert("category", "Please select a category");
        }
        errors.into_result()
    }
}
