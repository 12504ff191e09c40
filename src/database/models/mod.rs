pub mod category;
pub mod dashboard;
pub mod expense;
pub mod goal;
pub mod template;
pub mod timeline;
pub mod user;

pub use category::{Category, CategoryUpdate};
pub use dashboard::{Alert, AlertAction, AlertKind, FinancialChapter, Metric, MonthlySummary, Mood, Trend};
pub use expense::{Expense, ExpenseSource, NewExpense};
pub use goal::{Goal, GoalCategory, Milestone, ProgressEntry, ProgressKind};
pub use template::{Frequency, QuickTemplate};
pub use timeline::{ChapterPhase, EventKind, GoalProgressRow, StoryChapter, TimelineEvent, TimelineSummary};
pub use user::User;

use chrono::{DateTime, Utc};

/// Hands out millisecond-timestamp ids that never repeat, even when two
/// records are created within the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdClock {
    last: i64,
}

impl IdClock {
    pub fn next(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last + 1);
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let now = Utc::now();
        let mut clock = IdClock::default();
        let a = clock.next(now);
        let b = clock.next(now);
        assert_eq!(a, now.timestamp_millis());
        assert_eq!(b, a + 1);
    }
}
