use chrono::{DateTime, Utc};
use tracing::info;

use crate::auth;
use crate::database::models::{Alert, ChapterPhase, FinancialChapter, Metric, MonthlySummary, User};
use crate::database::seed;
use crate::latency::{Latency, DEFAULT_DELAY};
use crate::router;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    /// `None` opens the quick expense form instead of navigating.
    pub route: Option<&'static str>,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction { title: "Add Expense", description: "Record a new expense", route: None },
    QuickAction { title: "My Story", description: "View financial timeline", route: Some(router::TIMELINE) },
    QuickAction { title: "Set Goals", description: "Plan your future", route: Some(router::GOALS) },
    QuickAction {
        title: "Manage Expenses",
        description: "Review & categorize",
        route: Some(router::EXPENSES),
    },
];

#[derive(Debug, Clone)]
pub struct DashboardPage {
    pub user: Option<User>,
    pub is_loading: bool,
    pub alerts: Vec<Alert>,
    pub summary: MonthlySummary,
    pub chapters: Vec<FinancialChapter>,
    pub metrics: Vec<Metric>,
    mock_user: User,
}

impl DashboardPage {
    /// Mounts in the loading state; call [`DashboardPage::load`] next.
    pub fn mount() -> Self {
        Self {
            user: None,
            is_loading: true,
            alerts: Vec::new(),
            summary: seed::monthly_summary(),
            chapters: seed::financial_chapters(),
            metrics: seed::metrics(),
            mock_user: seed::dashboard_user(),
        }
    }

    pub async fn load(&mut self, latency: &Latency, now: DateTime<Utc>) {
        latency.simulate(DEFAULT_DELAY).await;
        self.user = Some(self.mock_user.clone());
        self.alerts = seed::alerts(now);
        self.is_loading = false;
        info!(alerts = self.alerts.len(), "dashboard loaded");
    }

    /// While loading, the header still shows the mock user.
    pub fn header_user(&self) -> Option<&User> {
        if self.is_loading {
            Some(&self.mock_user)
        } else {
            self.user.as_ref()
        }
    }

    pub fn greeting(&self) -> String {
        let first = self.user.as_ref().map(User::first_name).unwrap_or("User");
        format!("Welcome back, {first}! 👋")
    }

    pub fn dismiss_alert(&mut self, id: i64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        before != self.alerts.len()
    }

    /// Route for an alert action button. Labels without a destination only
    /// get logged.
    pub fn alert_action(&self, alert_id: i64, label: &str) -> Option<&'static str> {
        info!(alert_id, label, "alert action");
        match label {
            "View Progress" => Some(router::TIMELINE),
            "Review Expenses" => Some(router::EXPENSES),
            "Adjust Goal" => Some(router::GOALS),
            _ => None,
        }
    }

    pub fn chapter_details(&self, chapter: &FinancialChapter) -> &'static str {
        match chapter.phase {
            ChapterPhase::Past | ChapterPhase::Present => router::TIMELINE,
            ChapterPhase::Future => router::GOALS,
        }
    }

    pub fn logout(&mut self) -> &'static str {
        auth::logout(&mut self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn loads_user_and_alerts() {
        let mut page = DashboardPage::mount();
        assert!(page.is_loading);
        assert!(page.alerts.is_empty());
        assert_eq!(page.header_user().map(|u| u.first_name()), Some("Yousif"));

        page.load(&Latency::none(), Utc::now()).await;
        assert!(!page.is_loading);
        assert_eq!(page.alerts.len(), 3);
        assert_eq!(page.greeting(), "Welcome back, Yousif! 👋");
    }

    #[tokio::test]
    async fn dismiss_and_route_alerts() {
        let mut page = DashboardPage::mount();
        page.load(&Latency::none(), Utc::now()).await;

        assert!(page.dismiss_alert(2));
        assert!(!page.dismiss_alert(2));
        assert_eq!(page.alerts.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);

        assert_eq!(page.alert_action(1, "View Progress"), Some("/financial-story-timeline"));
        assert_eq!(page.alert_action(2, "Review Expenses"), Some("/expense-entry-and-management"));
        assert_eq!(page.alert_action(1, "Adjust Goal"), Some("/goal-setting-and-planning"));
        assert_eq!(page.alert_action(2, "Adjust Budget"), None);
    }

    #[test]
    fn chapter_routes_by_phase() {
        let page = DashboardPage::mount();
        let routes: Vec<_> = page.chapters.iter().map(|c| page.chapter_details(c)).collect();
        assert_eq!(
            routes,
            vec!["/financial-story-timeline", "/financial-story-timeline", "/goal-setting-and-planning"]
        );
    }

    #[tokio::test]
    async fn logout_clears_user() {
        let mut page = DashboardPage::mount();
        page.load(&Latency::none(), Utc::now()).await;
        assert_eq!(page.logout(), "/login");
        assert!(page.header_user().is_none());
        assert_eq!(page.greeting(), "Welcome back, User! 👋");
    }
}
