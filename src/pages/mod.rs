//! Page state containers. Each page owns its records, seeded fresh when the
//! page is mounted; nothing is shared between pages except local storage.

pub mod dashboard;
pub mod expenses;
pub mod goals;
pub mod login;
pub mod not_found;
pub mod quick_expense;
pub mod registration;
pub mod timeline;

pub use dashboard::DashboardPage;
pub use expenses::ExpensesPage;
pub use goals::GoalsPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use quick_expense::QuickExpenseForm;
pub use registration::RegistrationPage;
pub use timeline::TimelinePage;

use chrono::{DateTime, Utc};

use crate::router::Page;

/// The mounted page. Switching routes drops the old state and mounts the new
/// page from its seed data.
#[derive(Debug)]
pub enum Mounted {
    Dashboard(DashboardPage),
    Expenses(ExpensesPage),
    Timeline(TimelinePage),
    Goals(GoalsPage),
    Login(LoginPage),
    Registration(RegistrationPage),
    NotFound(NotFoundPage),
}

impl Mounted {
    pub fn mount(page: Page, path: &str, now: DateTime<Utc>) -> Self {
        match page {
            Page::Dashboard => Mounted::Dashboard(DashboardPage::mount()),
            Page::ExpenseEntryAndManagement => Mounted::Expenses(ExpensesPage::mount(now.date_naive())),
            Page::FinancialStoryTimeline => Mounted::Timeline(TimelinePage::mount()),
            Page::GoalSettingAndPlanning => Mounted::Goals(GoalsPage::mount()),
            Page::Login => Mounted::Login(LoginPage::mount()),
            Page::Registration => Mounted::Registration(RegistrationPage::mount()),
            Page::NotFound => Mounted::NotFound(NotFoundPage::mount(path)),
        }
    }

    pub fn page(&self) -> Page {
        match self {
            Mounted::Dashboard(_) => Page::Dashboard,
            Mounted::Expenses(_) => Page::ExpenseEntryAndManagement,
            Mounted::Timeline(_) => Page::FinancialStoryTimeline,
            Mounted::Goals(_) => Page::GoalSettingAndPlanning,
            Mounted::Login(_) => Page::Login,
            Mounted::Registration(_) => Page::Registration,
            Mounted::NotFound(_) => Page::NotFound,
        }
    }

    /// Name shown in the authenticated header, if the page has one.
    pub fn header_user(&self) -> Option<&crate::database::models::User> {
        match self {
            Mounted::Dashboard(p) => p.header_user(),
            Mounted::Expenses(p) => p.user.as_ref(),
            Mounted::Timeline(p) => p.user.as_ref(),
            Mounted::Goals(p) => p.user.as_ref(),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        match self {
            Mounted::Dashboard(p) => p.is_loading,
            Mounted::Expenses(p) => p.is_submitting || p.receipt.as_ref().is_some_and(|r| r.is_processing),
            Mounted::Goals(p) => p.is_submitting,
            Mounted::Login(p) => p.is_loading,
            Mounted::Registration(p) => p.is_loading,
            Mounted::Timeline(_) | Mounted::NotFound(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::resolve;

    #[test]
    fn every_route_mounts_its_page() {
        let now = Utc::now();
        for (path, page) in crate::router::ROUTES {
            assert_eq!(Mounted::mount(page, path, now).page(), page);
        }
        let missing = Mounted::mount(resolve("/nope"), "/nope", now);
        assert_eq!(missing.page(), Page::NotFound);
    }
}
