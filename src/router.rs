//! Client routes: a fixed path table, header navigation and breadcrumbs.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    GoalSettingAndPlanning,
    Registration,
    ExpenseEntryAndManagement,
    Login,
    FinancialStoryTimeline,
    NotFound,
}

pub const DASHBOARD: &str = "/dashboard";
pub const GOALS: &str = "/goal-setting-and-planning";
pub const REGISTRATION: &str = "/registration";
pub const EXPENSES: &str = "/expense-entry-and-management";
pub const LOGIN: &str = "/login";
pub const TIMELINE: &str = "/financial-story-timeline";

pub const ROUTES: [(&str, Page); 7] = [
    ("/", Page::Dashboard),
    (DASHBOARD, Page::Dashboard),
    (GOALS, Page::GoalSettingAndPlanning),
    (REGISTRATION, Page::Registration),
    (EXPENSES, Page::ExpenseEntryAndManagement),
    (LOGIN, Page::Login),
    (TIMELINE, Page::FinancialStoryTimeline),
];

/// Exact match against the route table. Trailing slashes, query strings and
/// case variations are all "not found".
pub fn resolve(path: &str) -> Page {
    ROUTES
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, page)| *page)
        .unwrap_or(Page::NotFound)
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::GoalSettingAndPlanning => "Goals",
            Page::Registration => "Create Account",
            Page::ExpenseEntryAndManagement => "Expenses",
            Page::Login => "Sign In",
            Page::FinancialStoryTimeline => "My Story",
            Page::NotFound => "Not Found",
        }
    }

    /// Pages rendered under the authenticated header.
    pub fn has_header(&self) -> bool {
        matches!(
            self,
            Page::Dashboard
                | Page::GoalSettingAndPlanning
                | Page::ExpenseEntryAndManagement
                | Page::FinancialStoryTimeline
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem { path: DASHBOARD, label: "Dashboard", description: "Financial overview and insights" },
    NavItem { path: TIMELINE, label: "My Story", description: "Your financial journey timeline" },
    NavItem { path: GOALS, label: "Goals", description: "Plan your financial future" },
    NavItem { path: EXPENSES, label: "Expenses", description: "Track and manage spending" },
];

pub fn is_active(item: &NavItem, current_path: &str) -> bool {
    item.path == current_path
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub path: &'static str,
    pub label: &'static str,
    pub current: bool,
}

const CRUMBS: [(&str, &str); 8] = [
    (DASHBOARD, "Dashboard"),
    (TIMELINE, "My Story"),
    (GOALS, "Goals"),
    (EXPENSES, "Expenses"),
    (LOGIN, "Sign In"),
    (REGISTRATION, "Create Account"),
    ("/profile", "Profile"),
    ("/settings", "Settings"),
];

/// Breadcrumb trail for `path`. Always rooted at Dashboard; each cumulative
/// path prefix with a known label adds a crumb, the last segment being current.
pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    if path == DASHBOARD {
        return vec![Crumb { path: DASHBOARD, label: "Dashboard", current: true }];
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut crumbs = vec![Crumb { path: DASHBOARD, label: "Dashboard", current: false }];
    let mut prefix = String::new();
    for (i, segment) in segments.iter().enumerate() {
        prefix.push('/');
        prefix.push_str(segment);
        if let Some(&(path, label)) = CRUMBS.iter().find(|(p, _)| *p == prefix) {
            crumbs.push(Crumb { path, label, current: i + 1 == segments.len() });
        }
    }
    crumbs
}

/// Current location plus a back stack.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: String,
    history: Vec<String>,
}

impl Navigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self { current: initial.into(), history: Vec::new() }
    }

    pub fn path(&self) -> &str {
        &self.current
    }

    pub fn page(&self) -> Page {
        resolve(&self.current)
    }

    pub fn navigate(&mut self, path: impl Into<String>) -> Page {
        let path = path.into();
        debug!(from = %self.current, to = %path, "navigate");
        let previous = std::mem::replace(&mut self.current, path);
        self.history.push(previous);
        self.page()
    }

    /// Pops the back stack. Returns `None` when there is nowhere to go.
    pub fn back(&mut self) -> Option<Page> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(self.page())
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_route_resolves() {
        assert_eq!(resolve("/"), Page::Dashboard);
        assert_eq!(resolve("/dashboard"), Page::Dashboard);
        assert_eq!(resolve("/goal-setting-and-planning"), Page::GoalSettingAndPlanning);
        assert_eq!(resolve("/registration"), Page::Registration);
        assert_eq!(resolve("/expense-entry-and-management"), Page::ExpenseEntryAndManagement);
        assert_eq!(resolve("/login"), Page::Login);
        assert_eq!(resolve("/financial-story-timeline"), Page::FinancialStoryTimeline);
    }

    #[test]
    fn anything_else_is_not_found() {
        for path in ["", "/Dashboard", "/dashboard/", "/login?next=1", "/profile", "/does-not-exist"] {
            assert_eq!(resolve(path), Page::NotFound, "{path}");
        }
    }

    #[test]
    fn dashboard_breadcrumb_is_single_and_current() {
        assert_eq!(
            breadcrumbs("/dashboard"),
            vec![Crumb { path: DASHBOARD, label: "Dashboard", current: true }]
        );
    }

    #[test]
    fn page_breadcrumbs_are_rooted_at_dashboard() {
        let crumbs = breadcrumbs("/goal-setting-and-planning");
        let labels: Vec<_> = crumbs.iter().map(|c| (c.label, c.current)).collect();
        assert_eq!(labels, vec![("Dashboard", false), ("Goals", true)]);
    }

    #[test]
    fn unknown_path_keeps_only_the_root_crumb() {
        let crumbs = breadcrumbs("/nowhere");
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].label, "Dashboard");
    }

    #[test]
    fn navigator_tracks_history() {
        let mut nav = Navigator::new(LOGIN);
        assert!(!nav.can_go_back());
        assert_eq!(nav.navigate(DASHBOARD), Page::Dashboard);
        assert_eq!(nav.navigate("/bogus"), Page::NotFound);
        assert_eq!(nav.path(), "/bogus");
        assert_eq!(nav.back(), Some(Page::Dashboard));
        assert_eq!(nav.back(), Some(Page::Login));
        assert_eq!(nav.back(), None);
    }

    #[test]
    fn active_nav_item_is_exact() {
        assert!(is_active(&NAV_ITEMS[0], "/dashboard"));
        assert!(!is_active(&NAV_ITEMS[0], "/"));
    }
}
