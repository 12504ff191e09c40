//! The story timeline. All records are static; only the view state changes.

use tracing::info;

use crate::database::models::{StoryChapter, TimelineEvent, TimelineSummary, User};
use crate::database::seed;

pub const EXPORT_MESSAGE: &str = "Your financial story has been exported successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineView {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl TimelineView {
    /// Coarsest first.
    pub const ZOOM_ORDER: [TimelineView; 4] = [Self::Yearly, Self::Monthly, Self::Weekly, Self::Daily];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Yearly => "Yearly",
            Self::Monthly => "Monthly",
            Self::Weekly => "Weekly",
            Self::Daily => "Daily",
        }
    }

    fn index(&self) -> usize {
        Self::ZOOM_ORDER.iter().position(|v| v == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryTheme {
    All,
    Achievements,
    Challenges,
    Milestones,
    Habits,
    Goals,
}

impl StoryTheme {
    pub const ALL: [StoryTheme; 6] =
        [Self::All, Self::Achievements, Self::Challenges, Self::Milestones, Self::Habits, Self::Goals];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Stories",
            Self::Achievements => "🏆 Achievements",
            Self::Challenges => "⚡ Challenges",
            Self::Milestones => "🎯 Milestones",
            Self::Habits => "🔄 Spending Habits",
            Self::Goals => "🎪 Goal Progress",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 6] = [Self::All, Self::Today, Self::Week, Self::Month, Self::Quarter, Self::Year];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Quarter => "This Quarter",
            Self::Year => "This Year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRange {
    All,
    Small,
    Medium,
    Large,
}

impl AmountRange {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "Any amount",
            Self::Small => "Small ($0-$50)",
            Self::Medium => "Medium ($50-$200)",
            Self::Large => "Large ($200+)",
        }
    }
}

/// Category filter options, `None` meaning all categories.
pub const CATEGORY_OPTIONS: [(Option<&str>, &str); 9] = [
    (None, "All Categories"),
    (Some("food"), "🍽️ Food & Dining"),
    (Some("transport"), "🚗 Transportation"),
    (Some("shopping"), "🛍️ Shopping"),
    (Some("entertainment"), "🎬 Entertainment"),
    (Some("bills"), "📄 Bills & Utilities"),
    (Some("healthcare"), "🏥 Healthcare"),
    (Some("income"), "💰 Income"),
    (Some("savings"), "🏦 Savings"),
];

/// Time range and amount range are selectable and shown as active filters,
/// but only category, theme and the milestone toggle narrow the event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineFilters {
    pub category: Option<String>,
    pub time_range: TimeRange,
    pub story_theme: StoryTheme,
    pub amount_range: AmountRange,
    pub show_milestones: bool,
}

impl Default for TimelineFilters {
    fn default() -> Self {
        Self {
            category: None,
            time_range: TimeRange::Month,
            story_theme: StoryTheme::All,
            amount_range: AmountRange::All,
            show_milestones: false,
        }
    }
}

impl TimelineFilters {
    pub fn cleared() -> Self {
        Self { time_range: TimeRange::All, ..Self::default() }
    }

    pub fn admits(&self, event: &TimelineEvent) -> bool {
        if let Some(category) = &self.category {
            if &event.category != category {
                return false;
            }
        }
        let needs_milestone = matches!(self.story_theme, StoryTheme::Achievements | StoryTheme::Milestones)
            || self.show_milestones;
        !needs_milestone || event.is_milestone
    }

    /// Number of filters away from "all".
    pub fn active_count(&self) -> usize {
        [
            self.category.is_some(),
            self.time_range != TimeRange::All,
            self.story_theme != StoryTheme::All,
            self.amount_range != AmountRange::All,
            self.show_milestones,
        ]
        .into_iter()
        .filter(|b| *b)
        .count()
    }

    /// Amount chips toggle: picking the active one again resets to all.
    pub fn toggle_amount(&mut self, range: AmountRange) {
        self.amount_range = if self.amount_range == range { AmountRange::All } else { range };
    }
}

#[derive(Debug, Clone)]
pub struct TimelinePage {
    pub user: Option<User>,
    pub events: Vec<TimelineEvent>,
    pub chapters: Vec<StoryChapter>,
    pub summary: TimelineSummary,
    pub filters: TimelineFilters,
    pub view: TimelineView,
    pub expanded_event: Option<i64>,
    pub active_chapter: String,
    pub notice: Option<String>,
}

impl TimelinePage {
    pub fn mount() -> Self {
        Self {
            user: Some(seed::page_user()),
            events: seed::timeline_events(),
            chapters: seed::story_chapters(),
            summary: seed::timeline_summary(),
            filters: TimelineFilters::default(),
            view: TimelineView::Weekly,
            expanded_event: None,
            active_chapter: "current".to_string(),
            notice: None,
        }
    }

    pub fn filtered_events(&self) -> Vec<&TimelineEvent> {
        self.events.iter().filter(|e| self.filters.admits(e)).collect()
    }

    pub fn set_filters(&mut self, filters: TimelineFilters) {
        self.filters = filters;
    }

    pub fn clear_filters(&mut self) {
        self.filters = TimelineFilters::cleared();
    }

    /// Clicking an expanded event collapses it; clicking another expands it.
    pub fn toggle_event(&mut self, id: i64) {
        self.expanded_event = if self.expanded_event == Some(id) { None } else { Some(id) };
    }

    pub fn select_chapter(&mut self, id: &str) {
        self.active_chapter = id.to_string();
    }

    pub fn set_view(&mut self, view: TimelineView) {
        self.view = view;
    }

    pub fn can_zoom_in(&self) -> bool {
        self.view != TimelineView::Daily
    }

    pub fn can_zoom_out(&self) -> bool {
        self.view != TimelineView::Yearly
    }

    /// One step finer. Stays put at the daily view.
    pub fn zoom_in(&mut self) {
        if let Some(next) = TimelineView::ZOOM_ORDER.get(self.view.index() + 1) {
            self.view = *next;
        }
    }

    /// One step coarser. Stays put at the yearly view.
    pub fn zoom_out(&mut self) {
        if let Some(i) = self.view.index().checked_sub(1) {
            self.view = TimelineView::ZOOM_ORDER[i];
        }
    }

    pub fn export(&mut self) {
        info!(events = self.events.len(), "story exported");
        self.notice = Some(EXPORT_MESSAGE.to_string());
    }

    pub fn logout(&mut self) -> &'static str {
        crate::auth::logout(&mut self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(page: &TimelinePage) -> Vec<i64> {
        page.filtered_events().iter().map(|e| e.id).collect()
    }

    #[test]
    fn mounts_with_weekly_view_and_current_chapter() {
        let page = TimelinePage::mount();
        assert_eq!(page.view, TimelineView::Weekly);
        assert_eq!(page.active_chapter, "current");
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn category_and_milestone_filters() {
        let mut page = TimelinePage::mount();
        page.set_filters(TimelineFilters { category: Some("food".into()), ..TimelineFilters::default() });
        assert_eq!(ids(&page), vec![1, 2]);

        page.set_filters(TimelineFilters { show_milestones: true, ..TimelineFilters::default() });
        assert_eq!(ids(&page), vec![2, 3, 5]);

        page.set_filters(TimelineFilters { story_theme: StoryTheme::Achievements, ..TimelineFilters::default() });
        assert_eq!(ids(&page), vec![2, 3, 5]);

        page.set_filters(TimelineFilters { story_theme: StoryTheme::Habits, ..TimelineFilters::default() });
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5, 6]);

        page.clear_filters();
        assert_eq!(page.filters.active_count(), 0);
    }

    #[test]
    fn amount_range_is_recorded_but_not_applied() {
        let mut page = TimelinePage::mount();
        page.filters.toggle_amount(AmountRange::Large);
        assert_eq!(page.filters.amount_range, AmountRange::Large);
        assert_eq!(page.filtered_events().len(), 6);
        page.filters.toggle_amount(AmountRange::Large);
        assert_eq!(page.filters.amount_range, AmountRange::All);
    }

    #[test]
    fn zoom_walks_the_order_and_stops_at_the_ends() {
        let mut page = TimelinePage::mount();
        page.zoom_in();
        assert_eq!(page.view, TimelineView::Daily);
        assert!(!page.can_zoom_in());
        page.zoom_in();
        assert_eq!(page.view, TimelineView::Daily);

        for _ in 0..5 {
            page.zoom_out();
        }
        assert_eq!(page.view, TimelineView::Yearly);
        assert!(!page.can_zoom_out());
    }

    #[test]
    fn expand_toggles_and_export_sets_notice() {
        let mut page = TimelinePage::mount();
        page.toggle_event(3);
        assert_eq!(page.expanded_event, Some(3));
        page.toggle_event(4);
        assert_eq!(page.expanded_event, Some(4));
        page.toggle_event(4);
        assert_eq!(page.expanded_event, None);

        page.export();
        assert_eq!(page.notice.as_deref(), Some(EXPORT_MESSAGE));
    }
}
