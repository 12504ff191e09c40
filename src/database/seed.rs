//! Mock records each page seeds itself with when it is mounted. Nothing here is
//! shared between pages: every call builds a fresh copy.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::calc::budget::BudgetLimits;
use crate::calc::goal::default_milestones;
use crate::database::models::dashboard::ChapterMetric;
use crate::database::models::{
    Alert, AlertAction, AlertKind, Category, ChapterPhase, EventKind, Expense, ExpenseSource,
    FinancialChapter, Frequency, Goal, GoalCategory, GoalProgressRow, Metric, Milestone,
    MonthlySummary, Mood, ProgressEntry, ProgressKind, QuickTemplate, StoryChapter,
    TimelineEvent, TimelineSummary, Trend, User,
};

fn cents(v: i64) -> Decimal {
    Decimal::new(v, 2)
}

fn dollars(v: i64) -> Decimal {
    Decimal::from(v)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============= Users =============

pub fn page_user() -> User {
    User {
        name: "Sarah Johnson".into(),
        email: "sarah.johnson@email.com".into(),
        join_date: None,
    }
}

pub fn dashboard_user() -> User {
    User {
        name: "Yousif Shrouk Youstina Mayar".into(),
        email: "nextteam@email.com".into(),
        join_date: None,
    }
}

// ============= Categories & budgets =============

fn category(id: &str, name: &str, icon: &str, description: &str, color: &str) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        description: description.into(),
        color: color.into(),
        is_custom: false,
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        category("food", "Food & Dining", "🍽️", "Meals, groceries, and dining experiences", "#EF4444"),
        category("transport", "Transportation", "🚗", "Gas, public transit, rideshares", "#3B82F6"),
        category("shopping", "Shopping", "🛍️", "Clothing, electronics, personal items", "#EC4899"),
        category("entertainment", "Entertainment", "🎬", "Movies, games, subscriptions", "#8B5CF6"),
        category("bills", "Bills & Utilities", "📄", "Rent, utilities, insurance", "#6B7280"),
        category("healthcare", "Healthcare", "🏥", "Medical expenses, pharmacy", "#10B981"),
        category("education", "Education", "📚", "Courses, books, learning materials", "#F59E0B"),
        category("other", "Other", "📦", "Miscellaneous expenses", "#6B7280"),
    ]
}

pub fn budget_limits() -> BudgetLimits {
    [
        ("food", 800),
        ("transport", 300),
        ("shopping", 400),
        ("entertainment", 150),
        ("bills", 1200),
        ("healthcare", 200),
        ("education", 100),
        ("other", 200),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), dollars(v)))
    .collect()
}

// ============= Expenses =============

#[allow(clippy::too_many_arguments)]
fn expense(
    id: i64,
    amount: Decimal,
    description: &str,
    category: &str,
    day: NaiveDate,
    narrative: &str,
    timestamp: DateTime<Utc>,
    story_impact: &str,
) -> Expense {
    Expense {
        id,
        amount,
        description: description.into(),
        category: category.into(),
        date: day,
        narrative: Some(narrative.into()),
        is_recurring: false,
        timestamp,
        story_impact: Some(story_impact.into()),
        source: ExpenseSource::Manual,
    }
}

pub fn expenses() -> Vec<Expense> {
    vec![
        expense(
            1,
            cents(2499),
            "Lunch at Bella Vista Restaurant",
            "food",
            date(2025, 11, 9),
            "A delightful midday meal that brought joy to an otherwise busy workday",
            instant(2025, 11, 9, 12, 30),
            "This dining experience represents moments of nourishment and social connection in your financial story.",
        ),
        expense(
            2,
            dollars(45),
            "Gas station fill-up",
            "transport",
            date(2025, 11, 8),
            "Keeping the journey moving forward with essential fuel",
            instant(2025, 11, 8, 8, 15),
            "A necessary chapter in your mobility story, enabling life's adventures and daily responsibilities.",
        ),
        expense(
            3,
            cents(8950),
            "Weekly grocery shopping at Whole Foods",
            "food",
            date(2025, 11, 7),
            "Stocking up on healthy ingredients for home-cooked meals",
            instant(2025, 11, 7, 16, 45),
            "An investment in health and home comfort, creating the foundation for nourishing family stories.",
        ),
        expense(
            4,
            cents(1599),
            "Netflix monthly subscription",
            "entertainment",
            date(2025, 11, 6),
            "Monthly entertainment subscription for relaxation",
            instant(2025, 11, 6, 10, 0),
            "Your window to entertainment and relaxation, adding joy and downtime to your life's narrative.",
        ),
        expense(
            5,
            dollars(125),
            "Electric utility bill",
            "bills",
            date(2025, 11, 5),
            "Monthly electricity bill for home comfort",
            instant(2025, 11, 5, 14, 20),
            "Essential infrastructure that powers your daily life and enables all other stories to unfold.",
        ),
    ]
}

// ============= Quick templates =============

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    name: &str,
    description: &str,
    amount: Decimal,
    category: &str,
    icon: &str,
    frequency: Frequency,
    story_context: &str,
) -> QuickTemplate {
    QuickTemplate {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        amount,
        category: category.into(),
        icon: icon.into(),
        frequency: Some(frequency),
        story_context: story_context.into(),
        is_custom: false,
    }
}

pub fn default_templates() -> Vec<QuickTemplate> {
    vec![
        template("coffee", "Morning Coffee", "Daily coffee shop visit", cents(450), "food", "☕", Frequency::Daily, "Your daily ritual of caffeinated inspiration"),
        template("lunch", "Work Lunch", "Lunch during work hours", dollars(12), "food", "🥪", Frequency::Weekdays, "Midday nourishment to fuel your professional journey"),
        template("gas", "Gas Fill-up", "Vehicle fuel", dollars(45), "transport", "⛽", Frequency::Weekly, "Keeping your journey moving forward"),
        template("parking", "Parking Fee", "City parking", dollars(8), "transport", "🅿️", Frequency::Occasional, "The cost of urban convenience"),
        template("subscription", "Streaming Service", "Monthly entertainment subscription", cents(1599), "entertainment", "📺", Frequency::Monthly, "Your window to entertainment and relaxation"),
        template("grocery", "Grocery Run", "Weekly grocery shopping", dollars(85), "food", "🛒", Frequency::Weekly, "Stocking up for home-cooked stories"),
    ]
}

// ============= Goals =============

fn milestones(achieved: usize) -> Vec<Milestone> {
    let mut ms = default_milestones();
    for m in ms.iter_mut().take(achieved) {
        m.achieved = true;
    }
    ms
}

pub fn goals() -> Vec<Goal> {
    vec![
        Goal {
            id: 1,
            title: "Emergency Fund".into(),
            description: "Build a 6-month emergency fund for financial security".into(),
            category: GoalCategory::Emergency,
            icon: "Shield".into(),
            target_amount: dollars(15000),
            current_amount: dollars(8500),
            progress: Decimal::new(567, 1),
            target_date: date(2024, 12, 31),
            monthly_target: cents(108333),
            motivation_message: "Peace of mind is priceless. This fund will protect my family from unexpected financial storms.".into(),
            story_narrative: "Building your financial safety net of $15,000 will give you peace of mind and security for unexpected life events.".into(),
            milestones: milestones(2),
            progress_history: vec![
                ProgressEntry {
                    id: 1,
                    amount: dollars(2000),
                    kind: ProgressKind::Add,
                    note: "Initial deposit".into(),
                    date: date(2024, 1, 15),
                    new_total: dollars(2000),
                    timestamp: instant(2024, 1, 15, 10, 0),
                },
                ProgressEntry {
                    id: 2,
                    amount: dollars(1500),
                    kind: ProgressKind::Add,
                    note: "Monthly savings".into(),
                    date: date(2024, 2, 15),
                    new_total: dollars(3500),
                    timestamp: instant(2024, 2, 15, 10, 0),
                },
            ],
            created_at: instant(2024, 1, 15, 10, 0),
            updated_at: None,
        },
        Goal {
            id: 2,
            title: "European Adventure".into(),
            description: "Dream vacation to explore Europe for 3 weeks".into(),
            category: GoalCategory::Travel,
            icon: "Plane".into(),
            target_amount: dollars(8000),
            current_amount: dollars(3200),
            progress: dollars(40),
            target_date: date(2025, 6, 1),
            monthly_target: cents(68571),
            motivation_message: "Life is short, and the world is wide. This trip will create memories that last a lifetime.".into(),
            story_narrative: "Your dream adventure awaits! Save $8,000 to create unforgettable memories and explore new horizons.".into(),
            milestones: milestones(1),
            progress_history: Vec::new(),
            created_at: instant(2024, 3, 1, 10, 0),
            updated_at: None,
        },
        Goal {
            id: 3,
            title: "Home Down Payment".into(),
            description: "Save for a 20% down payment on our first home".into(),
            category: GoalCategory::Home,
            icon: "Home".into(),
            target_amount: dollars(60000),
            current_amount: dollars(22000),
            progress: Decimal::new(367, 1),
            target_date: date(2026, 3, 1),
            monthly_target: dollars(2375),
            motivation_message: "Home is where love resides and memories are created. This investment is in our family's future.".into(),
            story_narrative: "Every dollar saved brings you closer to the keys of your dream home. Your future self will thank you for this $60,000 investment.".into(),
            milestones: milestones(1),
            progress_history: Vec::new(),
            created_at: instant(2024, 2, 1, 10, 0),
            updated_at: None,
        },
        Goal {
            id: 4,
            title: "Master's Degree".into(),
            description: "Fund my MBA program at a top business school".into(),
            category: GoalCategory::Education,
            icon: "GraduationCap".into(),
            target_amount: dollars(45000),
            current_amount: dollars(12000),
            progress: Decimal::new(267, 1),
            target_date: date(2025, 8, 1),
            monthly_target: dollars(4125),
            motivation_message: "Education is the most powerful weapon to change the world and my career trajectory.".into(),
            story_narrative: "Investing in knowledge pays the best interest. Your $45,000 education goal is an investment in your future success.".into(),
            milestones: milestones(1),
            progress_history: Vec::new(),
            created_at: instant(2024, 1, 1, 10, 0),
            updated_at: None,
        },
        Goal {
            id: 5,
            title: "New Car Fund".into(),
            description: "Save for a reliable family vehicle".into(),
            category: GoalCategory::Vehicle,
            icon: "Car".into(),
            target_amount: dollars(25000),
            current_amount: dollars(25000),
            progress: dollars(100),
            target_date: date(2024, 9, 1),
            monthly_target: Decimal::ZERO,
            motivation_message: "Reliable transportation means freedom and peace of mind for daily life.".into(),
            story_narrative: "Your reliable transportation solution is within reach. Save $25,000 for the vehicle that fits your lifestyle.".into(),
            milestones: milestones(4),
            progress_history: Vec::new(),
            created_at: instant(2023, 12, 1, 10, 0),
            updated_at: None,
        },
    ]
}

// ============= Timeline =============

#[allow(clippy::too_many_arguments)]
fn event(
    id: i64,
    day: NaiveDate,
    title: &str,
    category: &str,
    kind: EventKind,
    amount: Decimal,
    story_text: &str,
    location: &str,
    payment_method: &str,
    tags: &[&str],
    insights: &str,
    is_milestone: bool,
) -> TimelineEvent {
    TimelineEvent {
        id,
        date: day,
        title: title.into(),
        category: category.into(),
        kind,
        amount,
        story_text: story_text.into(),
        location: location.into(),
        payment_method: payment_method.into(),
        tags: strings(tags),
        insights: insights.into(),
        is_milestone,
    }
}

pub fn timeline_events() -> Vec<TimelineEvent> {
    vec![
        event(
            1,
            date(2024, 11, 9),
            "Morning Coffee & Productivity Boost",
            "food",
            EventKind::Expense,
            cents(475),
            "Started your Saturday with a perfect cappuccino at Corner Café. This small ritual has become part of your weekend routine, setting a positive tone for productive days ahead.",
            "Corner Café, Downtown",
            "Credit Card",
            &["routine", "weekend", "productivity"],
            "Your weekend coffee spending averages $15/week, which aligns well with your entertainment budget allocation.",
            false,
        ),
        event(
            2,
            date(2024, 11, 8),
            "Grocery Shopping Success Story",
            "food",
            EventKind::Expense,
            cents(12743),
            "A well-planned grocery trip that stayed within budget! You successfully used your shopping list and avoided impulse purchases, demonstrating growing financial discipline.",
            "Fresh Market",
            "Debit Card",
            &["budgeting", "planning", "success"],
            "You've reduced grocery spending by 15% this month through better planning and list-making.",
            true,
        ),
        event(
            3,
            date(2024, 11, 7),
            "Freelance Project Payment Received",
            "income",
            EventKind::Income,
            dollars(850),
            "Excellent news! Your web design project payment came through ahead of schedule. This extra income brings you closer to your emergency fund goal and validates your side hustle strategy.",
            "Bank Transfer",
            "Direct Deposit",
            &["freelance", "achievement", "goal-progress"],
            "This freelance income represents 23% of your monthly target for side earnings. You're building a strong secondary income stream.",
            true,
        ),
        event(
            4,
            date(2024, 11, 6),
            "Monthly Gym Membership Investment",
            "healthcare",
            EventKind::Expense,
            dollars(45),
            "Your monthly fitness investment renewed automatically. This consistent commitment to health represents a smart long-term investment in your wellbeing and future healthcare savings.",
            "FitLife Gym",
            "Auto-pay",
            &["health", "investment", "routine"],
            "Regular exercise can reduce healthcare costs by up to 30% over time, making this a financially smart choice.",
            false,
        ),
        event(
            5,
            date(2024, 11, 5),
            "Emergency Fund Milestone Achieved!",
            "savings",
            EventKind::Savings,
            dollars(500),
            "Congratulations! You've reached your $5,000 emergency fund goal three months ahead of schedule. This achievement represents months of disciplined saving and smart financial choices.",
            "High-Yield Savings Account",
            "Auto Transfer",
            &["milestone", "achievement", "emergency-fund"],
            "Reaching this goal puts you ahead of 60% of Americans who don't have adequate emergency savings. Excellent financial progress!",
            true,
        ),
        event(
            6,
            date(2024, 11, 4),
            "Movie Night Entertainment",
            "entertainment",
            EventKind::Expense,
            cents(2850),
            "Enjoyed a relaxing movie night with friends. You chose the matinee showing and shared snacks, demonstrating how you can enjoy entertainment while staying budget-conscious.",
            "Cinema Plaza",
            "Credit Card",
            &["social", "entertainment", "budget-friendly"],
            "Your entertainment spending this month is 20% below budget, leaving room for additional social activities.",
            false,
        ),
    ]
}

pub fn story_chapters() -> Vec<StoryChapter> {
    vec![
        StoryChapter {
            id: "past".into(),
            title: "Foundation Building".into(),
            phase: ChapterPhase::Past,
            period: "Jan - Aug 2024".into(),
            summary: "The beginning of your financial transformation journey. You established emergency savings, created your first budget, and began tracking expenses systematically.".into(),
            event_count: 156,
            total_amount: cents(234050),
            highlights: strings(&[
                "Built first emergency fund",
                "Reduced dining out by 40%",
                "Started freelance income stream",
                "Paid off credit card debt",
            ]),
            is_new: false,
        },
        StoryChapter {
            id: "current".into(),
            title: "Growth & Optimization".into(),
            phase: ChapterPhase::Present,
            period: "Sep - Nov 2024".into(),
            summary: "Your current chapter focuses on optimizing spending habits and accelerating savings. You've achieved major milestones and are building momentum toward bigger goals.".into(),
            event_count: 89,
            total_amount: cents(187525),
            highlights: strings(&[
                "Emergency fund goal achieved",
                "Freelance income increased 35%",
                "Investment account opened",
                "Vacation fund started",
            ]),
            is_new: true,
        },
        StoryChapter {
            id: "future".into(),
            title: "Wealth Building".into(),
            phase: ChapterPhase::Future,
            period: "Dec 2024 - Beyond".into(),
            summary: "The next chapter of your financial story focuses on investment growth, property ownership goals, and building long-term wealth for financial independence.".into(),
            event_count: 0,
            total_amount: Decimal::ZERO,
            highlights: strings(&[
                "House down payment goal",
                "Investment portfolio growth",
                "Retirement planning optimization",
                "Multiple income streams",
            ]),
            is_new: false,
        },
    ]
}

pub fn timeline_summary() -> TimelineSummary {
    TimelineSummary {
        period: "November 2024".into(),
        total_events: 47,
        total_income: dollars(3250),
        total_expenses: cents(218075),
        net_savings: cents(106925),
        income_growth: 12,
        expense_growth: 8,
        savings_rate: 33,
        milestones: 3,
        new_milestones: 2,
        story_narrative: "November has been a remarkable month in your financial journey! You've successfully balanced enjoying life with smart financial decisions. Your emergency fund milestone achievement shows incredible discipline, while your growing freelance income demonstrates entrepreneurial success. The key theme this month has been 'balanced growth' - you're saving aggressively while still investing in experiences and health.".into(),
        story_tags: strings(&["Achievement", "Balance", "Growth", "Discipline", "Success"]),
        goal_progress: vec![
            GoalProgressRow { name: "Emergency Fund".into(), current: dollars(5000), target: dollars(5000), percentage: 100, time_left: "Completed!".into() },
            GoalProgressRow { name: "Vacation Fund".into(), current: dollars(1200), target: dollars(2500), percentage: 48, time_left: "4 months".into() },
            GoalProgressRow { name: "Investment Account".into(), current: dollars(750), target: dollars(1000), percentage: 75, time_left: "2 months".into() },
        ],
    }
}

// ============= Dashboard =============

pub fn monthly_summary() -> MonthlySummary {
    MonthlySummary {
        title: "November 2025 Financial Journey".into(),
        period: "November 1-9, 2025".into(),
        mood: Mood::Good,
        score: 78,
        narrative: "This month has been a story of steady progress and mindful spending. You've successfully maintained your budget discipline while making strategic investments in your future. Your emergency fund has grown by 12%, and you've reduced dining out expenses by 25% compared to last month. The journey toward your vacation savings goal is ahead of schedule, showing your commitment to financial wellness.".into(),
        achievements: strings(&[
            "Stayed within budget for 8 consecutive days",
            "Increased emergency fund by $450",
            "Reduced unnecessary subscriptions by $35/month",
            "Met 85% of weekly savings targets",
        ]),
        challenges: strings(&[
            "Transportation costs exceeded budget by 15%",
            "Impulse purchases increased in week 2",
            "Investment portfolio needs rebalancing",
            "Healthcare expenses require better planning",
        ]),
        insight: "Small consistent actions create powerful financial momentum. Your disciplined approach this month is building the foundation for long-term wealth.".into(),
        headline_metric: "$2,847".into(),
        headline_description: "Net positive cash flow this month".into(),
    }
}

fn chapter_metrics(pairs: &[(&str, &str)]) -> Vec<ChapterMetric> {
    pairs
        .iter()
        .map(|(label, value)| ChapterMetric { label: label.to_string(), value: value.to_string() })
        .collect()
}

pub fn financial_chapters() -> Vec<FinancialChapter> {
    vec![
        FinancialChapter {
            id: "past".into(),
            phase: ChapterPhase::Past,
            title: "Your Financial Past".into(),
            period: "January - October 2025".into(),
            progress: 85,
            narrative: "Your financial journey began with determination and has evolved into a story of growth and learning. From paying off $3,200 in credit card debt to building your first emergency fund, you've transformed challenges into stepping stones.".into(),
            metrics: chapter_metrics(&[("Debt Paid Off", "$3,200"), ("Savings Built", "$5,800")]),
            highlights: strings(&[
                "Eliminated all high-interest credit card debt",
                "Built emergency fund covering 3 months expenses",
                "Established consistent saving habits",
                "Learned investment fundamentals",
            ]),
        },
        FinancialChapter {
            id: "present".into(),
            phase: ChapterPhase::Present,
            title: "Your Current Chapter".into(),
            period: "November 2025".into(),
            progress: 72,
            narrative: "Right now, you're in the momentum phase of your financial story. Your disciplined approach is paying dividends, with consistent savings and smart spending choices.".into(),
            metrics: chapter_metrics(&[("Monthly Income", "$4,200"), ("Expenses", "$2,950")]),
            highlights: strings(&[
                "Maintaining 30% savings rate consistently",
                "Emergency fund fully funded at $8,400",
                "Investment portfolio growing steadily",
                "Budget adherence at 85% success rate",
            ]),
        },
        FinancialChapter {
            id: "future".into(),
            phase: ChapterPhase::Future,
            title: "Your Financial Future".into(),
            period: "December 2025 - Beyond".into(),
            progress: 45,
            narrative: "The next chapters of your financial story are filled with exciting possibilities. With your strong foundation, you're positioned to achieve major milestones: homeownership, investment growth, and financial independence.".into(),
            metrics: chapter_metrics(&[("Goal Progress", "45%"), ("Target Date", "Dec 2026")]),
            highlights: strings(&[
                "House down payment goal: 45% complete",
                "Retirement savings on track for early retirement",
                "Investment portfolio projected 8% annual growth",
                "Financial independence timeline: 15 years",
            ]),
        },
    ]
}

fn action(label: &str, primary: bool) -> AlertAction {
    AlertAction { label: label.into(), primary }
}

/// Alerts are timestamped relative to `now` so "time ago" reads sensibly.
pub fn alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        Alert {
            id: 1,
            kind: AlertKind::Milestone,
            title: "Savings Milestone Achieved!".into(),
            message: "Congratulations! You've reached 75% of your emergency fund goal. Your financial security is getting stronger with each contribution.".into(),
            context: "Emergency fund target: $10,000 | Current: $7,500".into(),
            progress: None,
            timestamp: now - Duration::minutes(5),
            actions: vec![action("View Progress", true), action("Adjust Goal", false)],
        },
        Alert {
            id: 2,
            kind: AlertKind::Warning,
            title: "Budget Alert: Transportation".into(),
            message: "Your transportation spending is 15% over budget this month. Consider carpooling or using public transit to get back on track.".into(),
            context: "Budget: $300 | Spent: $345 | Remaining: -$45".into(),
            progress: None,
            timestamp: now - Duration::minutes(30),
            actions: vec![action("Review Expenses", true), action("Adjust Budget", false)],
        },
        Alert {
            id: 3,
            kind: AlertKind::Goal,
            title: "Vacation Fund Progress".into(),
            message: "You're ahead of schedule! Your vacation fund has reached $1,200, putting you 20% ahead of your timeline.".into(),
            context: "Target: $2,000 by March 2025".into(),
            progress: Some(60),
            timestamp: now - Duration::hours(1),
            actions: vec![action("View Timeline", true)],
        },
    ]
}

fn metric(kind: &str, label: &str, value: &str, trend: Trend, change: &str, description: &str, progress: u32) -> Metric {
    Metric {
        kind: kind.into(),
        label: label.into(),
        value: value.into(),
        trend,
        change: change.into(),
        description: description.into(),
        progress,
        subtitle: None,
    }
}

pub fn metrics() -> Vec<Metric> {
    let mut debt = metric("debt", "Remaining Debt", "$0", Trend::Positive, "-100%", "All high-interest debt successfully eliminated", 100);
    debt.subtitle = Some("Debt-free achievement unlocked!".into());
    vec![
        metric("income", "Monthly Income", "$4,200", Trend::Positive, "+5.2%", "Steady growth from salary increase and side projects", 85),
        metric("expenses", "Monthly Expenses", "$2,950", Trend::Neutral, "+2.1%", "Well-controlled spending within budget parameters", 70),
        metric("savings", "Total Savings", "$8,400", Trend::Positive, "+12.3%", "Emergency fund fully funded, building investment capital", 90),
        metric("investments", "Investment Portfolio", "$3,650", Trend::Positive, "+8.7%", "Diversified portfolio showing steady growth", 65),
        metric("budget", "Budget Adherence", "85%", Trend::Positive, "+3%", "Consistent improvement in budget discipline", 85),
        debt,
    ]
}
