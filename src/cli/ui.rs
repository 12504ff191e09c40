use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

use crate::calc::budget::Severity;
use crate::calc::format::{fixed2, fmt_money, fmt_money_whole, short_date, story_context, time_ago, today};
use crate::calc::goal::{clamped_progress, progress_tier, time_remaining, ProgressTier};
use crate::cli::state::{App, Modal};
use crate::pages::dashboard::QUICK_ACTIONS;
use crate::pages::expenses::{category_usage, usage_percent, ExpenseTab, AVAILABLE_COLORS, AVAILABLE_ICONS};
use crate::pages::registration::MIN_STRENGTH;
use crate::pages::{
    DashboardPage, ExpensesPage, GoalsPage, LoginPage, Mounted, NotFoundPage, RegistrationPage, TimelinePage,
};
use crate::router::{self, NAV_ITEMS};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // header | breadcrumbs | page | status bar
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(10), Constraint::Length(1)])
        .split(size);

    draw_header(f, root[0], app);

    let crumbs = router::breadcrumbs(app.nav.path())
        .into_iter()
        .map(|c| {
            let style = if c.current { Style::default().add_modifier(Modifier::BOLD) } else { Style::default() };
            Span::styled(c.label, style)
        })
        .fold(Vec::new(), |mut acc, span| {
            if !acc.is_empty() {
                acc.push(Span::raw(" › "));
            }
            acc.push(span);
            acc
        });
    f.render_widget(Paragraph::new(Line::from(crumbs)), root[1]);

    let mut list = app.list.clone();
    match &app.page {
        Mounted::Dashboard(p) => draw_dashboard(f, root[2], p, &mut list, app.chapter),
        Mounted::Timeline(p) => draw_timeline(f, root[2], p, &mut list),
        Mounted::Goals(p) => draw_goals(f, root[2], p, &mut list),
        Mounted::Expenses(p) => draw_expenses(f, root[2], p, &mut list, app.focus, app.editing),
        Mounted::Login(p) => draw_login(f, root[2], p, app.focus),
        Mounted::Registration(p) => draw_registration(f, root[2], p, app.focus),
        Mounted::NotFound(p) => draw_not_found(f, root[2], p),
    }
    app.list = list;

    f.render_widget(Paragraph::new(status_line(app)), root[3]);

    if let Some(modal) = &app.modal {
        let form = modal.form();
        let hint = match modal {
            Modal::Category { .. } => Some(format!(
                "Icons: {}  Colors: {}",
                AVAILABLE_ICONS.join(" "),
                AVAILABLE_COLORS.join(" ")
            )),
            _ => None,
        };
        let height = form.fields.len() as u16 + if hint.is_some() { 9 } else { 5 };
        let area = center_rect(root[2], 64, height);
        f.render_widget(Clear, area);
        draw_form(f, area, form, hint.as_deref(), app.is_saving_modal());
    }
}

/// Last status message, or the global key hints when there is none. `b: back`
/// is dimmed while there is no history to go back to.
fn status_line(app: &App) -> Line<'static> {
    let mut spans = if app.status.is_empty() {
        let back = if app.nav.can_go_back() { Style::default() } else { Style::default().add_modifier(Modifier::DIM) };
        vec![Span::raw("g: go to path | "), Span::styled("b: back", back), Span::raw(" | q: quit")]
    } else {
        vec![Span::raw(app.status.clone())]
    };
    if app.is_busy() {
        spans.push(Span::raw(" | working…"));
    }
    Line::from(spans)
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let page = app.page.page();
    let title = match app.page.header_user() {
        Some(user) => format!("Financial Storyteller | {}", user.name),
        None => "Financial Storyteller".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if page.has_header() {
        let titles = NAV_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| Line::from(format!("{} {}", i + 1, item.label)))
            .collect::<Vec<_>>();
        let selected = NAV_ITEMS.iter().position(|item| router::is_active(item, app.nav.path()));
        let tabs = Tabs::new(titles)
            .select(selected.unwrap_or(usize::MAX))
            .block(block.title_bottom(" a: quick expense | L: sign out "))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
        f.render_widget(tabs, area);
    } else {
        f.render_widget(Paragraph::new(page.title()).block(block), area);
    }
}

fn draw_form(f: &mut Frame, area: Rect, form: &crate::cli::input::Form, hint: Option<&str>, saving: bool) {
    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let marker = if i == form.focus { "▶ " } else { "  " };
            let style = if i == form.focus { Style::default().add_modifier(Modifier::BOLD) } else { Style::default() };
            Line::styled(format!("{marker}{:<26}: {}", field.label, field.edit.rendered()), style)
        })
        .collect();
    lines.push(Line::from(""));
    if saving {
        lines.push(Line::from("Saving…"));
    } else {
        lines.push(Line::from("Tab: next field | Enter: submit | Esc: cancel"));
    }
    if let Some(hint) = hint {
        lines.push(Line::from(hint.to_string()));
    }
    if let Some(err) = &form.error {
        lines.push(Line::from(format!("⚠ {err}")));
    }
    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(form.title))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

// ============= Dashboard =============

fn draw_dashboard(f: &mut Frame, area: Rect, p: &DashboardPage, list: &mut ratatui::widgets::ListState, chapter: usize) {
    if p.is_loading {
        let msg = Paragraph::new("Loading your financial story…").block(Block::default().borders(Borders::ALL));
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(8), Constraint::Length(7)])
        .split(area);

    let s = &p.summary;
    let summary = vec![
        Line::styled(p.greeting(), Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!("{} ({}) | mood {:?} | score {}", s.title, s.period, s.mood, s.score)),
        Line::from(s.narrative.clone()),
        Line::from(format!("{}: {}", s.headline_description, s.headline_metric)),
        Line::from(format!("Insight: {}", s.insight)),
    ];
    f.render_widget(
        Paragraph::new(summary).wrap(Wrap { trim: true }).block(Block::default().borders(Borders::ALL).title("This Month")),
        rows[0],
    );

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let now = Utc::now();
    let alerts: Vec<ListItem> = p
        .alerts
        .iter()
        .map(|a| {
            let actions = a.actions.iter().map(|x| x.label.as_str()).collect::<Vec<_>>().join(" / ");
            ListItem::new(vec![
                Line::from(format!("{} {}  ({})", a.kind.icon(), a.title, time_ago(a.timestamp, now))),
                Line::from(format!("   {}", a.message)),
                Line::from(format!("   [{actions}]")),
            ])
        })
        .collect();
    let alerts = List::new(alerts)
        .block(Block::default().borders(Borders::ALL).title("Story Alerts (Enter: act, x: dismiss)"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(alerts, middle[0], list);

    let metrics: Vec<Row> = p
        .metrics
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.label.clone()),
                Cell::from(m.value.clone()),
                Cell::from(format!("{:?} {}", m.trend, m.change)),
                Cell::from(format!("{}%", m.progress)),
            ])
        })
        .collect();
    let metrics = Table::new(
        metrics,
        [Constraint::Percentage(35), Constraint::Percentage(25), Constraint::Percentage(25), Constraint::Length(6)],
    )
    .block(Block::default().borders(Borders::ALL).title("Key Metrics"));
    f.render_widget(metrics, middle[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(rows[2]);
    for (i, c) in p.chapters.iter().enumerate().take(3) {
        let style = if i == chapter { Style::default().add_modifier(Modifier::REVERSED) } else { Style::default() };
        let body = vec![Line::from(c.period.clone()), Line::from(format!("{}% complete", c.progress)), Line::from(c.narrative.clone())];
        let block = Block::default().borders(Borders::ALL).title(Span::styled(c.title.clone(), style));
        f.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }).block(block), bottom[i]);
    }
    let actions: Vec<Line> = QUICK_ACTIONS
        .iter()
        .map(|a| Line::from(format!("{} ({})", a.title, a.description)))
        .collect();
    f.render_widget(
        Paragraph::new(actions).block(Block::default().borders(Borders::ALL).title("Quick Actions (←/→, c: chapter)")),
        bottom[3],
    );
}

// ============= Timeline =============

fn draw_timeline(f: &mut Frame, area: Rect, p: &TimelinePage, list: &mut ratatui::widgets::ListState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(8)])
        .split(area);

    let s = &p.summary;
    let filters = &p.filters;
    let category = filters.category.as_deref().unwrap_or("all");
    let header = vec![
        Line::from(format!(
            "{} | income {} | expenses {} | saved {} ({}%)",
            s.period,
            fmt_money(&s.total_income),
            fmt_money(&s.total_expenses),
            fmt_money(&s.net_savings),
            s.savings_rate
        )),
        Line::from(format!(
            "View: {} | Category: {} | Theme: {} | Range: {} | Amount: {} | Milestones only: {} | {} active",
            p.view.label(),
            category,
            filters.story_theme.label(),
            filters.time_range.label(),
            filters.amount_range.label(),
            if filters.show_milestones { "yes" } else { "no" },
            filters.active_count()
        )),
        Line::from("+/-: zoom  v: view  f/t/r/s/m: filters  x: clear  e: export  ←/→: chapter"),
    ];
    f.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL).title("Financial Story")),
        rows[0],
    );

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let events = p.filtered_events();
    let items: Vec<ListItem> = events
        .iter()
        .map(|e| {
            let star = if e.is_milestone { "★ " } else { "" };
            let mut lines = vec![Line::from(format!(
                "{}{}  {}  {}",
                star,
                short_date(&e.date),
                e.title,
                fmt_money(&e.amount)
            ))];
            if p.expanded_event == Some(e.id) {
                lines.push(Line::from(format!("   {}", e.story_text)));
                lines.push(Line::from(format!("   {} | {} | {}", e.location, e.payment_method, e.tags.join(", "))));
                lines.push(Line::from(format!("   💡 {}", e.insights)));
            }
            ListItem::new(lines)
        })
        .collect();
    let title = if events.is_empty() { "Events (none match)" } else { "Events (Enter: expand)" };
    let events = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(events, cols[0], list);

    let mut side: Vec<Line> = p
        .chapters
        .iter()
        .flat_map(|c| {
            let marker = if c.id == p.active_chapter { "▶" } else { " " };
            let new = if c.is_new { " (new)" } else { "" };
            vec![
                Line::from(format!("{marker} {}{new}: {}", c.title, c.period)),
                Line::from(format!("   {} events, {}", c.event_count, fmt_money(&c.total_amount))),
            ]
        })
        .collect();
    side.push(Line::from(""));
    side.push(Line::from(s.story_narrative.clone()));
    for g in &s.goal_progress {
        side.push(Line::from(format!("{}: {}% ({})", g.name, g.percentage, g.time_left)));
    }
    if let Some(notice) = &p.notice {
        side.push(Line::from(""));
        side.push(Line::from(notice.clone()));
    }
    f.render_widget(
        Paragraph::new(side).wrap(Wrap { trim: true }).block(Block::default().borders(Borders::ALL).title("Chapters")),
        cols[1],
    );
}

// ============= Goals =============

fn draw_goals(f: &mut Frame, area: Rect, p: &GoalsPage, list: &mut ratatui::widgets::ListState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(area);

    let st = p.stats();
    let filter = p.selected_category.map(|c| c.label()).unwrap_or("All Goals");
    let stats = vec![
        Line::from(format!(
            "{} goals | {} completed | {} in progress | {} not started | saved {} of {} ({}%)",
            st.total_goals,
            st.completed,
            st.in_progress,
            st.not_started,
            fmt_money_whole(&st.total_current),
            fmt_money_whole(&st.total_target),
            st.total_progress.round()
        )),
        Line::from(format!("Filter: {filter} | Sort: {} | n: new  e: edit  p: progress  x: delete  f/o: filter/sort", p.sort_by.label())),
    ];
    f.render_widget(Paragraph::new(stats).block(Block::default().borders(Borders::ALL).title("Goals")), rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let goals = p.visible_goals();
    if goals.is_empty() {
        f.render_widget(
            Paragraph::new(p.empty_message()).block(Block::default().borders(Borders::ALL)),
            cols[0],
        );
        return;
    }

    let today = today();
    let items: Vec<ListItem> = goals
        .iter()
        .map(|g| {
            let tier = match progress_tier(g.progress) {
                ProgressTier::High => "●",
                ProgressTier::Medium => "◐",
                ProgressTier::Low => "○",
            };
            ListItem::new(Line::from(format!(
                "{tier} {} {}  {} / {}  {}%",
                g.icon,
                g.title,
                fmt_money_whole(&g.current_amount),
                fmt_money_whole(&g.target_amount),
                clamped_progress(g.current_amount, g.target_amount).round_dp(1)
            )))
        })
        .collect();
    let goal_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Your Goals"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(goal_list, cols[0], list);

    let Some(g) = list.selected().and_then(|i| goals.get(i)) else { return };
    let mut detail = vec![
        Line::styled(g.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Line::from(g.category.label()),
        Line::from(g.description.clone()),
        Line::from(format!(
            "Target date {} ({}) | monthly {}",
            short_date(&g.target_date),
            time_remaining(today, g.target_date),
            fmt_money(&g.monthly_target)
        )),
        Line::from(""),
        Line::from(g.story_narrative.clone()),
        Line::from(format!("\"{}\"", g.motivation_message)),
        Line::from(""),
    ];
    for m in &g.milestones {
        let check = if m.achieved { "✔" } else { "·" };
        detail.push(Line::from(format!("{check} {}% {}", m.percentage, m.description)));
    }
    for h in g.progress_history.iter().rev().take(3) {
        detail.push(Line::from(format!("{} {:?} {} → {}", short_date(&h.date), h.kind, fmt_money(&h.amount), fmt_money(&h.new_total))));
    }
    f.render_widget(
        Paragraph::new(detail).wrap(Wrap { trim: true }).block(Block::default().borders(Borders::ALL).title("Details")),
        cols[1],
    );
}

// ============= Expenses =============

fn draw_expenses(
    f: &mut Frame,
    area: Rect,
    p: &ExpensesPage,
    list: &mut ratatui::widgets::ListState,
    focus: usize,
    editing: bool,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    let today = today();
    let titles = ExpenseTab::ALL.iter().map(|t| Line::from(t.label())).collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(ExpenseTab::ALL.iter().position(|t| *t == p.tab).unwrap_or(0))
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Expenses | total {} | this month {} (Tab: switch)",
            fmt_money(&p.total_spent()),
            fmt_money(&p.monthly_spending(today))
        )))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    f.render_widget(tabs, rows[0]);

    match p.tab {
        ExpenseTab::Entry => draw_expense_entry(f, rows[1], p, focus, editing),
        ExpenseTab::List => draw_expense_list(f, rows[1], p, list),
        ExpenseTab::Categories => draw_categories(f, rows[1], p, list),
        ExpenseTab::Receipt => draw_receipt(f, rows[1], p),
        ExpenseTab::Templates => draw_templates(f, rows[1], p, list),
    }
}

fn draw_expense_entry(f: &mut Frame, area: Rect, p: &ExpensesPage, focus: usize, editing: bool) {
    let form = &p.form;
    let category = if form.category.is_empty() { "<choose with ←/→>".to_string() } else { p.category_label(&form.category) };
    let mut fields = vec![
        ("Amount", form.amount.clone()),
        ("Description", form.description.clone()),
        ("Category", category),
        ("Date", form.date.clone()),
    ];
    if form.show_advanced {
        fields.push(("Narrative", form.narrative.clone()));
    }
    let mut lines: Vec<Line> = fields
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let marker = match (i == focus, editing) {
                (true, true) => "✎ ",
                (true, false) => "▶ ",
                _ => "  ",
            };
            Line::from(format!("{marker}{label:<12}: {value}"))
        })
        .collect();
    lines.push(Line::from(format!("  Recurring   : {}", if form.is_recurring { "yes" } else { "no" })));
    lines.push(Line::from(""));
    if let Some(impact) = p.story_impact_preview() {
        lines.push(Line::from(format!("Story impact: {impact}")));
    }
    if let Some(impact) = p.budget_impact_preview() {
        let severity = match impact.severity() {
            Severity::Critical => "over budget",
            Severity::Warning => "warning",
            Severity::Caution => "caution",
            Severity::Healthy => "healthy",
        };
        lines.push(Line::from(format!(
            "Budget: {} of {} ({}%, {severity})",
            fmt_money(&impact.new_total),
            fmt_money(&impact.budget),
            fixed2(&impact.percentage_used)
        )));
        lines.push(Line::from(impact.narrative()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(
        "i/Enter: edit  j/k: field  ←/→: category  r: recurring  v: advanced  n: new category  s: save  c: clear",
    ));
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(Block::default().borders(Borders::ALL).title("Add Expense")),
        area,
    );
}

fn draw_expense_list(f: &mut Frame, area: Rect, p: &ExpensesPage, list: &mut ratatui::widgets::ListState) {
    let expenses = p.visible_expenses();
    let filter = p.filter_category.as_deref().map(|c| p.category_label(c)).unwrap_or_else(|| "All".into());
    let title = format!(
        "Expenses | filter: {filter} | sort: {} | {} selected (space, A, m: move, x: delete, f/o)",
        p.sort_by.label(),
        p.selected.len()
    );
    if expenses.is_empty() {
        f.render_widget(
            Paragraph::new(p.empty_list_message()).block(Block::default().borders(Borders::ALL).title(title)),
            area,
        );
        return;
    }

    let today = today();
    let header = Row::new(vec!["", "Date", "Category", "Description", "Amount", "When"]).height(1);
    let body: Vec<Row> = expenses
        .iter()
        .map(|e| {
            let mark = if p.selected.contains(&e.id) { "[x]" } else { "[ ]" };
            let recurring = if e.is_recurring { " ↻" } else { "" };
            Row::new(vec![
                Cell::from(mark),
                Cell::from(short_date(&e.date)),
                Cell::from(p.category_label(&e.category)),
                Cell::from(format!("{}{recurring}", e.description)),
                Cell::from(fmt_money(&e.amount)),
                Cell::from(story_context(e.date, today)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(3),
        Constraint::Length(13),
        Constraint::Length(18),
        Constraint::Percentage(45),
        Constraint::Length(12),
        Constraint::Length(18),
    ];
    let mut tsel = TableState::default().with_selected(list.selected());
    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(table, area, &mut tsel);
}

fn draw_categories(f: &mut Frame, area: Rect, p: &ExpensesPage, list: &mut ratatui::widgets::ListState) {
    let items: Vec<ListItem> = p
        .categories
        .iter()
        .map(|c| {
            let usage = category_usage(&c.id);
            let filled = (usage_percent(usage) / 10) as usize;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));
            let custom = if c.is_custom { " (custom)" } else { "" };
            ListItem::new(vec![
                Line::from(format!("{} {}{custom}  {}  {bar} {usage} uses", c.icon, c.name, c.color)),
                Line::from(format!("   {}", c.description)),
            ])
        })
        .collect();
    let categories = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Categories (n: new, e: edit, x: delete)"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(categories, area, list);
}

fn draw_receipt(f: &mut Frame, area: Rect, p: &ExpensesPage) {
    let mut lines = Vec::new();
    match &p.receipt {
        None => lines.push(Line::from("o: choose a receipt image (jpg, png, gif, webp, bmp, heic)")),
        Some(scan) => {
            lines.push(Line::from(format!("{} ({})", scan.file_name, scan.size_mb())));
            if scan.is_processing {
                lines.push(Line::from("Reading your receipt…"));
            }
            if let Some(x) = &scan.extraction {
                lines.push(Line::from(format!(
                    "{} | {} | {} | confidence {}%",
                    x.merchant,
                    fmt_money(&x.amount),
                    short_date(&x.date),
                    (x.confidence * rust_decimal::Decimal::ONE_HUNDRED).round()
                )));
                for item in &x.items {
                    lines.push(Line::from(format!("  {:<20} {}", item.name, fmt_money(&item.price))));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(x.story_context.clone()));
                lines.push(Line::from(""));
                lines.push(Line::from("Enter: save as expense | r: discard"));
            }
        }
    }
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(Block::default().borders(Borders::ALL).title("Receipt Scanner")),
        area,
    );
}

fn draw_templates(f: &mut Frame, area: Rect, p: &ExpensesPage, list: &mut ratatui::widgets::ListState) {
    let items: Vec<ListItem> = p
        .templates()
        .map(|t| {
            let freq = t.frequency.map(|x| x.as_str()).unwrap_or("custom");
            ListItem::new(vec![
                Line::from(format!("{} {}  {}  [{freq}]", t.icon, t.name, fmt_money(&t.amount))),
                Line::from(format!("   {}", t.story_context)),
            ])
        })
        .collect();
    let templates = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Quick Templates (Enter: use, n: new)"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(templates, area, list);
}

// ============= Sign in / sign up =============

fn field_line(label: &str, value: String, focused: bool, error: Option<&str>) -> Vec<Line<'static>> {
    let marker = if focused { "▶ " } else { "  " };
    let mut lines = vec![Line::from(format!("{marker}{label:<18}: {value}"))];
    if let Some(err) = error {
        lines.push(Line::from(format!("    ⚠ {err}")));
    }
    lines
}

fn draw_login(f: &mut Frame, area: Rect, p: &LoginPage, focus: usize) {
    let mut lines = vec![Line::styled("Welcome back", Style::default().add_modifier(Modifier::BOLD)), Line::from("")];
    lines.extend(field_line("Email", p.form.email.clone(), focus == 0, p.errors.get("email")));
    lines.extend(field_line("Password", "*".repeat(p.form.password.chars().count()), focus == 1, p.errors.get("password")));
    lines.push(Line::from(format!("  [{}] Remember me", if p.form.remember_me { "x" } else { " " })));
    lines.push(Line::from(""));
    if p.is_loading {
        lines.push(Line::from("Signing in…"));
    }
    if let Some(err) = &p.general_error {
        lines.push(Line::from(format!("⚠ {err}")));
    }
    if let Some(notice) = &p.notice {
        lines.push(Line::from(notice.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Enter: sign in | Ctrl-R: remember | Ctrl-F: forgot password | Ctrl-N: create account | Esc: quit"));
    let area = center_rect(area, 90, 18);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(Block::default().borders(Borders::ALL).title("Sign In")),
        area,
    );
}

fn draw_registration(f: &mut Frame, area: Rect, p: &RegistrationPage, focus: usize) {
    let form = &p.form;
    let masked = |s: &str| "*".repeat(s.chars().count());
    let mut lines = vec![Line::styled("Start your financial story", Style::default().add_modifier(Modifier::BOLD)), Line::from("")];
    lines.extend(field_line("Full name", form.full_name.clone(), focus == 0, p.errors.get("fullName")));
    lines.extend(field_line("Email", form.email.clone(), focus == 1, p.errors.get("email")));
    lines.extend(field_line("Password", masked(&form.password), focus == 2, p.errors.get("password")));
    if !form.password.is_empty() {
        let ok = if p.strength.score >= MIN_STRENGTH { "✔" } else { "✖" };
        lines.push(Line::from(format!("    {ok} Strength: {} ({}/5)", p.strength.label(), p.strength.score)));
        for hint in &p.strength.feedback {
            lines.push(Line::from(format!("      · {hint}")));
        }
    }
    lines.extend(field_line("Confirm password", masked(&form.confirm_password), focus == 3, p.errors.get("confirmPassword")));
    lines.push(Line::from(format!("  [{}] I agree to the Terms of Service", if form.agree_to_terms { "x" } else { " " })));
    if let Some(err) = p.errors.get("agreeToTerms") {
        lines.push(Line::from(format!("    ⚠ {err}")));
    }
    lines.push(Line::from(format!("  [{}] I agree to the Privacy Policy", if form.agree_to_privacy { "x" } else { " " })));
    if let Some(err) = p.errors.get("agreeToPrivacy") {
        lines.push(Line::from(format!("    ⚠ {err}")));
    }
    lines.push(Line::from(""));
    if p.is_loading {
        lines.push(Line::from("Creating your account…"));
    }
    lines.push(Line::from("Enter: create account | Ctrl-T: terms | Ctrl-P: privacy | Ctrl-L: sign in | Esc: quit"));
    let area = center_rect(area, 90, 26);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(Block::default().borders(Borders::ALL).title("Create Account")),
        area,
    );
}

fn draw_not_found(f: &mut Frame, area: Rect, p: &NotFoundPage) {
    let lines = vec![
        Line::styled("404", Style::default().add_modifier(Modifier::BOLD)),
        Line::from(p.message()),
        Line::from(""),
        Line::from("Enter: go home | b: go back"),
    ];
    f.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL)), center_rect(area, 60, 8));
}

fn center_rect(rect: Rect, w: u16, h: u16) -> Rect {
    let x = rect.x + rect.width.saturating_sub(w) / 2;
    let y = rect.y + rect.height.saturating_sub(h) / 2;
    Rect { x, y, width: w.min(rect.width), height: h.min(rect.height) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::db::LocalStorage;
    use crate::latency::Latency;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    async fn render(path: &str) -> String {
        let storage = LocalStorage::in_memory().await.unwrap();
        let mut app = App::start(storage, Latency::none(), path).await;
        app.tick().await;
        screen(&mut app)
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).await.unwrap();
    }

    async fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    #[tokio::test]
    async fn sign_in_frame_shows_busy_state_before_the_request_runs() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let mut app = App::start(storage, Latency::none(), router::LOGIN).await;
        type_str(&mut app, crate::auth::DEMO_EMAIL).await;
        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, crate::auth::DEMO_PASSWORD).await;
        press(&mut app, KeyCode::Enter).await;

        let busy = screen(&mut app);
        assert!(busy.contains("Signing in…"));
        assert!(busy.contains("working…"));
        assert_eq!(app.nav.path(), router::LOGIN);

        app.tick().await;
        assert_eq!(app.nav.path(), router::DASHBOARD);
        assert!(screen(&mut app).contains("Loading your financial story…"));

        app.tick().await;
        let loaded = screen(&mut app);
        assert!(loaded.contains("Welcome back, Yousif!"));
        assert!(!loaded.contains("working…"));
    }

    #[tokio::test]
    async fn submitted_goal_modal_shows_saving_until_tick() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let mut app = App::start(storage, Latency::none(), router::GOALS).await;
        press(&mut app, KeyCode::Char('p')).await;
        type_str(&mut app, "25").await;
        press(&mut app, KeyCode::Enter).await;

        assert!(app.is_saving_modal());
        let saving = screen(&mut app);
        assert!(saving.contains("Saving…"));
        assert!(saving.contains("working…"));

        app.tick().await;
        assert!(app.modal.is_none());
        assert!(!app.is_busy());
        assert_eq!(app.status, "Progress updated");
    }

    #[tokio::test]
    async fn every_page_renders() {
        for (path, _) in router::ROUTES {
            let screen = render(path).await;
            assert!(screen.contains("Financial Storyteller"), "{path}");
        }
        assert!(render("/missing").await.contains("404"));
    }

    #[tokio::test]
    async fn dashboard_shows_greeting_after_load() {
        assert!(render("/dashboard").await.contains("Welcome back, Yousif!"));
    }

    #[tokio::test]
    async fn back_hint_is_dimmed_without_history() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let mut app = App::start(storage, Latency::none(), router::DASHBOARD).await;
        let back = |app: &App| status_line(app).spans.into_iter().find(|s| s.content == "b: back").unwrap();
        assert!(back(&app).style.add_modifier.contains(Modifier::DIM));

        press(&mut app, KeyCode::Char('2')).await;
        assert!(!back(&app).style.add_modifier.contains(Modifier::DIM));
        assert!(status_line(&app).to_string().ends_with("q: quit"));
    }

    #[test]
    fn center_rect_clamps_to_area() {
        let outer = Rect { x: 0, y: 0, width: 20, height: 10 };
        assert_eq!(center_rect(outer, 40, 4), Rect { x: 0, y: 3, width: 20, height: 4 });
    }
}
