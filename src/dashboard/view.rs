use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::format::{format_currency, format_date, period_label, status_style, Period, StatusStyle};
use super::nav::NavTarget;
use super::payload::{DashboardPayload, InvoiceStatus, InvoiceSummary, OverdueSummary, QuickStats};
use crate::theme::{KpiColor, Palette, ThemeMode};

pub const DEFAULT_DATE_FORMAT: &str = "%m-%d-%Y";

const SALES_INVOICE: &str = "Sales Invoice";
const PURCHASE_INVOICE: &str = "Purchase Invoice";

/// Inputs to the builder that don't come from the payload.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Date used for the period heading. None reads the local wall clock.
    pub today: Option<NaiveDate>,
    /// strftime pattern for invoice posting dates.
    pub date_format: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            today: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Everything the dashboard shows, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewTree {
    pub theme: ThemeMode,
    pub header: Header,
    pub sidebar: Vec<NavSection>,
    pub kpis: Vec<KpiCard>,
    pub quick_actions: Vec<QuickAction>,
    pub stats: StatsSection,
    pub overdue: OverdueSection,
    pub invoices: InvoiceTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub title: &'static str,
    pub period: String,
    pub refresh: NavTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavSection {
    pub title: &'static str,
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub target: NavTarget,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub icon: &'static str,
    pub color: KpiColor,
    pub accent: &'static str,
    pub icon_background: &'static str,
    pub target: Option<NavTarget>,
}

impl KpiCard {
    pub fn route(&self) -> Option<String> {
        self.target.as_ref().map(NavTarget::route)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionVariant {
    Primary,
    Success,
    Warning,
    Info,
    Default,
}

impl ActionVariant {
    pub fn css_class(self) -> &'static str {
        match self {
            ActionVariant::Primary => "action-btn-primary",
            ActionVariant::Success => "action-btn-success",
            ActionVariant::Warning => "action-btn-warning",
            ActionVariant::Info => "action-btn-info",
            ActionVariant::Default => "action-btn-default",
        }
    }
}

/// What a quick action does when clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    CreateDocument { doctype: &'static str },
    NavigateFiltered {
        doctype: &'static str,
        field: &'static str,
        value: &'static str,
    },
    NavigateReport { name: &'static str },
}

impl ActionKind {
    pub fn target(&self) -> NavTarget {
        match *self {
            ActionKind::CreateDocument { doctype } => NavTarget::new_document(doctype),
            ActionKind::NavigateFiltered {
                doctype,
                field,
                value,
            } => NavTarget::filtered(doctype, field, value),
            ActionKind::NavigateReport { name } => NavTarget::report(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub icon: &'static str,
    pub variant: ActionVariant,
    pub kind: ActionKind,
    /// Only set when there is something to count.
    pub badge: Option<u64>,
}

impl QuickAction {
    pub fn route(&self) -> String {
        self.kind.target().route()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSection {
    pub period: Period,
    pub counters: Vec<StatCounter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCounter {
    pub label: &'static str,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverdueSection {
    pub count: u64,
    pub total: String,
    pub has_overdue: bool,
    pub border_color: &'static str,
    pub count_color: &'static str,
    pub action: OverdueAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverdueAction {
    ViewOverdue {
        label: &'static str,
        target: NavTarget,
    },
    CaughtUp { label: &'static str },
}

impl OverdueAction {
    pub fn label(&self) -> &'static str {
        match self {
            OverdueAction::ViewOverdue { label, .. } | OverdueAction::CaughtUp { label } => *label,
        }
    }

    pub fn target(&self) -> Option<&NavTarget> {
        match self {
            OverdueAction::ViewOverdue { target, .. } => Some(target),
            OverdueAction::CaughtUp { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceTable {
    pub rows: Vec<TableRow>,
    pub view_open: NavTarget,
    pub view_all: NavTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableRow {
    Invoice(InvoiceRow),
    Placeholder { message: &'static str },
}

impl TableRow {
    pub fn invoice(&self) -> Option<&InvoiceRow> {
        match self {
            TableRow::Invoice(row) => Some(row),
            TableRow::Placeholder { .. } => None,
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            TableRow::Placeholder { message } => Some(*message),
            TableRow::Invoice(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRow {
    pub name: String,
    pub customer: String,
    pub date: String,
    pub total: String,
    pub outstanding: String,
    pub status: InvoiceStatus,
    pub style: StatusStyle,
    pub target: NavTarget,
}

/// Build the view tree using today's date for the period heading.
pub fn build_view(payload: &DashboardPayload, palette: &Palette) -> ViewTree {
    build_view_with(payload, palette, &ViewOptions::default())
}

pub fn build_view_with(payload: &DashboardPayload, palette: &Palette, options: &ViewOptions) -> ViewTree {
    let today = options.today.unwrap_or_else(|| Local::now().date_naive());
    let period = period_label(today);

    ViewTree {
        theme: palette.mode,
        header: Header {
            title: "Dashboard",
            period: period.display.clone(),
            refresh: NavTarget::page("accounting-home"),
        },
        sidebar: sidebar(),
        kpis: kpi_cards(payload, palette),
        quick_actions: quick_actions(payload.open_invoices_count),
        stats: stats_section(&payload.quick_stats, period),
        overdue: overdue_section(&payload.overdue, palette),
        invoices: invoice_table(&payload.recent_invoices, palette, &options.date_format),
    }
}

fn kpi_cards(payload: &DashboardPayload, palette: &Palette) -> Vec<KpiCard> {
    let card = |title, amount: f64, icon, color: KpiColor, target| KpiCard {
        title,
        value: format_currency(amount),
        icon,
        color,
        accent: color.accent(),
        icon_background: color.icon_background(palette),
        target,
    };

    vec![
        card("Cash Balance", payload.cash_balance, "fa-university", KpiColor::Blue, None),
        card(
            "Receivables",
            payload.receivables,
            "fa-file-text-o",
            KpiColor::Green,
            Some(NavTarget::filtered(SALES_INVOICE, "status", "Unpaid")),
        ),
        card(
            "Payables",
            payload.payables,
            "fa-credit-card",
            KpiColor::Orange,
            Some(NavTarget::filtered(PURCHASE_INVOICE, "status", "Unpaid")),
        ),
        card("Revenue (MTD)", payload.revenue, "fa-arrow-up", KpiColor::Purple, None),
        card("Expenses (MTD)", payload.expenses, "fa-arrow-down", KpiColor::Red, None),
    ]
}

fn quick_actions(open_invoices: u64) -> Vec<QuickAction> {
    vec![
        QuickAction {
            label: "New Invoice",
            icon: "fa-plus",
            variant: ActionVariant::Primary,
            kind: ActionKind::CreateDocument {
                doctype: SALES_INVOICE,
            },
            badge: None,
        },
        QuickAction {
            label: "Record Payment",
            icon: "fa-money",
            variant: ActionVariant::Success,
            kind: ActionKind::CreateDocument {
                doctype: "Payment Entry",
            },
            badge: None,
        },
        QuickAction {
            label: "Open Invoices",
            icon: "fa-clock-o",
            variant: ActionVariant::Warning,
            kind: ActionKind::NavigateFiltered {
                doctype: SALES_INVOICE,
                field: "status",
                value: "Unpaid",
            },
            badge: Some(open_invoices).filter(|n| *n > 0),
        },
        QuickAction {
            label: "Journal Entry",
            icon: "fa-book",
            variant: ActionVariant::Info,
            kind: ActionKind::CreateDocument {
                doctype: "Journal Entry",
            },
            badge: None,
        },
        QuickAction {
            label: "General Ledger",
            icon: "fa-list",
            variant: ActionVariant::Default,
            kind: ActionKind::NavigateReport {
                name: "General Ledger",
            },
            badge: None,
        },
    ]
}

fn stats_section(stats: &QuickStats, period: Period) -> StatsSection {
    StatsSection {
        period,
        counters: vec![
            StatCounter {
                label: "Invoices Created",
                value: stats.invoices_this_month,
            },
            StatCounter {
                label: "Payments Received",
                value: stats.payments_this_month,
            },
            StatCounter {
                label: "Active Customers",
                value: stats.total_customers,
            },
        ],
    }
}

fn overdue_section(overdue: &OverdueSummary, palette: &Palette) -> OverdueSection {
    let has_overdue = overdue.count > 0;

    let (border_color, count_color, action) = if has_overdue {
        (
            palette.overdue_bad_border,
            KpiColor::Red.accent(),
            OverdueAction::ViewOverdue {
                label: "View Overdue",
                target: NavTarget::filtered(SALES_INVOICE, "status", "Overdue"),
            },
        )
    } else {
        (
            palette.overdue_good_border,
            KpiColor::Green.accent(),
            OverdueAction::CaughtUp {
                label: "All caught up!",
            },
        )
    };

    OverdueSection {
        count: overdue.count,
        total: format_currency(overdue.total),
        has_overdue,
        border_color,
        count_color,
        action,
    }
}

fn invoice_table(invoices: &[InvoiceSummary], palette: &Palette, date_format: &str) -> InvoiceTable {
    let rows = if invoices.is_empty() {
        vec![TableRow::Placeholder {
            message: "No invoices found",
        }]
    } else {
        invoices
            .iter()
            .map(|inv| {
                TableRow::Invoice(InvoiceRow {
                    name: inv.name.clone(),
                    customer: inv.customer_name.clone().unwrap_or_default(),
                    date: format_date(inv.posting_date, date_format),
                    total: format_currency(inv.grand_total),
                    outstanding: format_currency(inv.outstanding_amount),
                    status: inv.status.clone(),
                    style: status_style(&inv.status, palette),
                    target: NavTarget::document(SALES_INVOICE, &inv.name),
                })
            })
            .collect()
    };

    InvoiceTable {
        rows,
        view_open: NavTarget::filtered(SALES_INVOICE, "status", "Unpaid"),
        view_all: NavTarget::list(SALES_INVOICE),
    }
}

fn sidebar() -> Vec<NavSection> {
    let item = |label, icon, target| NavItem {
        label,
        icon,
        target,
        active: false,
    };

    vec![
        NavSection {
            title: "Overview",
            items: vec![NavItem {
                active: true,
                ..item("Dashboard", "fa-dashboard", NavTarget::page("accounting-home"))
            }],
        },
        NavSection {
            title: "Sales",
            items: vec![
                item("Invoices", "fa-file-text-o", NavTarget::list(SALES_INVOICE)),
                item("Customers", "fa-users", NavTarget::list("Customer")),
                item("Products & Services", "fa-cube", NavTarget::list("Item")),
            ],
        },
        NavSection {
            title: "Expenses",
            items: vec![
                item("Bank Transactions", "fa-download", NavTarget::list("Bank Transaction")),
                item(
                    "Reconciliation",
                    "fa-check-square-o",
                    NavTarget::page("bank-reconciliation-tool"),
                ),
                item("Bills", "fa-file-o", NavTarget::list(PURCHASE_INVOICE)),
                item("Vendors", "fa-truck", NavTarget::list("Supplier")),
            ],
        },
        NavSection {
            title: "Banking",
            items: vec![
                item("Payments", "fa-money", NavTarget::list("Payment Entry")),
                item("Journal Entries", "fa-book", NavTarget::list("Journal Entry")),
                item("Chart of Accounts", "fa-university", NavTarget::list("Account")),
            ],
        },
        NavSection {
            title: "Reports",
            items: vec![
                item(
                    "Profit & Loss",
                    "fa-line-chart",
                    NavTarget::report("Profit and Loss Statement"),
                ),
                item("Balance Sheet", "fa-balance-scale", NavTarget::report("Balance Sheet")),
                item("General Ledger", "fa-list-alt", NavTarget::report("General Ledger")),
                item(
                    "Accounts Receivable",
                    "fa-clock-o",
                    NavTarget::report("Accounts Receivable"),
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pinned() -> ViewOptions {
        ViewOptions {
            today: NaiveDate::from_ymd_opt(2026, 10, 19),
            ..ViewOptions::default()
        }
    }

    fn payload(value: serde_json::Value) -> DashboardPayload {
        DashboardPayload::from_value(value).unwrap()
    }

    fn scenario() -> DashboardPayload {
        payload(json!({
            "cash_balance": 10000,
            "receivables": 2500.5,
            "payables": 0,
            "revenue": 500,
            "expenses": 0,
            "open_invoices_count": 3,
            "quick_stats": {},
            "overdue": {"count": 0, "total": 0},
            "recent_invoices": []
        }))
    }

    #[test]
    fn scenario_renders_fixed_kpis_and_placeholders() {
        let view = build_view_with(&scenario(), &Palette::light(), &pinned());

        let titles: Vec<_> = view.kpis.iter().map(|k| k.title).collect();
        assert_eq!(
            titles,
            ["Cash Balance", "Receivables", "Payables", "Revenue (MTD)", "Expenses (MTD)"]
        );
        let values: Vec<_> = view.kpis.iter().map(|k| k.value.as_str()).collect();
        assert_eq!(values, ["$10,000.00", "$2,500.50", "$0.00", "$500.00", "$0.00"]);

        assert!(view.stats.counters.iter().all(|c| c.value == 0));
        assert!(!view.overdue.has_overdue);
        assert_eq!(view.overdue.action.label(), "All caught up!");

        assert_eq!(view.invoices.rows.len(), 1);
        assert_eq!(view.invoices.rows[0].placeholder(), Some("No invoices found"));
    }

    #[test]
    fn only_receivables_and_payables_navigate() {
        let view = build_view_with(&scenario(), &Palette::light(), &pinned());
        let routes: Vec<_> = view
            .kpis
            .iter()
            .map(|k| k.target.as_ref().map(NavTarget::route))
            .collect();
        assert_eq!(
            routes,
            [
                None,
                Some("/app/sales-invoice?status=Unpaid".to_string()),
                Some("/app/purchase-invoice?status=Unpaid".to_string()),
                None,
                None,
            ]
        );
    }

    #[test]
    fn building_twice_gives_identical_views() {
        let palette = Palette::dark();
        let first = build_view_with(&scenario(), &palette, &pinned());
        let second = build_view_with(&scenario(), &palette, &pinned());
        assert_eq!(first, second);
    }

    #[test]
    fn open_invoices_badge_only_when_positive() {
        let view = build_view_with(&scenario(), &Palette::light(), &pinned());
        let badges: Vec<_> = view.quick_actions.iter().map(|a| a.badge).collect();
        assert_eq!(badges, [None, None, Some(3), None, None]);

        let none_open = build_view_with(&DashboardPayload::default(), &Palette::light(), &pinned());
        assert!(none_open.quick_actions.iter().all(|a| a.badge.is_none()));
    }

    #[test]
    fn quick_actions_are_fixed() {
        let view = build_view_with(&DashboardPayload::default(), &Palette::light(), &pinned());
        let routes: Vec<_> = view.quick_actions.iter().map(|a| a.kind.target().route()).collect();
        assert_eq!(
            routes,
            [
                "/app/sales-invoice/new",
                "/app/payment-entry/new",
                "/app/sales-invoice?status=Unpaid",
                "/app/journal-entry/new",
                "/app/query-report/General%20Ledger",
            ]
        );
    }

    #[test]
    fn overdue_boundary_switches_branch() {
        let palette = Palette::light();

        let none = build_view_with(&payload(json!({"overdue": {"count": 0, "total": 0}})), &palette, &pinned());
        assert!(none.overdue.action.target().is_none());
        assert_eq!(none.overdue.border_color, palette.overdue_good_border);
        assert_eq!(none.overdue.count_color, "#2e7d32");

        let one = build_view_with(&payload(json!({"overdue": {"count": 1, "total": 80.25}})), &palette, &pinned());
        assert!(one.overdue.has_overdue);
        assert_eq!(
            one.overdue.action.target().map(NavTarget::route).as_deref(),
            Some("/app/sales-invoice?status=Overdue")
        );
        assert_eq!(one.overdue.border_color, palette.overdue_bad_border);
        assert_eq!(one.overdue.count_color, "#d32f2f");
        assert_eq!(one.overdue.total, "$80.25");
    }

    #[test]
    fn invoices_map_one_to_one_in_order() {
        let data = payload(json!({
            "recent_invoices": [
                {"name": "SINV-0003", "customer_name": "Acme", "posting_date": "2026-10-18",
                 "grand_total": 1500, "outstanding_amount": 1500, "status": "Overdue"},
                {"name": "SINV-0009", "posting_date": "2026-10-01",
                 "grand_total": 20.5, "outstanding_amount": 0, "status": "Paid"},
                {"name": "SINV-0001", "customer_name": "Zed", "status": "Return"}
            ]
        }));
        let view = build_view_with(&data, &Palette::light(), &pinned());

        let rows: Vec<&InvoiceRow> = view.invoices.rows.iter().filter_map(TableRow::invoice).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "SINV-0003");
        assert_eq!(rows[0].date, "10-18-2026");
        assert_eq!(rows[0].total, "$1,500.00");
        assert_eq!(rows[0].target.route(), "/app/sales-invoice/SINV-0003");

        assert_eq!(rows[1].name, "SINV-0009");
        assert_eq!(rows[1].customer, "");
        assert_eq!(rows[1].outstanding, "$0.00");

        assert_eq!(rows[2].name, "SINV-0001");
        assert_eq!(rows[2].date, "");
        assert_eq!(rows[2].status.label(), "Return");
        assert_eq!(rows[2].style.background, Palette::light().pill_gray);
    }

    #[test]
    fn malformed_invoice_list_still_gets_placeholder() {
        let view = build_view_with(&payload(json!({"recent_invoices": "nope"})), &Palette::light(), &pinned());
        assert_eq!(view.invoices.rows.len(), 1);
        assert!(view.invoices.rows[0].invoice().is_none());
    }

    #[test]
    fn stats_carry_period_and_counters() {
        let data = payload(json!({
            "quick_stats": {"invoices_this_month": 12, "payments_this_month": null, "total_customers": "40"}
        }));
        let view = build_view_with(&data, &Palette::light(), &pinned());

        assert_eq!(view.stats.period.display, "October 2026");
        assert_eq!(view.header.period, "October 2026");
        let counters: Vec<_> = view.stats.counters.iter().map(|c| (c.label, c.value)).collect();
        assert_eq!(
            counters,
            [("Invoices Created", 12), ("Payments Received", 0), ("Active Customers", 40)]
        );
    }

    #[test]
    fn kpi_icon_backgrounds_follow_theme() {
        let light = build_view_with(&scenario(), &Palette::light(), &pinned());
        let dark = build_view_with(&scenario(), &Palette::dark(), &pinned());

        assert_eq!(light.theme, ThemeMode::Light);
        assert_eq!(dark.theme, ThemeMode::Dark);
        for (l, d) in light.kpis.iter().zip(&dark.kpis) {
            assert_eq!(l.accent, d.accent);
            assert_ne!(l.icon_background, d.icon_background);
        }
    }

    #[test]
    fn sidebar_marks_dashboard_active() {
        let view = build_view_with(&scenario(), &Palette::light(), &pinned());
        let active: Vec<_> = view
            .sidebar
            .iter()
            .flat_map(|s| &s.items)
            .filter(|i| i.active)
            .map(|i| i.label)
            .collect();
        assert_eq!(active, ["Dashboard"]);
        assert_eq!(view.sidebar.len(), 5);
    }
}
