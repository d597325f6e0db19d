mod format;
mod lenient;
mod nav;
mod payload;
mod view;

pub use format::{
    format_currency, format_date, period_label, status_style, status_tone, Period, PillTone,
    StatusStyle,
};
pub use nav::{ListFilter, NavTarget};
pub use payload::{DashboardPayload, InvoiceStatus, InvoiceSummary, OverdueSummary, QuickStats};
pub use view::{
    build_view, build_view_with, ActionKind, ActionVariant, Header, InvoiceRow, InvoiceTable,
    KpiCard, NavItem, NavSection, OverdueAction, OverdueSection, QuickAction, StatCounter,
    StatsSection, TableRow, ViewOptions, ViewTree, DEFAULT_DATE_FORMAT,
};
