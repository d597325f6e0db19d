use askama::Template;

use crate::dashboard::ViewTree;
use crate::error::Result;
use crate::theme::Palette;

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    view: &'a ViewTree,
    palette: &'a Palette,
}

/// Loading and error screens share one layout.
#[derive(Template)]
#[template(path = "status.html")]
struct StatusTemplate<'a> {
    palette: &'a Palette,
    class: &'a str,
    icon: &'a str,
    message: &'a str,
}

/// Render a built view as a standalone HTML document. Colors come from the
/// palette the view was built with.
pub fn render_dashboard(view: &ViewTree) -> Result<String> {
    let palette = Palette::for_mode(view.theme);
    let page = DashboardTemplate {
        view,
        palette: &palette,
    };
    Ok(page.render()?)
}

pub fn render_loading(palette: &Palette) -> Result<String> {
    let page = StatusTemplate {
        palette,
        class: "accounting-loading",
        icon: "fa-spinner fa-spin",
        message: "Loading dashboard...",
    };
    Ok(page.render()?)
}

pub fn render_error(palette: &Palette) -> Result<String> {
    let page = StatusTemplate {
        palette,
        class: "accounting-error",
        icon: "fa-exclamation-triangle",
        message: "Error loading dashboard. Please refresh.",
    };
    Ok(page.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{build_view_with, DashboardPayload, ViewOptions};
    use chrono::NaiveDate;
    use serde_json::json;

    fn render(value: serde_json::Value, palette: &Palette) -> String {
        let payload = DashboardPayload::from_value(value).unwrap();
        let options = ViewOptions {
            today: NaiveDate::from_ymd_opt(2026, 10, 19),
            ..ViewOptions::default()
        };
        render_dashboard(&build_view_with(&payload, palette, &options)).unwrap()
    }

    #[test]
    fn dashboard_contains_every_section() {
        let html = render(
            json!({"cash_balance": 10000, "receivables": 2500.5, "open_invoices_count": 3}),
            &Palette::light(),
        );

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("$10,000.00"));
        assert!(html.contains("$2,500.50"));
        assert!(html.contains("Expenses (MTD)"));
        assert!(html.contains("October 2026"));
        assert!(html.contains("Quick Actions"));
        assert!(html.contains(r#"<span class="action-badge">3</span>"#));
        assert!(html.contains("All caught up!"));
        assert!(html.contains("No invoices found"));
        assert!(html.contains(r#"href="/app/query-report/General%20Ledger""#));
    }

    #[test]
    fn theme_colors_reach_the_markup() {
        let light = render(json!({}), &Palette::light());
        let dark = render(json!({}), &Palette::dark());

        assert!(light.contains("background: #f5f5f5"));
        assert!(dark.contains("background: #0d0d0d"));
        assert!(dark.contains(r#"data-theme="dark""#));
        assert!(!dark.contains("#f5f5f5;"));
    }

    #[test]
    fn customer_names_are_escaped() {
        let html = render(
            json!({"recent_invoices": [
                {"name": "SINV-1", "customer_name": "<script>alert(1)</script>", "status": "Paid"}
            ]}),
            &Palette::light(),
        );
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("alert(1)"));
        assert!(html.contains(r#"href="/app/sales-invoice/SINV-1""#));
    }

    #[test]
    fn overdue_link_only_when_overdue() {
        let html = render(json!({"overdue": {"count": 4, "total": 1200}}), &Palette::light());
        assert!(html.contains("View Overdue"));
        assert!(html.contains("/app/sales-invoice?status=Overdue"));
        assert!(!html.contains("All caught up!"));
    }

    #[test]
    fn button_and_pill_styles_match_page_design() {
        let html = render(
            json!({"recent_invoices": [{"name": "SINV-1", "status": "Paid"}]}),
            &Palette::dark(),
        );
        assert!(html.contains(".action-btn-info { background: linear-gradient(135deg, #0288d1"));
        assert!(html.contains(".action-btn-outline { background: transparent; color: #f57c00"));
        assert!(html.contains("font-size: 11px; font-weight: 600; text-transform: uppercase; }"));
        assert!(!html.contains("#7b1fa2; }"));

        let empty = render(json!({}), &Palette::dark());
        assert!(empty.contains(
            r#"class="placeholder-cell" style="padding: 24px; text-align: center; color: #999999;""#
        ));
    }

    #[test]
    fn status_screens_render() {
        let loading = render_loading(&Palette::dark()).unwrap();
        assert!(loading.contains("Loading dashboard..."));
        assert!(loading.contains("color: #999999"));

        let error = render_error(&Palette::light()).unwrap();
        assert!(error.contains("Error loading dashboard. Please refresh."));
    }
}
