use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt::Write;

use super::payload::InvoiceStatus;
use crate::theme::Palette;

/// Format an amount as `$1,234.50`.
///
/// Missing and non-finite values count as zero. Negative amounts keep the
/// sign after the symbol (`$-42.00`); anything that rounds to zero prints
/// unsigned.
pub fn format_currency<V: Into<Option<f64>>>(value: V) -> String {
    let value = value.into().filter(|v| v.is_finite()).unwrap_or(0.0);
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("${}{}.{}", sign, group_thousands(whole), frac)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

/// Color family of a status pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PillTone {
    Green,
    Orange,
    Red,
    Blue,
    Yellow,
    Gray,
}

/// Resolved pill colors for one status under one palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub tone: PillTone,
    pub background: &'static str,
    pub color: &'static str,
}

pub fn status_tone(status: &InvoiceStatus) -> PillTone {
    match status {
        InvoiceStatus::Paid => PillTone::Green,
        InvoiceStatus::Unpaid => PillTone::Orange,
        InvoiceStatus::Overdue => PillTone::Red,
        InvoiceStatus::Cancelled | InvoiceStatus::Draft => PillTone::Gray,
        InvoiceStatus::Submitted => PillTone::Blue,
        InvoiceStatus::PartlyPaid => PillTone::Yellow,
        InvoiceStatus::Unknown(_) => PillTone::Gray,
    }
}

pub fn status_style(status: &InvoiceStatus, palette: &Palette) -> StatusStyle {
    let tone = status_tone(status);
    let (background, color) = match tone {
        PillTone::Green => (palette.pill_green, palette.pill_green_text),
        PillTone::Orange => (palette.pill_orange, palette.pill_orange_text),
        PillTone::Red => (palette.pill_red, palette.pill_red_text),
        PillTone::Blue => (palette.pill_blue, palette.pill_blue_text),
        PillTone::Yellow => (palette.pill_yellow, palette.pill_yellow_text),
        PillTone::Gray => (palette.pill_gray, palette.pill_gray_text),
    };
    StatusStyle {
        tone,
        background,
        color,
    }
}

/// Month/year heading for the stats card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub month_name: String,
    pub year: i32,
    pub display: String,
}

pub fn period_label(date: NaiveDate) -> Period {
    let month_name = date.format("%B").to_string();
    let year = date.year();
    Period {
        display: format!("{} {}", month_name, year),
        month_name,
        year,
    }
}

/// Format a posting date with a strftime pattern. Falls back to ISO when the
/// pattern is invalid; a missing date is blank.
pub fn format_date(date: Option<NaiveDate>, pattern: &str) -> String {
    let Some(date) = date else {
        return String::new();
    };
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        log::warn!("invalid date format '{pattern}', using %Y-%m-%d");
        return date.format("%Y-%m-%d").to_string();
    }
    out
}
