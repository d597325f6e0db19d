//! Forgiving field decoders for the dashboard payload.
//!
//! The payload is assembled by a server-side query we don't control, so
//! every field goes through `serde_json::Value` and falls back to a zero
//! value instead of failing the whole document.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::payload::InvoiceSummary;

pub(crate) fn amount_from(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Counts truncate toward zero; negatives and junk are zero.
pub(crate) fn count_from(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or_else(|| truncate_count(n.as_f64())),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .unwrap_or_else(|_| truncate_count(s.parse::<f64>().ok()))
        }
        _ => 0,
    }
}

fn truncate_count(value: Option<f64>) -> u64 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .map_or(0, |v| v as u64)
}

pub(crate) fn text_from(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Accepts `YYYY-MM-DD`, ignoring any time part that follows.
pub(crate) fn date_from(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Value::deserialize(d).map(|v| amount_from(&v))
}

pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Value::deserialize(d).map(|v| count_from(&v))
}

pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Value::deserialize(d).map(|v| text_from(&v))
}

pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Value::deserialize(d).map(|v| Some(text_from(&v)).filter(|s| !s.trim().is_empty()))
}

pub fn date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    Value::deserialize(d).map(|v| date_from(&v))
}

/// Nested object that degrades to its default when null or wrong-shaped.
pub fn object<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(d)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Anything other than an array becomes empty; non-object entries are dropped.
pub fn invoices<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<InvoiceSummary>, D::Error> {
    let Value::Array(entries) = Value::deserialize(d)? else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            if !entry.is_object() {
                log::debug!("skipping recent_invoices[{idx}]: not an object");
                return None;
            }
            serde_json::from_value(entry)
                .map_err(|e| log::debug!("skipping recent_invoices[{idx}]: {e}"))
                .ok()
        })
        .collect())
}
