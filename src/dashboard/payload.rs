use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::lenient;

/// Aggregated figures returned by the dashboard data call.
///
/// Every field is optional on the wire; absent, null or wrong-shaped values
/// decode to zero/empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardPayload {
    #[serde(deserialize_with = "lenient::amount")]
    pub cash_balance: f64,
    #[serde(deserialize_with = "lenient::amount")]
    pub receivables: f64,
    #[serde(deserialize_with = "lenient::amount")]
    pub payables: f64,
    #[serde(deserialize_with = "lenient::amount")]
    pub revenue: f64,
    #[serde(deserialize_with = "lenient::amount")]
    pub expenses: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub open_invoices_count: u64,
    #[serde(deserialize_with = "lenient::object")]
    pub quick_stats: QuickStats,
    #[serde(deserialize_with = "lenient::object")]
    pub overdue: OverdueSummary,
    #[serde(deserialize_with = "lenient::invoices")]
    pub recent_invoices: Vec<InvoiceSummary>,
}

impl DashboardPayload {
    /// Decode a payload, accepting either the bare object or the
    /// `{"message": {...}}` envelope the desk API wraps responses in.
    ///
    /// Returns None when there is no payload at all (null message, or a
    /// body that isn't an object).
    pub fn from_value(value: Value) -> Option<Self> {
        let inner = match value {
            Value::Object(mut map) if map.contains_key("message") => map.remove("message")?,
            other => other,
        };
        if !inner.is_object() {
            return None;
        }
        serde_json::from_value(inner).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuickStats {
    #[serde(deserialize_with = "lenient::count")]
    pub invoices_this_month: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub payments_this_month: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub total_customers: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverdueSummary {
    #[serde(deserialize_with = "lenient::count")]
    pub count: u64,
    #[serde(deserialize_with = "lenient::amount")]
    pub total: f64,
}

/// One row of the recent sales invoices list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InvoiceSummary {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "lenient::date")]
    pub posting_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::amount")]
    pub grand_total: f64,
    #[serde(deserialize_with = "lenient::amount")]
    pub outstanding_amount: f64,
    pub status: InvoiceStatus,
}

/// Sales invoice status as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    Overdue,
    Cancelled,
    Draft,
    Submitted,
    PartlyPaid,
    /// Anything else, with the raw label kept for display.
    Unknown(String),
}

impl InvoiceStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Paid" => InvoiceStatus::Paid,
            "Unpaid" => InvoiceStatus::Unpaid,
            "Overdue" => InvoiceStatus::Overdue,
            "Cancelled" => InvoiceStatus::Cancelled,
            "Draft" => InvoiceStatus::Draft,
            "Submitted" => InvoiceStatus::Submitted,
            "Partly Paid" => InvoiceStatus::PartlyPaid,
            other => InvoiceStatus::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Submitted => "Submitted",
            InvoiceStatus::PartlyPaid => "Partly Paid",
            InvoiceStatus::Unknown(raw) => raw,
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Unknown(String::new())
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for InvoiceStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        lenient::text(d).map(|label| InvoiceStatus::from_label(&label))
    }
}

impl Serialize for InvoiceStatus {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.label())
    }
}
