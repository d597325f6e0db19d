use serde::Serialize;

/// A navigation intent for the host desk. The host decides how to follow it;
/// [`NavTarget::route`] gives the conventional `/app/...` path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavTarget {
    NewDocument { doctype: String },
    List {
        doctype: String,
        filter: Option<ListFilter>,
    },
    Report { name: String },
    Document { doctype: String, name: String },
    Page { route: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListFilter {
    pub field: String,
    pub value: String,
}

impl NavTarget {
    pub fn new_document(doctype: &str) -> Self {
        NavTarget::NewDocument {
            doctype: doctype.to_string(),
        }
    }

    pub fn list(doctype: &str) -> Self {
        NavTarget::List {
            doctype: doctype.to_string(),
            filter: None,
        }
    }

    pub fn filtered(doctype: &str, field: &str, value: &str) -> Self {
        NavTarget::List {
            doctype: doctype.to_string(),
            filter: Some(ListFilter {
                field: field.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn report(name: &str) -> Self {
        NavTarget::Report {
            name: name.to_string(),
        }
    }

    pub fn document(doctype: &str, name: &str) -> Self {
        NavTarget::Document {
            doctype: doctype.to_string(),
            name: name.to_string(),
        }
    }

    pub fn page(route: &str) -> Self {
        NavTarget::Page {
            route: route.to_string(),
        }
    }

    pub fn route(&self) -> String {
        match self {
            NavTarget::NewDocument { doctype } => format!("/app/{}/new", slug(doctype)),
            NavTarget::List { doctype, filter } => match filter {
                Some(f) => format!(
                    "/app/{}?{}={}",
                    slug(doctype),
                    urlencoding::encode(&f.field),
                    urlencoding::encode(&f.value)
                ),
                None => format!("/app/{}", slug(doctype)),
            },
            NavTarget::Report { name } => {
                format!("/app/query-report/{}", urlencoding::encode(name))
            }
            NavTarget::Document { doctype, name } => {
                format!("/app/{}/{}", slug(doctype), urlencoding::encode(name))
            }
            NavTarget::Page { route } => format!("/app/{}", route.trim_start_matches('/')),
        }
    }
}

/// `Sales Invoice` -> `sales-invoice`
fn slug(doctype: &str) -> String {
    doctype
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_follow_desk_conventions() {
        assert_eq!(
            NavTarget::new_document("Sales Invoice").route(),
            "/app/sales-invoice/new"
        );
        assert_eq!(
            NavTarget::filtered("Purchase Invoice", "status", "Unpaid").route(),
            "/app/purchase-invoice?status=Unpaid"
        );
        assert_eq!(NavTarget::list("Payment Entry").route(), "/app/payment-entry");
        assert_eq!(
            NavTarget::report("General Ledger").route(),
            "/app/query-report/General%20Ledger"
        );
        assert_eq!(
            NavTarget::page("bank-reconciliation-tool").route(),
            "/app/bank-reconciliation-tool"
        );
    }

    #[test]
    fn document_names_are_percent_encoded() {
        assert_eq!(
            NavTarget::document("Sales Invoice", "ACC-SINV-2026-00012").route(),
            "/app/sales-invoice/ACC-SINV-2026-00012"
        );
        assert_eq!(
            NavTarget::document("Sales Invoice", "INV 1/2").route(),
            "/app/sales-invoice/INV%201%2F2"
        );
        assert_eq!(
            NavTarget::filtered("Sales Invoice", "status", "Partly Paid").route(),
            "/app/sales-invoice?status=Partly%20Paid"
        );
    }
}
