use serde::{Deserialize, Serialize};

use crate::shared::record::TransactionRecord;

/// Billing rows share the flat transaction shape
pub type BillingEntry = TransactionRecord;

/// `GET /billing?date=` without company/portal answers with the companies
/// that have bills on that date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompaniesForDate {
    #[serde(default)]
    pub companies: Vec<String>,
}

/// The billing list endpoint answers either with a bare array or with
/// `{ "items": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BillingListResponse {
    Items(Vec<BillingEntry>),
    Wrapped {
        #[serde(default)]
        items: Vec<BillingEntry>,
    },
}

impl BillingListResponse {
    pub fn into_items(self) -> Vec<BillingEntry> {
        match self {
            BillingListResponse::Items(items) => items,
            BillingListResponse::Wrapped { items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_list_both_shapes() {
        let bare = r#"[{"company":"A","portal":"X","design":"D","quantity":2,"date":"2024-01-01"}]"#;
        let wrapped = r#"{"items":[{"company":"A","portal":"X","design":"D","quantity":2,"date":"2024-01-01"}]}"#;
        let empty = r#"{"companies":["A"]}"#;

        let a: BillingListResponse = serde_json::from_str(bare).unwrap();
        let b: BillingListResponse = serde_json::from_str(wrapped).unwrap();
        let c: BillingListResponse = serde_json::from_str(empty).unwrap();
        assert_eq!(a.into_items().len(), 1);
        assert_eq!(b.into_items().len(), 1);
        assert!(c.into_items().is_empty());
    }
}
