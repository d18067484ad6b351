use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filters of the billing summary screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingSummaryRequest {
    pub date: NaiveDate,
    pub company: Option<String>,
    pub portal: Option<String>,
}

/// Summed quantity of one design
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignLine {
    pub design: String,
    pub quantity: i64,
}

/// Designs billed through one portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalBucket {
    pub portal: String,
    pub designs: Vec<DesignLine>,
    pub total: i64,
}

/// Portals of one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyBucket {
    pub company: String,
    pub portals: Vec<PortalBucket>,
    pub total: i64,
}

/// Company -> portal -> design tree, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSummary {
    pub companies: Vec<CompanyBucket>,
}

impl BillingSummary {
    pub fn grand_total(&self) -> i64 {
        self.companies
            .iter()
            .fold(0i64, |acc, c| acc.saturating_add(c.total))
    }
}
