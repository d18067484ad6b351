use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::record::{TransactionRecord, ValueField};

/// Which return table the report is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnReportKind {
    ReturnMaster,
    ReturnDetailedEntry,
}

impl ReturnReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReturnReportKind::ReturnMaster => "Return Received",
            ReturnReportKind::ReturnDetailedEntry => "Goods Return Report",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ReturnReportKind::ReturnMaster => &["User ID", "No. Return"],
            ReturnReportKind::ReturnDetailedEntry => &["User ID", "Design", "Quantity"],
        }
    }

    pub fn value_field(&self) -> ValueField {
        match self {
            ReturnReportKind::ReturnMaster => ValueField::NoReturn,
            ReturnReportKind::ReturnDetailedEntry => ValueField::Quantity,
        }
    }
}

impl fmt::Display for ReturnReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnReportKind::ReturnMaster => f.write_str("ReturnMaster"),
            ReturnReportKind::ReturnDetailedEntry => f.write_str("ReturnDetailedEntry"),
        }
    }
}

impl FromStr for ReturnReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "returnmaster" | "master" => Ok(ReturnReportKind::ReturnMaster),
            "returndetailedentry" | "detailed" => Ok(ReturnReportKind::ReturnDetailedEntry),
            other => Err(format!("unknown return table: {}", other)),
        }
    }
}

/// Filters of the share report screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnReportRequest {
    pub kind: ReturnReportKind,
    pub company: Option<String>,
    pub courier: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Entries sharing `company | courier | date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnGroup {
    pub label: String,
    pub items: Vec<TransactionRecord>,
}
