use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::shared::lenient;

/// Workflow stage of a company's or portal's bills for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStage {
    Ready,
    Billed,
}

impl fmt::Display for BillStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillStage::Ready => f.write_str("ready"),
            BillStage::Billed => f.write_str("billed"),
        }
    }
}

impl FromStr for BillStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ready" => Ok(BillStage::Ready),
            "billed" => Ok(BillStage::Billed),
            other => Err(format!("unknown bill status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyBillStatus {
    pub company: String,
    #[serde(deserialize_with = "lenient::date")]
    pub date: NaiveDate,
    pub status: BillStage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalBillStatus {
    pub portal: String,
    #[serde(deserialize_with = "lenient::date")]
    pub date: NaiveDate,
    pub status: BillStage,
}

/// Extract names from a list endpoint that answers either with plain strings
/// or with objects carrying the name under `field`
pub fn names_from_list(values: &[Value], field: &str) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map
                .get(field)
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .filter(|s| !s.trim().is_empty())
        .collect()
}
