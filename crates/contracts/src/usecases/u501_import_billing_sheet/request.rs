use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Values stamped onto every imported row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportContext {
    pub company: String,
    pub portal: String,
    pub date: NaiveDate,
    pub user_id: String,
}

impl ImportContext {
    /// Company and portal must be picked before a sheet is read
    pub fn validate(&self) -> Result<(), String> {
        if self.company.trim().is_empty() || self.portal.trim().is_empty() {
            return Err("Please select Company and Portal before uploading.".to_string());
        }
        Ok(())
    }
}

/// Outcome of a submitted upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub submitted: usize,
    pub total_quantity: i64,
}
