use serde::{Deserialize, Serialize};

use crate::shared::lenient;

/// Seller login a company uses on a portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalLogin {
    #[serde(
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    pub company: String,
    pub portal: String,
    pub login_id: String,
}

impl PortalLogin {
    pub fn new(company: String, portal: String, login_id: String) -> Self {
        Self {
            id: None,
            company,
            portal,
            login_id,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.company.trim().is_empty()
            || self.portal.trim().is_empty()
            || self.login_id.trim().is_empty()
        {
            return Err("All fields required".to_string());
        }
        Ok(())
    }
}
