use serde::{Deserialize, Serialize};

use crate::domain::common::MasterRecord;

/// Courier service that brings returns back
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Courier {
    #[serde(alias = "Courier")]
    pub courier: String,
}

impl MasterRecord for Courier {
    const TITLE: &'static str = "Courier";

    fn name(&self) -> &str {
        &self.courier
    }

    fn from_name(name: String) -> Self {
        Self { courier: name }
    }
}
