use serde::{Deserialize, Serialize};

use crate::domain::common::MasterRecord;

/// Sales portal (marketplace) a bill is raised on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Portal {
    #[serde(alias = "Portal")]
    pub portal: String,
}

impl MasterRecord for Portal {
    const TITLE: &'static str = "Portal";

    fn name(&self) -> &str {
        &self.portal
    }

    fn from_name(name: String) -> Self {
        Self { portal: name }
    }
}
