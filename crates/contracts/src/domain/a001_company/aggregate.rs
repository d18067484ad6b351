use serde::{Deserialize, Serialize};

use crate::domain::common::MasterRecord;

/// Company the goods are billed to and returned from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company {
    #[serde(alias = "Company")]
    pub company: String,
}

impl MasterRecord for Company {
    const TITLE: &'static str = "Company";

    fn name(&self) -> &str {
        &self.company
    }

    fn from_name(name: String) -> Self {
        Self { company: name }
    }
}
