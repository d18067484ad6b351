use serde::{Deserialize, Serialize};

use crate::domain::common::MasterRecord;

/// Garment design code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Design {
    #[serde(alias = "Design")]
    pub design: String,
}

impl MasterRecord for Design {
    const TITLE: &'static str = "Design";

    fn name(&self) -> &str {
        &self.design
    }

    fn from_name(name: String) -> Self {
        Self { design: name }
    }
}
