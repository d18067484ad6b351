use contracts::domain::a003_design::Design;

use crate::domain::common::master_service;
use crate::shared::error::ConsoleResult;
use crate::shared::gateway::{Gateway, Resource};

impl Resource for Design {
    const PATH: &'static str = "design";
}

/// Designs, sorted by name
pub async fn list_names(gateway: &Gateway) -> ConsoleResult<Vec<String>> {
    master_service::list_names::<Design>(gateway).await
}

pub async fn add(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    master_service::add::<Design>(gateway, name).await
}

pub async fn remove(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    master_service::remove::<Design>(gateway, name).await
}
