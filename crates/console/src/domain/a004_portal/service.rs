use contracts::domain::a004_portal::Portal;

use crate::domain::common::master_service;
use crate::shared::error::ConsoleResult;
use crate::shared::gateway::{Gateway, Resource};

impl Resource for Portal {
    const PATH: &'static str = "portal";
}

/// Portals, sorted by name
pub async fn list_names(gateway: &Gateway) -> ConsoleResult<Vec<String>> {
    master_service::list_names::<Portal>(gateway).await
}

pub async fn add(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    master_service::add::<Portal>(gateway, name).await
}

pub async fn remove(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    master_service::remove::<Portal>(gateway, name).await
}
