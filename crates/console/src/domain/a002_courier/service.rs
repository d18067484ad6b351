use contracts::domain::a002_courier::Courier;

use crate::domain::common::master_service;
use crate::shared::error::ConsoleResult;
use crate::shared::gateway::{Gateway, Resource};

impl Resource for Courier {
    const PATH: &'static str = "courier";
}

/// Couriers, sorted by name
pub async fn list_names(gateway: &Gateway) -> ConsoleResult<Vec<String>> {
    master_service::list_names::<Courier>(gateway).await
}

pub async fn add(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    master_service::add::<Courier>(gateway, name).await
}

pub async fn remove(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    master_service::remove::<Courier>(gateway, name).await
}
