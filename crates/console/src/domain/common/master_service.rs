//! Operations shared by the name-only masters

use contracts::domain::common::MasterRecord;

use crate::shared::error::{ConsoleError, ConsoleResult};
use crate::shared::gateway::{Gateway, Resource};

/// All names, sorted case-insensitively
pub async fn list_names<T: MasterRecord + Resource>(gateway: &Gateway) -> ConsoleResult<Vec<String>> {
    let items: Vec<T> = gateway.list(&[]).await?;
    Ok(sorted_names(items.iter().map(|item| item.name())))
}

/// Create a master from a trimmed, non-empty name
pub async fn add<T: MasterRecord + Resource>(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConsoleError::validation(format!("{} name is required", T::TITLE)));
    }

    gateway.create(&T::from_name(name.to_string())).await?;
    tracing::info!("{} '{}' added", T::TITLE, name);
    Ok(())
}

/// Delete by natural key
pub async fn remove<T: MasterRecord + Resource>(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    if name.trim().is_empty() {
        return Err(ConsoleError::validation(format!("{} name is required", T::TITLE)));
    }
    gateway.delete_by_key::<T>(name).await
}

/// Non-empty names, case-insensitive order, duplicates removed
pub fn sorted_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = names
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    names.dedup();
    names
}
