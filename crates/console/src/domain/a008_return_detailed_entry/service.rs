use contracts::domain::a008_return_detailed_entry::ReturnDetailedEntry;
use contracts::shared::record::RecordKind;

use crate::shared::error::{ConsoleError, ConsoleResult};
use crate::shared::gateway::Gateway;
use crate::shared::query::{RecordFilter, ServerFilters};
use crate::system::auth::Session;

pub const PATH: &str = "return-detailed-entry";

pub async fn list(gateway: &Gateway, filter: &RecordFilter) -> ConsoleResult<Vec<ReturnDetailedEntry>> {
    let (params, local) = filter.split(ServerFilters::NONE);
    let rows: Vec<ReturnDetailedEntry> = gateway.list_at(PATH, &params).await?;
    Ok(local.apply(rows))
}

/// Returned goods itemised by design, stamped with the session user
pub async fn create(
    gateway: &Gateway,
    session: &Session,
    mut entry: ReturnDetailedEntry,
) -> ConsoleResult<Option<i64>> {
    entry.user_id = session.user_id.clone();
    entry
        .validate(RecordKind::ReturnDetailed)
        .map_err(ConsoleError::Validation)?;

    let created = gateway.create_at(PATH, &entry).await?;
    tracing::info!("Entry saved! ID: {:?}", created.id);
    Ok(created.id)
}
