use contracts::domain::a007_return_master::ReturnMasterEntry;
use contracts::shared::record::RecordKind;

use crate::shared::error::{ConsoleError, ConsoleResult};
use crate::shared::gateway::Gateway;
use crate::shared::query::{RecordFilter, ServerFilters};
use crate::system::auth::Session;

pub const PATH: &str = "return-master";

/// The endpoint returns every row; all filters apply locally
pub async fn list(gateway: &Gateway, filter: &RecordFilter) -> ConsoleResult<Vec<ReturnMasterEntry>> {
    let (params, local) = filter.split(ServerFilters::NONE);
    let rows: Vec<ReturnMasterEntry> = gateway.list_at(PATH, &params).await?;
    Ok(local.apply(rows))
}

/// Stamp the session user and create; returns the new id
pub async fn create(
    gateway: &Gateway,
    session: &Session,
    mut entry: ReturnMasterEntry,
) -> ConsoleResult<Option<i64>> {
    entry.user_id = session.user_id.clone();
    entry
        .validate(RecordKind::ReturnMaster)
        .map_err(ConsoleError::Validation)?;

    let created = gateway.create_at(PATH, &entry).await?;
    Ok(created.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::test_server;
    use axum::{routing::get, Json, Router};
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_list_filters_locally_and_create_stamps_user() {
        let router = Router::new().route(
            "/api/data/return-master",
            get(|| async {
                Json(json!([
                    {"id": 1, "company": "Acme", "courier": "Delhivery", "no_return": 3, "date": "2024-01-01", "user_id": "7"},
                    {"id": 2, "company": "Beta", "courier": "Delhivery", "no_return": 1, "date": "2024-01-01", "user_id": "7"}
                ]))
            })
            .post(|Json(body): Json<Value>| async move {
                assert_eq!(body["user_id"], "7");
                assert!(body.get("quantity").is_none());
                Json(json!({"id": 3}))
            }),
        );
        let gateway = test_server::spawn(router).await;

        let rows = list(&gateway, &RecordFilter::default().with_company("Beta"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].no_return, Some(1));

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let session = Session::new("7", "akash");
        let entry = ReturnMasterEntry::return_master("Acme", "Delhivery", 2, date, "");
        assert_eq!(create(&gateway, &session, entry).await.unwrap(), Some(3));

        let missing = ReturnMasterEntry::return_master("Acme", "", 2, date, "");
        let err = create(&gateway, &session, missing).await.unwrap_err();
        assert_eq!(err.to_string(), "Courier is required");
    }
}
