use chrono::NaiveDate;
use contracts::domain::a006_billing::{BillingEntry, BillingListResponse, CompaniesForDate};
use contracts::shared::record::RecordKind;
use contracts::shared::report::DateRange;
use serde_json::Value;

use crate::shared::config::AccessConfig;
use crate::shared::error::{ConsoleError, ConsoleResult};
use crate::shared::gateway::Gateway;
use crate::shared::query::{RecordFilter, ServerFilters};
use crate::system::auth::Session;

pub const PATH: &str = "billing";
pub const DASHBOARD_PATH: &str = "billing_dashboard";

/// Billing rows for a date; company/portal go to the server, the rest is
/// filtered locally
pub async fn list(gateway: &Gateway, filter: &RecordFilter) -> ConsoleResult<Vec<BillingEntry>> {
    if filter.date.is_none() {
        return Err(ConsoleError::validation("Date is required"));
    }

    let (params, local) = filter.split(ServerFilters::BILLING);
    let response: BillingListResponse = gateway.api().get_json(PATH, &params).await?;
    Ok(local.apply(response.into_items()))
}

/// Companies that have bills on `date`.
///
/// The endpoint answers `{companies: [...]}`; a plain row list is reduced to
/// its distinct companies.
pub async fn companies_for_date(gateway: &Gateway, date: NaiveDate) -> ConsoleResult<Vec<String>> {
    let params = [("date", date.format("%Y-%m-%d").to_string())];
    let value: Value = gateway.api().get_json(PATH, &params).await?;
    Ok(companies_from_value(value))
}

fn companies_from_value(value: Value) -> Vec<String> {
    if let Ok(wrapped) = serde_json::from_value::<CompaniesForDate>(value.clone()) {
        if !wrapped.companies.is_empty() {
            return wrapped.companies;
        }
    }
    match serde_json::from_value::<BillingListResponse>(value) {
        Ok(rows) => {
            let mut companies: Vec<String> = Vec::new();
            for row in rows.into_items() {
                if !companies.contains(&row.company) {
                    companies.push(row.company);
                }
            }
            companies
        }
        Err(_) => Vec::new(),
    }
}

/// Check every row, then POST them as one array
pub async fn bulk_create(gateway: &Gateway, records: &[BillingEntry]) -> ConsoleResult<()> {
    if records.is_empty() {
        return Err(ConsoleError::validation("No data to submit"));
    }
    for (idx, record) in records.iter().enumerate() {
        record
            .validate(RecordKind::Billing)
            .map_err(|e| ConsoleError::Validation(format!("Row {}: {}", idx + 1, e)))?;
    }

    let _: Value = gateway.api().post_json(PATH, records).await?;
    tracing::info!("Submitted {} billing rows", records.len());
    Ok(())
}

pub async fn update(
    gateway: &Gateway,
    session: &Session,
    access: &AccessConfig,
    id: i64,
    record: &BillingEntry,
) -> ConsoleResult<()> {
    session.require_billing_editor(access)?;
    record
        .validate(RecordKind::Billing)
        .map_err(ConsoleError::Validation)?;
    gateway.update_at(PATH, id, record).await
}

pub async fn remove(
    gateway: &Gateway,
    session: &Session,
    access: &AccessConfig,
    id: i64,
) -> ConsoleResult<()> {
    session.require_billing_editor(access)?;
    gateway.delete_at(PATH, id).await
}

/// Billing rows of the sales dashboard over `range`
pub async fn dashboard(gateway: &Gateway, range: &DateRange) -> ConsoleResult<Vec<BillingEntry>> {
    let params = [
        ("from", range.from.format("%Y-%m-%d").to_string()),
        ("to", range.to.format("%Y-%m-%d").to_string()),
    ];
    let response: BillingListResponse = gateway.api().get_json(DASHBOARD_PATH, &params).await?;
    Ok(response.into_items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::test_server;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::{get, put},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn router(posted: Arc<Mutex<Vec<Value>>>) -> Router {
        Router::new()
            .route(
                "/api/data/billing",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    if !q.contains_key("company") && !q.contains_key("portal") {
                        return Json(json!({"companies": ["Acme", "Beta"]}));
                    }
                    Json(json!({"items": [
                        {"id": 1, "company": "Acme", "portal": "Amazon", "design": "D1", "quantity": 4, "date": "2024-01-01", "user_id": 7},
                        {"id": 2, "company": "Acme", "portal": "Amazon", "design": "D2", "quantity": "2", "date": "2024-01-01", "user_id": 7}
                    ]}))
                })
                .post(move |Json(body): Json<Value>| async move {
                    posted.lock().unwrap().push(body);
                    StatusCode::CREATED
                }),
            )
            .route(
                "/api/data/billing/:id",
                put(|Path(_id): Path<i64>| async { StatusCode::OK })
                    .delete(|Path(_id): Path<i64>| async { StatusCode::OK }),
            )
            .route(
                "/api/data/billing_dashboard",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    assert_eq!(q.get("from").map(String::as_str), Some("2024-01-01"));
                    Json(json!([
                        {"company": "Acme", "portal": "Amazon", "design": "D1", "quantity": 1, "date": "2024-01-02T00:00:00.000Z"}
                    ]))
                }),
            )
    }

    #[tokio::test]
    async fn test_list_and_companies() {
        let gateway = test_server::spawn(router(Arc::default())).await;

        assert_eq!(companies_for_date(&gateway, d(1)).await.unwrap(), vec!["Acme", "Beta"]);

        let filter = RecordFilter::default()
            .with_date(d(1))
            .with_company("Acme")
            .with_design("D2");
        let rows = list(&gateway, &filter).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, Some(2));

        let err = list(&gateway, &RecordFilter::default()).await.unwrap_err();
        assert!(err.is_local());
    }

    #[tokio::test]
    async fn test_bulk_create_validates_first() {
        let posted: Arc<Mutex<Vec<Value>>> = Arc::default();
        let gateway = test_server::spawn(router(Arc::clone(&posted))).await;

        let err = bulk_create(&gateway, &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "No data to submit");

        let bad = vec![
            BillingEntry::billing("Acme", "Amazon", "D1", 1, d(1), "7"),
            BillingEntry::billing("Acme", "Amazon", "", 1, d(1), "7"),
        ];
        let err = bulk_create(&gateway, &bad).await.unwrap_err();
        assert_eq!(err.to_string(), "Row 2: Design is required");
        assert!(posted.lock().unwrap().is_empty());

        bulk_create(&gateway, &bad[..1]).await.unwrap();
        let body = posted.lock().unwrap()[0].clone();
        assert!(body.is_array());
        assert_eq!(body[0]["quantity"], 1);
    }

    #[tokio::test]
    async fn test_modification_requires_editor() {
        let gateway = test_server::spawn(router(Arc::default())).await;
        let access = AccessConfig {
            billing_editors: vec!["akash".into()],
        };
        let record = BillingEntry::billing("Acme", "Amazon", "D1", 3, d(1), "7");

        let guest = Session::new("9", "guest");
        let err = update(&gateway, &guest, &access, 1, &record).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Unauthorized));
        assert!(remove(&gateway, &guest, &access, 1).await.is_err());

        let editor = Session::new("7", "Akash");
        update(&gateway, &editor, &access, 1, &record).await.unwrap();
        remove(&gateway, &editor, &access, 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_dashboard_range() {
        let gateway = test_server::spawn(router(Arc::default())).await;
        let range = DateRange::new(d(1), d(7)).unwrap();
        let rows = dashboard(&gateway, &range).await.unwrap();
        assert_eq!(rows[0].date, d(2));
    }

    #[test]
    fn test_companies_from_plain_rows() {
        let value = json!([
            {"company": "Beta", "date": "2024-01-01"},
            {"company": "Acme", "date": "2024-01-01"},
            {"company": "Beta", "date": "2024-01-01"}
        ]);
        assert_eq!(companies_from_value(value), vec!["Beta", "Acme"]);
    }
}
