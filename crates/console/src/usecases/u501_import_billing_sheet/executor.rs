use std::path::Path;

use chrono::NaiveDate;
use contracts::domain::a006_billing::BillingEntry;
use contracts::shared::record::ValueField;
use contracts::usecases::u501_import_billing_sheet::{ImportContext, ImportResult};

use super::parser;
use super::workbook::{self, SheetFormat};
use crate::domain::a006_billing::service as billing;
use crate::shared::error::{ConsoleError, ConsoleResult};
use crate::shared::gateway::Gateway;
use crate::system::auth::Session;

/// Loads a billing sheet and submits its rows
#[derive(Debug, Clone)]
pub struct ImportExecutor {
    gateway: Gateway,
}

impl ImportExecutor {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Stamps for the upload; the user always comes from the session
    pub fn context(session: &Session, company: &str, portal: &str, date: NaiveDate) -> ImportContext {
        ImportContext {
            company: company.trim().to_string(),
            portal: portal.trim().to_string(),
            date,
            user_id: session.user_id.clone(),
        }
    }

    /// Parse a CSV or workbook file without sending anything
    pub fn preview(&self, path: &Path, context: &ImportContext) -> ConsoleResult<Vec<BillingEntry>> {
        context.validate().map_err(ConsoleError::Validation)?;
        match SheetFormat::from_path(path) {
            SheetFormat::Workbook => parser::parse_grid(&workbook::read_grid(path)?, context),
            SheetFormat::Csv => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| ConsoleError::Import(format!("{}: {}", path.display(), e)))?;
                parser::parse_csv(&text, context)
            }
        }
    }

    /// Bulk-POST parsed rows
    pub async fn submit(&self, records: &[BillingEntry]) -> ConsoleResult<ImportResult> {
        billing::bulk_create(&self.gateway, records).await?;
        let result = ImportResult {
            submitted: records.len(),
            total_quantity: records
                .iter()
                .fold(0i64, |acc, r| acc.saturating_add(r.value(ValueField::Quantity))),
        };
        tracing::info!(
            "Billing sheet submitted: {} rows, {} pcs",
            result.submitted,
            result.total_quantity
        );
        Ok(result)
    }

    pub async fn import_file(&self, path: &Path, context: &ImportContext) -> ConsoleResult<ImportResult> {
        let records = self.preview(path, context)?;
        self.submit(&records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::test_server;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn context() -> ImportContext {
        let session = Session::new("7", "akash");
        ImportExecutor::context(&session, " Acme ", "X", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[tokio::test]
    async fn test_import_file() {
        let posted: Arc<Mutex<Vec<Value>>> = Arc::default();
        let sink = Arc::clone(&posted);
        let router = Router::new().route(
            "/api/data/billing",
            post(move |Json(body): Json<Value>| async move {
                sink.lock().unwrap().push(body);
                StatusCode::CREATED
            }),
        );
        let executor = ImportExecutor::new(test_server::spawn(router).await);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Design,Quantity\nA,5\nB,3\n").unwrap();

        let result = executor.import_file(file.path(), &context()).await.unwrap();
        assert_eq!(result, ImportResult { submitted: 2, total_quantity: 8 });

        let body = posted.lock().unwrap()[0].clone();
        assert_eq!(body[0]["company"], "Acme");
        assert_eq!(body[1]["design"], "B");
        assert_eq!(body[1]["user_id"], "7");
    }

    #[tokio::test]
    async fn test_import_workbook() {
        let posted: Arc<Mutex<Vec<Value>>> = Arc::default();
        let sink = Arc::clone(&posted);
        let router = Router::new().route(
            "/api/data/billing",
            post(move |Json(body): Json<Value>| async move {
                sink.lock().unwrap().push(body);
                StatusCode::CREATED
            }),
        );
        let executor = ImportExecutor::new(test_server::spawn(router).await);
        let sheet = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/billing_sheet.xlsx");

        let rows = executor.preview(&sheet, &context()).unwrap();
        let designs: Vec<_> = rows.iter().map(|r| r.design.clone().unwrap_or_default()).collect();
        assert_eq!(designs, vec!["Kurti Blue", "Saree Red", "Dupatta"]);
        assert_eq!(rows[1].quantity, Some(2));

        let result = executor.import_file(&sheet, &context()).await.unwrap();
        assert_eq!(result, ImportResult { submitted: 3, total_quantity: 11 });
        assert_eq!(posted.lock().unwrap()[0][2]["company"], "Acme");
    }

    #[tokio::test]
    async fn test_empty_sheet_is_not_sent() {
        let router = Router::new().route("/api/data/billing", post(|| async { StatusCode::CREATED }));
        let executor = ImportExecutor::new(test_server::spawn(router).await);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Design,Quantity\n").unwrap();

        let err = executor.import_file(file.path(), &context()).await.unwrap_err();
        assert_eq!(err.to_string(), "No data to submit");

        let missing = executor.preview(Path::new("/nonexistent/sheet.csv"), &context());
        assert!(matches!(missing, Err(ConsoleError::Import(_))));
    }
}
