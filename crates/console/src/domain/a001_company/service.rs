use contracts::domain::a001_company::Company;

use crate::domain::common::master_service;
use crate::shared::error::ConsoleResult;
use crate::shared::gateway::{Gateway, Resource};

impl Resource for Company {
    const PATH: &'static str = "company";
}

/// Companies, sorted by name
pub async fn list_names(gateway: &Gateway) -> ConsoleResult<Vec<String>> {
    master_service::list_names::<Company>(gateway).await
}

pub async fn add(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    master_service::add::<Company>(gateway, name).await
}

pub async fn remove(gateway: &Gateway, name: &str) -> ConsoleResult<()> {
    master_service::remove::<Company>(gateway, name).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ConsoleError;
    use crate::shared::gateway::test_server;
    use axum::{
        extract::Path,
        http::StatusCode,
        routing::{delete, get},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_company_master_round() {
        let posted: Arc<Mutex<Vec<Value>>> = Arc::default();
        let deleted: Arc<Mutex<Vec<String>>> = Arc::default();

        let router = Router::new()
            .route(
                "/api/data/company",
                get(|| async { Json(json!([{"Company": "zeta"}, {"company": "Acme"}, {"company": "beta"}])) })
                    .post({
                        let posted = Arc::clone(&posted);
                        move |Json(body): Json<Value>| async move {
                            posted.lock().unwrap().push(body);
                            (StatusCode::CREATED, Json(json!({"id": 1})))
                        }
                    }),
            )
            .route(
                "/api/data/company/:name",
                delete({
                    let deleted = Arc::clone(&deleted);
                    move |Path(name): Path<String>| async move {
                        deleted.lock().unwrap().push(name);
                        StatusCode::OK
                    }
                }),
            );
        let gateway = test_server::spawn(router).await;

        assert_eq!(list_names(&gateway).await.unwrap(), vec!["Acme", "beta", "zeta"]);

        add(&gateway, "  New Co ").await.unwrap();
        assert_eq!(posted.lock().unwrap()[0], json!({"company": "New Co"}));

        let err = add(&gateway, "   ").await.unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
        assert_eq!(posted.lock().unwrap().len(), 1);

        remove(&gateway, "A & B").await.unwrap();
        assert_eq!(deleted.lock().unwrap().as_slice(), ["A & B".to_string()]);
    }
}
