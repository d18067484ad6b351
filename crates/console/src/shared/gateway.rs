//! Remote Data Gateway
//!
//! Generic list/create/update/delete over the data resources of the backend.
//! Entity modules under `domain/` build their special operations on top.

use contracts::domain::common::CreatedResponse;
use serde::{de::DeserializeOwned, Serialize};

use super::api_client::{encode_segment, ApiClient};
use super::error::ConsoleResult;

/// DTO exchanged with one REST resource
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Path under the data prefix, e.g. `company`
    const PATH: &'static str;
}

#[derive(Debug, Clone)]
pub struct Gateway {
    api: ApiClient,
}

impl Gateway {
    /// `api` must already point at the data prefix
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list<T: Resource>(&self, query: &[(&str, String)]) -> ConsoleResult<Vec<T>> {
        self.list_at(T::PATH, query).await
    }

    pub async fn create<T: Resource>(&self, record: &T) -> ConsoleResult<CreatedResponse> {
        self.create_at(T::PATH, record).await
    }

    pub async fn update<T: Resource>(&self, id: i64, record: &T) -> ConsoleResult<()> {
        self.update_at(T::PATH, id, record).await
    }

    pub async fn delete<T: Resource>(&self, id: i64) -> ConsoleResult<()> {
        self.delete_at(T::PATH, id).await
    }

    /// DELETE `/<path>/<url-encoded key>` for resources keyed by name
    pub async fn delete_by_key<T: Resource>(&self, key: &str) -> ConsoleResult<()> {
        let path = format!("{}/{}", T::PATH, encode_segment(key));
        tracing::info!("Deleting {} '{}'", T::PATH, key);
        self.api.delete(&path).await
    }

    // Path-addressed variants for DTOs shared by several resources
    // (billing rows and both return tables use the same record type).

    pub async fn list_at<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ConsoleResult<Vec<T>> {
        let items: Vec<T> = self.api.get_json(path, query).await?;
        tracing::debug!("Fetched {} rows from /{}", items.len(), path);
        Ok(items)
    }

    pub async fn create_at<B: Serialize + ?Sized>(
        &self,
        path: &str,
        record: &B,
    ) -> ConsoleResult<CreatedResponse> {
        let created: CreatedResponse = self.api.post_json(path, record).await?;
        tracing::info!("Created /{} (id: {:?})", path, created.id);
        Ok(created)
    }

    pub async fn update_at<B: Serialize + ?Sized>(
        &self,
        path: &str,
        id: i64,
        record: &B,
    ) -> ConsoleResult<()> {
        self.api.put_json(&format!("{}/{}", path, id), record).await?;
        tracing::info!("Updated /{}/{}", path, id);
        Ok(())
    }

    pub async fn delete_at(&self, path: &str, id: i64) -> ConsoleResult<()> {
        self.api.delete(&format!("{}/{}", path, id)).await?;
        tracing::info!("Deleted /{}/{}", path, id);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! In-process stand-in for the backend, bound to an ephemeral port

    use super::*;
    use axum::Router;
    use std::time::Duration;

    /// Serves `router` and returns a gateway pointed at `/api/data`
    pub async fn spawn(router: Router) -> Gateway {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });

        let root = ApiClient::new(&format!("http://{}/api", addr), Duration::from_secs(5))
            .expect("client");
        Gateway::new(root.scoped("/data"))
    }
}
