//! HTTP client for the remote backend
//!
//! Thin wrapper over `reqwest`: builds URLs, encodes query parameters, maps
//! non-2xx answers to [`ConsoleError::Rejected`]. No retries, no caching.

use contracts::domain::common::ErrorBody;
use serde::{de::DeserializeOwned, Serialize};
use std::time::{Duration, Instant};

use super::config::ApiConfig;
use super::error::{ConsoleError, ConsoleResult};

/// Fallback text when a rejected write carries no readable body
pub const GENERIC_ERROR: &str = "Error occurred";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ConsoleResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConsoleError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client rooted at `api.base_url`
    pub fn from_config(api: &ApiConfig) -> ConsoleResult<Self> {
        Self::new(&api.base_url, Duration::from_secs(api.timeout_secs))
    }

    /// Same connection pool, base URL extended by `prefix`
    pub fn scoped(&self, prefix: &str) -> Self {
        let prefix = prefix.trim_matches('/');
        let base_url = if prefix.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, prefix)
        };
        Self {
            client: self.client.clone(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path` plus the non-empty query parameters
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let path = path.trim_start_matches('/');
        let mut url = format!("{}/{}", self.base_url, path);
        let encoded = encode_query(query);
        if !encoded.is_empty() {
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ConsoleResult<T> {
        let url = self.url(path, query);
        let start = Instant::now();
        let response = self.client.get(&url).send().await?;
        let text = read_success(response, "GET", &url, start).await?;
        decode(&text)
    }

    /// POST a JSON body; the answer is decoded when it is non-empty
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ConsoleResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = self.url(path, &[]);
        let start = Instant::now();
        let response = self.client.post(&url).json(body).send().await?;
        let text = read_success(response, "POST", &url, start).await?;
        decode_or_default(&text)
    }

    pub async fn put_json<B>(&self, path: &str, body: &B) -> ConsoleResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path, &[]);
        let start = Instant::now();
        let response = self.client.put(&url).json(body).send().await?;
        read_success(response, "PUT", &url, start).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> ConsoleResult<()> {
        let url = self.url(path, &[]);
        let start = Instant::now();
        let response = self.client.delete(&url).send().await?;
        read_success(response, "DELETE", &url, start).await?;
        Ok(())
    }
}

/// Encode one path segment (names may contain spaces or slashes)
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// `k=v&k2=v2`, skipping parameters whose value is blank
pub fn encode_query(query: &[(&str, String)]) -> String {
    query
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Text of a rejected response reduced to what a user should see
pub fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.text().map(str::to_string))
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}

async fn read_success(
    response: reqwest::Response,
    method: &str,
    url: &str,
    start: Instant,
) -> ConsoleResult<String> {
    let status = response.status();
    let text = response.text().await?;

    tracing::debug!(
        "{} {} -> {} ({} bytes, {}ms)",
        method,
        url,
        status.as_u16(),
        text.len(),
        start.elapsed().as_millis()
    );

    if !status.is_success() {
        let message = rejection_message(&text);
        tracing::warn!("{} {} rejected with HTTP {}: {}", method, url, status.as_u16(), message);
        return Err(ConsoleError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    Ok(text)
}

fn decode<T: DeserializeOwned>(text: &str) -> ConsoleResult<T> {
    serde_json::from_str(text)
        .map_err(|e| ConsoleError::Transport(format!("unexpected response from server: {}", e)))
}

fn decode_or_default<T: DeserializeOwned + Default>(text: &str) -> ConsoleResult<T> {
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3001/api/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url_building() {
        let api = client().scoped("/data");
        assert_eq!(api.base_url(), "http://localhost:3001/api/data");
        assert_eq!(api.url("/company", &[]), "http://localhost:3001/api/data/company");
        assert_eq!(
            api.url(
                "billing",
                &[
                    ("date", "2024-01-01".to_string()),
                    ("company", "".to_string()),
                    ("portal", "Big Mart".to_string()),
                ]
            ),
            "http://localhost:3001/api/data/billing?date=2024-01-01&portal=Big%20Mart"
        );
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("A/B design"), "A%2FB%20design");
    }

    #[test]
    fn test_rejection_message() {
        assert_eq!(rejection_message(r#"{"error":"Duplicate entry"}"#), "Duplicate entry");
        assert_eq!(rejection_message("<html>502</html>"), GENERIC_ERROR);
        assert_eq!(rejection_message(""), GENERIC_ERROR);
    }
}
