//! Records backend client
//!
//! HTTP implementation of the [`RecordStore`] contract against the remote
//! records backend's REST API. One request per call, no retries; failures map
//! onto [`StoreError`] and are surfaced to the caller for display.
//!
//! # Endpoints
//! - `GET    {base}/apps/{app_id}/records` — full collection
//! - `POST   {base}/apps/{app_id}/records` — create, returns created record
//! - `PUT    {base}/apps/{app_id}/records/{id}` — update, returns record
//! - `DELETE {base}/apps/{app_id}/records/{id}`

use crate::types::{RecordStore, StoreError};
use markt_common::config::Config;
use markt_common::model::{FieldSet, Record};
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// User-Agent header sent with every backend request
const USER_AGENT: &str = concat!("markt-listings/", env!("CARGO_PKG_VERSION"));

/// Records backend client
///
/// Holds a configured `reqwest::Client`; cheap to clone per reqwest's
/// internal connection pooling.
#[derive(Clone)]
pub struct RecordApiClient {
    /// HTTP client for API requests
    http_client: Client,
    /// Backend base URL without trailing slash
    base_url: String,
    /// App identifier within the backend
    app_id: String,
}

impl RecordApiClient {
    /// Create a new records backend client
    ///
    /// # Arguments
    /// * `base_url` - Backend REST base URL (trailing slash tolerated)
    /// * `app_id` - App identifier within the backend
    /// * `api_key` - Optional bearer token
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, app_id: &str, api_key: Option<&str>, timeout: Duration) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );
        if let Some(key) = api_key {
            if let Ok(mut value) = header::HeaderValue::from_str(&format!("Bearer {}", key)) {
                value.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, value);
            }
        }

        Self {
            http_client: Client::builder()
                .timeout(timeout)
                .default_headers(headers)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
        }
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.records_base_url,
            &config.records_app_id,
            config.records_api_key.as_deref(),
            config.request_timeout,
        )
    }

    fn records_url(&self) -> String {
        format!("{}/apps/{}/records", self.base_url, self.app_id)
    }

    fn record_url(&self, record_id: &str) -> String {
        format!("{}/apps/{}/records/{}", self.base_url, self.app_id, record_id)
    }

    /// Map a non-success response onto a `StoreError`
    async fn response_error(&self, context: &str, response: Response) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => StoreError::NotFound(format!("{}: {}", context, body)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                StoreError::Validation(format!("{}: {}", context, body))
            }
            _ => StoreError::Api(format!(
                "{}: records backend returned {}: {}",
                context, status, body
            )),
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for RecordApiClient {
    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        debug!(app_id = %self.app_id, "Listing records");

        let response = self
            .http_client
            .get(self.records_url())
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("List request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.response_error("List records", response).await);
        }

        let records: Vec<Record> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(format!("Failed to parse record list: {}", e)))?;

        debug!(count = records.len(), "Record list loaded");
        Ok(records)
    }

    async fn create(&self, fields: &FieldSet) -> Result<Record, StoreError> {
        debug!(app_id = %self.app_id, "Creating record");

        let response = self
            .http_client
            .post(self.records_url())
            .json(fields)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Create request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.response_error("Create record", response).await);
        }

        let record: Record = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(format!("Failed to parse created record: {}", e)))?;

        debug!(record_id = %record.record_id, "Record created");
        Ok(record)
    }

    async fn update(&self, record_id: &str, fields: &FieldSet) -> Result<Record, StoreError> {
        debug!(record_id = %record_id, "Updating record");

        let response = self
            .http_client
            .put(self.record_url(record_id))
            .json(fields)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Update request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.response_error("Update record", response).await);
        }

        let record: Record = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(format!("Failed to parse updated record: {}", e)))?;

        debug!(record_id = %record.record_id, "Record updated");
        Ok(record)
    }

    async fn delete(&self, record_id: &str) -> Result<(), StoreError> {
        debug!(record_id = %record_id, "Deleting record");

        let response = self
            .http_client
            .delete(self.record_url(record_id))
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("Delete request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(self.response_error("Delete record", response).await);
        }

        debug!(record_id = %record_id, "Record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RecordApiClient {
        RecordApiClient::new(
            "https://backend.example/rest/",
            "app-1",
            Some("secret"),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_records_url_normalizes_trailing_slash() {
        assert_eq!(
            client().records_url(),
            "https://backend.example/rest/apps/app-1/records"
        );
    }

    #[test]
    fn test_record_url() {
        assert_eq!(
            client().record_url("699c3bc70ed1606ddd89088d"),
            "https://backend.example/rest/apps/app-1/records/699c3bc70ed1606ddd89088d"
        );
    }

    #[test]
    fn test_client_without_api_key() {
        // Construction must not fail when no key is configured
        let _ = RecordApiClient::new(
            "https://backend.example/rest",
            "app-1",
            None,
            Duration::from_secs(5),
        );
    }
}
