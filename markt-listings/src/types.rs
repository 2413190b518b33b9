//! Core traits and error types for the listing manager
//!
//! Defines the contracts of the two external collaborators:
//! - `RecordStore` — the remote records backend (list/create/update/delete)
//! - `PhotoExtractor` — the AI extraction service (image → partial field set)
//!
//! Both are trait seams so the session layer and its tests can run against
//! in-memory implementations. Every call is attempted once per user action;
//! no retries happen below this layer, and failures are surfaced verbatim to
//! the caller.

use markt_common::model::{FieldSet, Record};
use thiserror::Error;

/// Records backend error
///
/// Each variant maps one failure class of a single store call. None is fatal;
/// all are scoped to the user action that issued the call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or HTTP transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Record or app no longer exists (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Field values rejected by the server-side schema (400/422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Other non-success response from the backend
    #[error("API error: {0}")]
    Api(String),

    /// Failed to decode a response body
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Photo extraction error
///
/// A failed extraction must leave caller state untouched; callers only merge
/// extracted fields on success.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// External API error
    #[error("API error: {0}")]
    Api(String),

    /// Failed to parse the extraction response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Photo-scan feature is disabled or unconfigured
    #[error("Extraction not available: {0}")]
    Disabled(String),
}

/// Remote records backend contract
///
/// The backend assigns `record_id` and `created_at` on creation and bumps
/// `updated_at` on each mutation. An app with no records lists as an empty
/// vector, not an error.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the full record collection
    async fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// Create a record; the backend assigns identity and timestamps
    async fn create(&self, fields: &FieldSet) -> Result<Record, StoreError>;

    /// Replace the field set of an existing record
    ///
    /// # Errors
    /// `StoreError::NotFound` if `record_id` no longer exists.
    async fn update(&self, record_id: &str, fields: &FieldSet) -> Result<Record, StoreError>;

    /// Delete a record by id
    ///
    /// # Errors
    /// `StoreError::NotFound` if `record_id` no longer exists; the failure is
    /// surfaced, not suppressed.
    async fn delete(&self, record_id: &str) -> Result<(), StoreError>;
}

/// AI photo extraction contract
///
/// Best-effort: the service may return fewer fields than the schema asks
/// for. Unknown fields in the reply are ignored, nulls are absent.
#[async_trait::async_trait]
pub trait PhotoExtractor: Send + Sync {
    /// Extract listing fields from an image
    ///
    /// # Arguments
    /// * `image` - Raw image bytes
    /// * `mime` - MIME type of the image (e.g. "image/jpeg")
    async fn extract(&self, image: &[u8], mime: &str) -> Result<FieldSet, ExtractionError>;
}
