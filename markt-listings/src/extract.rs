//! Photo extraction client
//!
//! HTTP implementation of the [`PhotoExtractor`] contract. Sends an image as
//! a base64 data URI together with the listing field schema to the AI
//! extraction service and decodes the best-effort partial field set it
//! returns.
//!
//! The schema string is generated from the enumerated field list so that the
//! service is always asked for exactly the fields the model carries, with
//! the German form labels as per-field hints.

use crate::types::{ExtractionError, PhotoExtractor};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use markt_common::config::Config;
use markt_common::model::{FieldSet, Kategorie, Zustand};
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// User-Agent header sent with every extraction request
const USER_AGENT: &str = concat!("markt-listings/", env!("CARGO_PKG_VERSION"));

/// Value type of a schema field
enum SchemaKind {
    Text,
    Number,
    Zustand,
    Kategorie,
}

/// The listing field schema: wire name, value type, German form label
const SCHEMA_FIELDS: [(&str, SchemaKind, &str); 17] = [
    ("artikelname", SchemaKind::Text, "Artikelname"),
    ("beschreibung", SchemaKind::Text, "Beschreibung"),
    ("preis", SchemaKind::Number, "Preis (€)"),
    ("zustand", SchemaKind::Zustand, "Zustand"),
    ("kategorie", SchemaKind::Kategorie, "Kategorie"),
    ("groesse", SchemaKind::Text, "Größe"),
    ("marke", SchemaKind::Text, "Marke"),
    ("farbe", SchemaKind::Text, "Farbe"),
    ("foto_1", SchemaKind::Text, "Foto 1"),
    ("foto_2", SchemaKind::Text, "Foto 2"),
    ("foto_3", SchemaKind::Text, "Foto 3"),
    ("foto_4", SchemaKind::Text, "Foto 4"),
    ("vorname", SchemaKind::Text, "Vorname"),
    ("nachname", SchemaKind::Text, "Nachname"),
    ("email", SchemaKind::Text, "E-Mail"),
    ("telefon", SchemaKind::Text, "Telefonnummer"),
    ("ort", SchemaKind::Text, "Ort"),
];

/// Render the field schema sent to the extraction service
///
/// One line per field: `"name": <type> | null, // <label>`. Enum fields list
/// their wire spellings as string literal alternatives.
pub fn field_schema() -> String {
    let mut lines = Vec::with_capacity(SCHEMA_FIELDS.len() + 2);
    lines.push("{".to_string());
    for (name, kind, label) in &SCHEMA_FIELDS {
        let type_expr = match kind {
            SchemaKind::Text => "string".to_string(),
            SchemaKind::Number => "number".to_string(),
            SchemaKind::Zustand => enum_options(&Zustand::ALL.map(|z| z.as_str())),
            SchemaKind::Kategorie => enum_options(&Kategorie::ALL.map(|k| k.as_str())),
        };
        lines.push(format!("  \"{}\": {} | null, // {}", name, type_expr, label));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn enum_options(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Encode image bytes as a base64 data URI
pub fn to_data_uri(image: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(image))
}

/// Photo extraction client
///
/// Posts `{"image": <data URI>, "schema": <field schema>}` to the configured
/// extraction endpoint. When the feature is disabled or unconfigured, every
/// call fails fast with [`ExtractionError::Disabled`] and never touches the
/// network.
#[derive(Clone)]
pub struct PhotoScanClient {
    /// HTTP client for extraction requests
    http_client: Client,
    /// Extraction service endpoint, if configured
    endpoint: Option<String>,
    /// Feature gate for the photo-scan convenience
    enabled: bool,
}

impl PhotoScanClient {
    /// Create a new extraction client
    pub fn new(endpoint: Option<&str>, enabled: bool, timeout: Duration) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        Self {
            http_client: Client::builder()
                .timeout(timeout)
                .default_headers(headers)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.map(str::to_string),
            enabled,
        }
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.extraction_url.as_deref(),
            config.photo_scan_enabled,
            config.request_timeout,
        )
    }
}

#[async_trait::async_trait]
impl PhotoExtractor for PhotoScanClient {
    async fn extract(&self, image: &[u8], mime: &str) -> Result<FieldSet, ExtractionError> {
        if !self.enabled {
            return Err(ExtractionError::Disabled(
                "Photo scan is disabled".to_string(),
            ));
        }
        let endpoint = self.endpoint.as_deref().ok_or_else(|| {
            ExtractionError::Disabled("Extraction endpoint not configured".to_string())
        })?;

        debug!(bytes = image.len(), mime = %mime, "Submitting photo for extraction");

        let body = serde_json::json!({
            "image": to_data_uri(image, mime),
            "schema": field_schema(),
        });

        let response = self
            .http_client
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractionError::Network(format!("Extraction request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api(format!(
                "Extraction service returned {}: {}",
                status, body
            )));
        }

        let value: Value = response.json().await.map_err(|e| {
            ExtractionError::Parse(format!("Failed to parse extraction response: {}", e))
        })?;
        if !value.is_object() {
            return Err(ExtractionError::Parse(format!(
                "Extraction response is not an object: {}",
                value
            )));
        }

        // Unknown keys are ignored, nulls deserialize as absent
        let fields: FieldSet = serde_json::from_value(value).map_err(|e| {
            ExtractionError::Parse(format!("Extraction response schema mismatch: {}", e))
        })?;

        debug!("Photo extraction complete");
        Ok(fields)
    }
}
