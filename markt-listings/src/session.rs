//! Listing session
//!
//! Owns the in-memory record collection on behalf of the presentation layer
//! and sequences every store mutation the same way: call the backend, await
//! the ack, then reload the full collection. The cache is only ever replaced
//! wholesale (replace-on-read), never patched field-by-field, so readers can
//! never observe a half-applied mutation. Delete is the one exception: after
//! the server ack it removes exactly the acked record from the cache instead
//! of reloading.
//!
//! Intended for single-threaded cooperative use from a UI event loop; the
//! session is not a synchronization primitive, and overlapping mutations are
//! the caller's responsibility (disable the submit control while a call is
//! in flight).

use crate::merge;
use crate::types::{ExtractionError, PhotoExtractor, RecordStore, StoreError};
use crate::views::{self, KategorieFilter, Stats};
use markt_common::model::{FieldSet, Record};
use std::sync::Arc;
use tracing::{debug, warn};

/// Presentation-facing session over the record collection
pub struct ListingSession {
    store: Arc<dyn RecordStore>,
    extractor: Arc<dyn PhotoExtractor>,
    /// Cache of the backend's current state, replaced wholesale
    records: Vec<Record>,
    /// Record the form dialog is editing, if any
    edit_target: Option<String>,
}

impl ListingSession {
    /// Create a session over the given collaborators, with an empty cache
    pub fn new(store: Arc<dyn RecordStore>, extractor: Arc<dyn PhotoExtractor>) -> Self {
        Self {
            store,
            extractor,
            records: Vec::new(),
            edit_target: None,
        }
    }

    /// Current cache snapshot
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record id the form dialog is editing, if any
    pub fn edit_target(&self) -> Option<&str> {
        self.edit_target.as_deref()
    }

    /// Reload the full collection from the backend
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let records = self.store.list().await?;
        debug!(count = records.len(), "Record collection reloaded");
        self.records = records;
        Ok(())
    }

    /// Select a cached record as the edit target and return it for form
    /// prefill
    ///
    /// Asking to edit an id that is not in the cache is a caller sequencing
    /// bug; it is ignored and leaves no edit target.
    pub fn begin_edit(&mut self, record_id: &str) -> Option<&Record> {
        if self.records.iter().any(|r| r.record_id == record_id) {
            self.edit_target = Some(record_id.to_string());
            self.records.iter().find(|r| r.record_id == record_id)
        } else {
            warn!(record_id = %record_id, "Edit requested for unknown record, ignoring");
            self.edit_target = None;
            None
        }
    }

    /// Drop the edit target (dialog dismissed)
    pub fn clear_edit(&mut self) {
        self.edit_target = None;
    }

    /// Submit the form: update the edit target if one is selected, create
    /// otherwise
    ///
    /// On success the edit target is cleared and the full collection is
    /// reloaded. On failure the cache and the edit target are left as they
    /// were and the store error is surfaced verbatim.
    pub async fn submit(&mut self, fields: &FieldSet) -> Result<(), StoreError> {
        match self.edit_target.clone() {
            Some(record_id) => {
                let record = self.store.update(&record_id, fields).await?;
                debug!(record_id = %record.record_id, "Record updated");
            }
            None => {
                let record = self.store.create(fields).await?;
                debug!(record_id = %record.record_id, "Record created");
            }
        }
        self.edit_target = None;
        self.refresh().await
    }

    /// Update the selected record only
    ///
    /// Calling this with no edit target selected is a caller sequencing bug,
    /// not a runtime condition: it is a logged no-op, not an error.
    pub async fn update_selected(&mut self, fields: &FieldSet) -> Result<(), StoreError> {
        let Some(record_id) = self.edit_target.clone() else {
            warn!("Update requested with no record selected, ignoring");
            return Ok(());
        };
        self.store.update(&record_id, fields).await?;
        self.edit_target = None;
        self.refresh().await
    }

    /// Delete a record
    ///
    /// The cache entry is removed only after the server ack; on failure the
    /// cache is untouched. All other records keep their order and values.
    pub async fn delete(&mut self, record_id: &str) -> Result<(), StoreError> {
        self.store.delete(record_id).await?;
        self.records.retain(|r| r.record_id != record_id);
        if self.edit_target.as_deref() == Some(record_id) {
            self.edit_target = None;
        }
        debug!(record_id = %record_id, "Record deleted");
        Ok(())
    }

    /// Scan a photo and merge the extracted fields into the current form
    /// state, fill-empty-only
    ///
    /// On extraction failure no merged output is produced, so the caller's
    /// form state stays exactly as it was before the scan attempt.
    pub async fn scan_photo(
        &self,
        current: &FieldSet,
        image: &[u8],
        mime: &str,
    ) -> Result<FieldSet, ExtractionError> {
        let extracted = self.extractor.extract(image, mime).await?;
        Ok(merge::merge(current, &extracted))
    }

    /// Visible subset of the cache for the current search/filter state
    pub fn visible(&self, query: &str, filter: KategorieFilter) -> Vec<&Record> {
        views::visible_records(&self.records, query, filter)
    }

    /// Dashboard statistics over the full cache
    pub fn stats(&self) -> Stats {
        views::compute_stats(&self.records)
    }
}
