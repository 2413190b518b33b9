//! # Markt Listings
//!
//! Core of the marketplace listing manager: the external-collaborator
//! contracts (records backend, photo extraction service), the field-merge
//! engine that fills form gaps from extracted photo data, the derived-view
//! engine (filtering and statistics), and the session layer that owns the
//! in-memory record collection on behalf of a UI.
//!
//! The crate performs no rendering and owns no server; it is consumed by a
//! presentation layer that calls it from a single-threaded event loop.

pub mod extract;
pub mod merge;
pub mod session;
pub mod store;
pub mod types;
pub mod views;

pub use session::ListingSession;
pub use types::{ExtractionError, PhotoExtractor, RecordStore, StoreError};
