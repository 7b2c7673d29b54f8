//! Catalog store
//!
//! This module provides the read-only assessment catalog used by the
//! retrieval pipeline:
//! - Validated loading of records and aligned unit embeddings
//! - Atomic publication of reloaded catalogs to concurrent readers
//! - JSON snapshot files for persisting embedded catalogs

mod error;
mod snapshot;
mod store;


pub use error::CatalogError;
pub use snapshot::{load_catalog, load_records, CatalogSnapshot, SnapshotEntry};
pub use store::{Catalog, CatalogResult, SharedCatalog};
