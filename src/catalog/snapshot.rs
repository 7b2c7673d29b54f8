//! Catalog snapshot files
//!
//! A snapshot is a JSON document pairing each record with its embedding:
//!
//! ```json
//! { "model": "...", "dimension": 1536, "built_at": "...",
//!   "entries": [ { "record": { ... }, "embedding": [ ... ] } ] }
//! ```
//!
//! Writes go to a temp file that is renamed into place, so a reader never
//! sees a half-written snapshot.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::CatalogError;
use super::store::{Catalog, CatalogResult};
use crate::core::types::{AssessmentRecord, EmbeddingVector};

/// One record with its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub record: AssessmentRecord,
    pub embedding: EmbeddingVector,
}

/// Serialized form of an embedded catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Embedding model that produced the vectors
    pub model: String,
    /// Vector dimension
    pub dimension: usize,
    /// When the snapshot was built
    pub built_at: DateTime<Utc>,
    /// Records and embeddings, in catalog order
    pub entries: Vec<SnapshotEntry>,
}

impl CatalogSnapshot {
    /// Build a snapshot from aligned records and vectors
    pub fn new(
        model: impl Into<String>,
        records: Vec<AssessmentRecord>,
        vectors: Vec<EmbeddingVector>,
    ) -> CatalogResult<Self> {
        if records.len() != vectors.len() {
            return Err(CatalogError::LengthMismatch {
                records: records.len(),
                vectors: vectors.len(),
            });
        }
        let dimension = vectors.first().map(EmbeddingVector::dimension).unwrap_or(0);
        let entries = records
            .into_iter()
            .zip(vectors)
            .map(|(record, embedding)| SnapshotEntry { record, embedding })
            .collect();

        Ok(Self {
            model: model.into(),
            dimension,
            built_at: Utc::now(),
            entries,
        })
    }

    /// Read and parse a snapshot file (without validating it)
    pub fn read(path: &Path) -> CatalogResult<Self> {
        let bytes = std::fs::read(path)?;
        let snapshot: CatalogSnapshot = serde_json::from_slice(&bytes)?;
        debug!(
            "Read snapshot {:?}: {} entries, model {}",
            path,
            snapshot.entries.len(),
            snapshot.model
        );
        Ok(snapshot)
    }

    /// Write the snapshot atomically (temp file + rename)
    pub fn write(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let temp_path = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, path)?;
        info!("Wrote snapshot with {} entries to {:?}", self.entries.len(), path);
        Ok(())
    }

    /// Validate the snapshot and turn it into a catalog
    pub fn into_catalog(self) -> CatalogResult<Catalog> {
        if let Some(first) = self.entries.first() {
            let actual = first.embedding.dimension();
            if actual != self.dimension {
                return Err(CatalogError::SnapshotDimension {
                    declared: self.dimension,
                    actual,
                });
            }
        }
        let (records, vectors): (Vec<_>, Vec<_>) = self
            .entries
            .into_iter()
            .map(|e| (e.record, e.embedding))
            .unzip();
        Catalog::load(records, vectors)
    }
}

/// Read a snapshot file and load it as a validated catalog
pub fn load_catalog(path: &Path) -> CatalogResult<Catalog> {
    CatalogSnapshot::read(path)?.into_catalog()
}

/// Read the raw scraped record array consumed by ingestion
pub fn load_records(path: &Path) -> CatalogResult<Vec<AssessmentRecord>> {
    let bytes = std::fs::read(path)?;
    let records: Vec<AssessmentRecord> = serde_json::from_slice(&bytes)?;
    debug!("Read {} raw records from {:?}", records.len(), path);
    Ok(records)
}
