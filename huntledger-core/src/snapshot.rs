//! Export/import payload for full-ledger snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Wire shape of an exported snapshot. The four documents are carried as raw
/// JSON so an import writes them back verbatim, exactly as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub hunting_areas: Value,
    pub custom_areas: Value,
    pub user_stats: Value,
    pub selected_area: Value,
    /// ISO-8601 instant the snapshot was taken.
    pub export_date: String,
    /// Payload format tag, currently `"1.0"`.
    pub version: String,
}

/// Reasons an import is rejected. None of these leaves partial writes
/// behind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("payload is not valid JSON: {0}")]
    Malformed(String),
    #[error("payload has no huntingAreas field")]
    MissingAreas,
    #[error("huntingAreas must be an array")]
    AreasNotArray,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of areas in the imported list.
    pub areas: usize,
    /// Which optional documents were present and applied.
    pub applied_custom_ids: bool,
    pub applied_stats: bool,
    pub applied_selection: bool,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "imported {} hunting areas", self.areas)
    }
}
