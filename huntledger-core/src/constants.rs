//! Persisted-document keys and tuning constants for the ledger core.
//!
//! The document keys are part of the external storage contract: renaming one
//! orphans every ledger written under the old name.

// Persisted document keys ---------------------------------------------------
pub const KEY_HUNTING_AREAS: &str = "HUNTING_AREAS";
pub const KEY_CUSTOM_AREAS: &str = "CUSTOM_AREAS";
pub const KEY_USER_STATS: &str = "USER_STATS";
pub const KEY_SELECTED_AREA: &str = "SELECTED_AREA";
pub const KEY_SCHEMA_VERSION: &str = "SCHEMA_VERSION";

/// Prefix for the timestamped backup document written before an import.
pub const BACKUP_KEY_PREFIX: &str = "BACKUP_";

// Schema and payload versions ----------------------------------------------
/// Migration watermark stored under `SCHEMA_VERSION`.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;
/// Format tag written into export payloads.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

// Identifier shapes ---------------------------------------------------------
/// Custom areas get `custom-<creation ms>` ids.
pub const CUSTOM_AREA_ID_PREFIX: &str = "custom-";

// Event tracking ------------------------------------------------------------
/// The event buffer is flushed once it reaches this many entries.
pub const EVENT_BUFFER_CAP: usize = 50;
