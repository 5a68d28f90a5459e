//! Domain store: typed persistence operations over the key-value adapter.
//!
//! Every operation is a synchronous read-modify-write of whole documents.
//! The areas document and the stats document are written separately with no
//! cross-key atomicity; a failure between the two leaves them briefly
//! inconsistent, and the next successful pair of writes converges them.

use chrono::{DateTime, Utc};
use log::warn;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::Clock;
use crate::area::{AreaCategory, HuntingArea, LootKind, LootRecord, NewLoot};
use crate::constants::{
    BACKUP_KEY_PREFIX, CURRENT_SCHEMA_VERSION, CUSTOM_AREA_ID_PREFIX, EXPORT_FORMAT_VERSION,
    KEY_CUSTOM_AREAS, KEY_HUNTING_AREAS, KEY_SCHEMA_VERSION, KEY_SELECTED_AREA, KEY_USER_STATS,
};
use crate::runes;
use crate::seed;
use crate::snapshot::{ImportError, ImportSummary, Snapshot};
use crate::stats::{self, UserStats};
use crate::storage::{KeyValueStore, StoreExt};

/// Typed accessors and compound operations over the four persisted
/// documents.
pub struct LedgerStore<S, C> {
    kv: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> LedgerStore<S, C> {
    pub const fn new(kv: S, clock: C) -> Self {
        Self { kv, clock }
    }

    /// Current instant from the injected clock.
    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// The persisted area list merged onto the popular seed.
    ///
    /// Empty storage yields the seed verbatim. Otherwise every seed area
    /// keeps its position and is overlaid field-by-field with the persisted
    /// record sharing its id (persisted fields win; fields the record
    /// predates fill from the seed), and persisted areas with unknown ids
    /// trail in their persisted relative order.
    #[must_use]
    pub fn load_areas(&self) -> Vec<HuntingArea> {
        let saved: Vec<Value> = self.kv.get_json(KEY_HUNTING_AREAS, Vec::new());
        if saved.is_empty() {
            return seed::popular_areas();
        }

        let mut areas = Vec::with_capacity(saved.len().max(10));
        for seed_area in seed::popular_areas() {
            let overlay = saved
                .iter()
                .find(|value| value.get("id").and_then(Value::as_str) == Some(&seed_area.id));
            areas.push(match overlay {
                Some(value) => merge_onto_seed(&seed_area, value),
                None => seed_area,
            });
        }
        for value in &saved {
            if value
                .get("id")
                .and_then(Value::as_str)
                .is_some_and(seed::is_popular_id)
            {
                continue;
            }
            match serde_json::from_value::<HuntingArea>(value.clone()) {
                Ok(area) => areas.push(area),
                Err(err) => warn!("skipping unreadable persisted area: {err}"),
            }
        }
        areas
    }

    /// Persist the full area list verbatim.
    pub fn save_areas(&self, areas: &[HuntingArea]) {
        self.kv.set_json(KEY_HUNTING_AREAS, areas);
    }

    /// The stats document, or a fresh one stamped with the current instant.
    #[must_use]
    pub fn load_stats(&self) -> UserStats {
        self.kv
            .get_json(KEY_USER_STATS, UserStats::starting_at(self.clock.now_ms()))
    }

    pub fn save_stats(&self, stats: &UserStats) {
        self.kv.set_json(KEY_USER_STATS, stats);
    }

    /// The persisted selection, if any.
    #[must_use]
    pub fn load_selection(&self) -> Option<String> {
        self.kv.get_json(KEY_SELECTED_AREA, None)
    }

    pub fn save_selection(&self, area_id: Option<&str>) {
        self.kv.set_json(KEY_SELECTED_AREA, &area_id);
    }

    /// The legacy parallel list of custom-area ids. Kept coherent for
    /// compatibility; the area `category` field is authoritative.
    #[must_use]
    pub fn load_custom_ids(&self) -> Vec<String> {
        self.kv.get_json(KEY_CUSTOM_AREAS, Vec::new())
    }

    pub fn save_custom_ids(&self, ids: &[String]) {
        self.kv.set_json(KEY_CUSTOM_AREAS, ids);
    }

    /// Tally one completed run against an area, then refresh the stats
    /// document (total plus favorite area). Unknown ids are logged no-ops.
    /// Returns whether the area was found.
    pub fn increment_run(&self, area_id: &str) -> bool {
        let mut areas = self.load_areas();
        let Some(area) = areas.iter_mut().find(|area| area.id == area_id) else {
            warn!("run increment for unknown area {area_id} ignored");
            return false;
        };
        area.count += 1;
        area.total_runs += 1;
        self.save_areas(&areas);

        let mut stats = self.load_stats();
        stats.total_runs += 1;
        stats.favorite_area = stats::favorite_area(&areas).unwrap_or("").to_owned();
        self.save_stats(&stats);
        true
    }

    /// Reset an area's session tally. `total_runs` is untouched.
    pub fn reset_count(&self, area_id: &str) -> bool {
        let mut areas = self.load_areas();
        let Some(area) = areas.iter_mut().find(|area| area.id == area_id) else {
            warn!("count reset for unknown area {area_id} ignored");
            return false;
        };
        area.count = 0;
        self.save_areas(&areas);
        true
    }

    /// Record a drop against an area. Returns the created record, or `None`
    /// when the area does not exist.
    pub fn add_loot(&self, area_id: &str, loot: NewLoot) -> Option<LootRecord> {
        let mut areas = self.load_areas();
        let Some(area) = areas.iter_mut().find(|area| area.id == area_id) else {
            warn!("loot for unknown area {area_id} ignored");
            return None;
        };
        let record = LootRecord {
            id: Uuid::new_v4().to_string(),
            kind: loot.kind,
            name: loot.name,
            rune_level: loot.rune_level,
            key_kind: loot.key_kind,
            timestamp: self.clock.now_ms(),
            area_id: area_id.to_owned(),
        };
        area.loot.push(record.clone());
        self.save_areas(&areas);

        let mut stats = self.load_stats();
        stats.total_loot += 1;
        self.save_stats(&stats);
        Some(record)
    }

    /// Drop a loot record from an area's sequence. The loot total decrements
    /// (floored at zero) whenever the area exists, matching the persisted
    /// layout's historical behavior even when the record id is absent.
    /// Returns whether a record was actually removed.
    pub fn remove_loot(&self, area_id: &str, loot_id: &str) -> bool {
        let mut areas = self.load_areas();
        let Some(area) = areas.iter_mut().find(|area| area.id == area_id) else {
            warn!("loot removal for unknown area {area_id} ignored");
            return false;
        };
        let before = area.loot.len();
        area.loot.retain(|record| record.id != loot_id);
        let removed = area.loot.len() != before;
        self.save_areas(&areas);

        let mut stats = self.load_stats();
        stats.total_loot = stats.total_loot.saturating_sub(1);
        self.save_stats(&stats);
        removed
    }

    /// Create a custom area named by the player. Its id derives from the
    /// creation instant.
    pub fn add_custom_area(&self, name: &str) -> HuntingArea {
        let mut areas = self.load_areas();
        let area = HuntingArea::new(
            format!("{CUSTOM_AREA_ID_PREFIX}{}", self.clock.now_ms()),
            name,
            AreaCategory::Custom,
        );
        areas.push(area.clone());
        self.save_areas(&areas);

        let mut ids = self.load_custom_ids();
        ids.push(area.id.clone());
        self.save_custom_ids(&ids);
        area
    }

    /// Delete a custom area, cascading only to the selection when it points
    /// at the removed area. Popular areas are refused: the seed would
    /// re-synthesize them with zeroed tallies on the next load.
    pub fn remove_custom_area(&self, area_id: &str) -> bool {
        let mut areas = self.load_areas();
        let Some(position) = areas.iter().position(|area| area.id == area_id) else {
            warn!("removal of unknown area {area_id} ignored");
            return false;
        };
        if areas[position].category != AreaCategory::Custom {
            warn!("refusing to remove non-custom area {area_id}");
            return false;
        }
        areas.remove(position);
        self.save_areas(&areas);

        let mut ids = self.load_custom_ids();
        ids.retain(|id| id != area_id);
        self.save_custom_ids(&ids);

        if self.load_selection().as_deref() == Some(area_id) {
            self.save_selection(None);
        }
        true
    }

    /// Remove every persisted document. Subsequent loads fall back to the
    /// seed and defaults, and the migration pass runs again.
    pub fn clear_all(&self) {
        for key in [
            KEY_HUNTING_AREAS,
            KEY_CUSTOM_AREAS,
            KEY_USER_STATS,
            KEY_SELECTED_AREA,
            KEY_SCHEMA_VERSION,
        ] {
            self.kv.remove(key);
        }
    }

    /// Bundle the four persisted documents, as stored, into one pretty
    /// payload with an export timestamp and format tag.
    #[must_use]
    pub fn export_snapshot(&self) -> String {
        let snapshot = Snapshot {
            hunting_areas: self.kv.get_json(KEY_HUNTING_AREAS, Value::Array(Vec::new())),
            custom_areas: self.kv.get_json(KEY_CUSTOM_AREAS, Value::Array(Vec::new())),
            user_stats: self.kv.get_json(KEY_USER_STATS, Value::Object(Map::new())),
            selected_area: self.kv.get_json(KEY_SELECTED_AREA, Value::Null),
            export_date: export_timestamp(self.clock.now_ms()),
            version: EXPORT_FORMAT_VERSION.to_owned(),
        };
        serde_json::to_string_pretty(&snapshot).unwrap_or_else(|_| "{}".to_owned())
    }

    /// Replace the persisted documents with the ones present in `payload`.
    ///
    /// Only `huntingAreas` is required (and must be an array); the other
    /// documents are applied independently when present and left untouched
    /// otherwise. A timestamped backup of the current documents is written
    /// first, best-effort.
    ///
    /// # Errors
    ///
    /// Rejects unparseable payloads and a missing or non-array
    /// `huntingAreas` field; nothing is written on any error path.
    pub fn import_snapshot(&self, payload: &str) -> Result<ImportSummary, ImportError> {
        let data: Value =
            serde_json::from_str(payload).map_err(|err| ImportError::Malformed(err.to_string()))?;
        let areas = data.get("huntingAreas").ok_or(ImportError::MissingAreas)?;
        let areas = areas.as_array().ok_or(ImportError::AreasNotArray)?;

        self.backup_current();

        self.kv.set_json(KEY_HUNTING_AREAS, areas);
        let custom_ids = data.get("customAreas");
        if let Some(doc) = custom_ids {
            self.kv.set_json(KEY_CUSTOM_AREAS, doc);
        }
        let stats_doc = data.get("userStats");
        if let Some(doc) = stats_doc {
            self.kv.set_json(KEY_USER_STATS, doc);
        }
        let selection = data.get("selectedArea");
        if let Some(doc) = selection {
            self.kv.set_json(KEY_SELECTED_AREA, doc);
        }

        Ok(ImportSummary {
            areas: areas.len(),
            applied_custom_ids: custom_ids.is_some(),
            applied_stats: stats_doc.is_some(),
            applied_selection: selection.is_some(),
        })
    }

    /// One-time rename of rune loot recorded before schema v1.
    ///
    /// Gated on the stored schema version: once the version is current the
    /// pass does nothing, so user-chosen names that happen to collide with
    /// legacy entries are never rewritten. Returns whether any record
    /// changed.
    pub fn migrate_legacy_rune_names(&self) -> bool {
        let version: u32 = self.kv.get_json(KEY_SCHEMA_VERSION, 0);
        if version >= CURRENT_SCHEMA_VERSION {
            return false;
        }

        let mut areas = self.load_areas();
        let mut changed = false;
        for area in &mut areas {
            for record in &mut area.loot {
                if record.kind != LootKind::Rune {
                    continue;
                }
                if let Some(canonical) = runes::canonical_rune_name(&record.name) {
                    record.name = canonical.to_owned();
                    changed = true;
                }
            }
        }
        if changed {
            self.save_areas(&areas);
        }
        self.kv.set_json(KEY_SCHEMA_VERSION, &CURRENT_SCHEMA_VERSION);
        changed
    }

    // An import must not fail because the backup could not be written.
    fn backup_current(&self) {
        let backup = json!({
            "huntingAreas": self.kv.get_json(KEY_HUNTING_AREAS, Value::Array(Vec::new())),
            "customAreas": self.kv.get_json(KEY_CUSTOM_AREAS, Value::Array(Vec::new())),
            "userStats": self.kv.get_json(KEY_USER_STATS, Value::Object(Map::new())),
            "selectedArea": self.kv.get_json(KEY_SELECTED_AREA, Value::Null),
        });
        let key = format!("{BACKUP_KEY_PREFIX}{}", self.clock.now_ms());
        self.kv.set_json(&key, &backup);
    }
}

fn export_timestamp(now_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(now_ms)
        .map_or_else(String::new, |instant| instant.to_rfc3339())
}

/// Field-level overlay of a persisted record onto its seed area: every field
/// present in the record wins, fields the record predates keep their seeded
/// value.
fn merge_onto_seed(seed_area: &HuntingArea, saved: &Value) -> HuntingArea {
    let mut merged = match serde_json::to_value(seed_area) {
        Ok(Value::Object(map)) => map,
        _ => return seed_area.clone(),
    };
    if let Value::Object(saved_map) = saved {
        for (field, value) in saved_map {
            merged.insert(field.clone(), value.clone());
        }
    }
    match serde_json::from_value(Value::Object(merged)) {
        Ok(area) => area,
        Err(err) => {
            warn!(
                "persisted record for {} is unreadable, using seed: {err}",
                seed_area.id
            );
            seed_area.clone()
        }
    }
}
