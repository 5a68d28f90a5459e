//! Fire-and-forget event tracking.
//!
//! Events buffer in memory and a "flush" logs a count and drops them; there
//! is no transport. The tracker is constructed explicitly and handed to the
//! session rather than living as a process-wide singleton, so tests can
//! inspect or replace it.

use log::info;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::area::LootKind;
use crate::constants::EVENT_BUFFER_CAP;

/// A single recorded event. Never persisted, never transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEvent {
    pub name: String,
    pub properties: Value,
    /// Recording instant, milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub session_id: String,
}

/// Buffered event recorder.
#[derive(Debug)]
pub struct EventTracker {
    session_id: String,
    events: Vec<TrackedEvent>,
}

impl EventTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Events currently buffered.
    #[must_use]
    pub fn events(&self) -> &[TrackedEvent] {
        &self.events
    }

    /// Record a named event with free-form properties.
    pub fn track(&mut self, name: &str, properties: Value, now_ms: i64) {
        self.events.push(TrackedEvent {
            name: name.to_owned(),
            properties,
            timestamp: now_ms,
            session_id: self.session_id.clone(),
        });
        if self.events.len() >= EVENT_BUFFER_CAP {
            self.flush();
        }
    }

    /// Drain the buffer. There is no transport; the drained count is logged
    /// and the events are dropped.
    pub fn flush(&mut self) {
        if self.events.is_empty() {
            return;
        }
        info!(
            "dropping {} buffered events (no transport configured)",
            self.events.len()
        );
        self.events.clear();
    }

    pub fn area_selected(&mut self, area_name: &str, now_ms: i64) {
        self.track("area_selected", json!({ "area_name": area_name }), now_ms);
    }

    pub fn run_incremented(&mut self, area_name: &str, now_ms: i64) {
        self.track(
            "area_increment",
            json!({ "area_name": area_name, "action": "increment_count" }),
            now_ms,
        );
    }

    pub fn custom_area_added(&mut self, area_name: &str, now_ms: i64) {
        self.track("custom_area_added", json!({ "area_name": area_name }), now_ms);
    }

    pub fn loot_recorded(&mut self, kind: LootKind, name: &str, area_name: &str, now_ms: i64) {
        self.track(
            "loot_recorded",
            json!({
                "loot_type": kind.as_str(),
                "loot_name": name,
                "area_name": area_name,
            }),
            now_ms,
        );
    }
}

impl Default for EventTracker {
    fn default() -> Self {
        Self::new()
    }
}
