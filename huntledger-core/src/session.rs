//! In-memory session state mirroring the domain store.
//!
//! The UI layer reads this snapshot and issues commands through it, never
//! touching persistence directly. After every command the in-memory state is
//! reloaded from what the store just persisted, so the two agree at every
//! command boundary.

use log::warn;

use crate::Clock;
use crate::area::{HuntingArea, NewLoot};
use crate::events::EventTracker;
use crate::snapshot::{ImportError, ImportSummary};
use crate::stats::UserStats;
use crate::storage::KeyValueStore;
use crate::store::LedgerStore;

/// Session facade over the [`LedgerStore`].
pub struct LedgerSession<S, C> {
    store: LedgerStore<S, C>,
    tracker: EventTracker,
    areas: Vec<HuntingArea>,
    selection: Option<String>,
    stats: UserStats,
}

impl<S: KeyValueStore, C: Clock> LedgerSession<S, C> {
    /// Run the pending migration, then load everything into memory.
    pub fn new(kv: S, clock: C) -> Self {
        Self::with_tracker(kv, clock, EventTracker::new())
    }

    /// Like [`LedgerSession::new`] with a caller-supplied tracker.
    pub fn with_tracker(kv: S, clock: C, tracker: EventTracker) -> Self {
        let store = LedgerStore::new(kv, clock);
        store.migrate_legacy_rune_names();
        let mut session = Self {
            store,
            tracker,
            areas: Vec::new(),
            selection: None,
            stats: UserStats::starting_at(0),
        };
        session.sync();
        session
    }

    /// Current area list, seed-merged and in display order.
    #[must_use]
    pub fn areas(&self) -> &[HuntingArea] {
        &self.areas
    }

    /// Id of the selected area, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// The selected area itself.
    #[must_use]
    pub fn selected_area(&self) -> Option<&HuntingArea> {
        let id = self.selection.as_deref()?;
        self.areas.iter().find(|area| area.id == id)
    }

    #[must_use]
    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    #[must_use]
    pub fn tracker(&self) -> &EventTracker {
        &self.tracker
    }

    /// Drain the event buffer.
    pub fn flush_events(&mut self) {
        self.tracker.flush();
    }

    /// Select an area, or pass `None` to clear. Selecting an id that is not
    /// in the current list is a logged no-op.
    pub fn select_area(&mut self, area_id: Option<&str>) {
        if let Some(id) = area_id {
            let Some(area) = self.areas.iter().find(|area| area.id == id) else {
                warn!("selection of unknown area {id} ignored");
                return;
            };
            let name = area.name.clone();
            let now = self.store.now_ms();
            self.tracker.area_selected(&name, now);
        }
        self.store.save_selection(area_id);
        self.selection = area_id.map(ToOwned::to_owned);
    }

    /// Tally one completed run.
    pub fn increment_run(&mut self, area_id: &str) {
        if self.store.increment_run(area_id) {
            if let Some(name) = self.area_name(area_id) {
                let now = self.store.now_ms();
                self.tracker.run_incremented(&name, now);
            }
        }
        self.sync();
    }

    /// Zero an area's session tally.
    pub fn reset_count(&mut self, area_id: &str) {
        self.store.reset_count(area_id);
        self.sync();
    }

    /// Create a custom area and return its id.
    pub fn add_custom_area(&mut self, name: &str) -> String {
        let area = self.store.add_custom_area(name);
        let now = self.store.now_ms();
        self.tracker.custom_area_added(&area.name, now);
        self.sync();
        area.id
    }

    /// Delete a custom area; a selection pointing at it is cleared.
    pub fn remove_custom_area(&mut self, area_id: &str) -> bool {
        let removed = self.store.remove_custom_area(area_id);
        self.sync();
        removed
    }

    /// Record a drop and return the new record's id when the area exists.
    pub fn add_loot(&mut self, area_id: &str, loot: NewLoot) -> Option<String> {
        let record = self.store.add_loot(area_id, loot);
        if let (Some(record), Some(name)) = (&record, self.area_name(area_id)) {
            let now = self.store.now_ms();
            self.tracker
                .loot_recorded(record.kind, &record.name, &name, now);
        }
        self.sync();
        record.map(|record| record.id)
    }

    /// Drop a loot record.
    pub fn remove_loot(&mut self, area_id: &str, loot_id: &str) -> bool {
        let removed = self.store.remove_loot(area_id, loot_id);
        self.sync();
        removed
    }

    /// Re-read everything from persistence.
    pub fn refresh(&mut self) {
        self.sync();
    }

    /// Wipe the ledger; the next sync falls back to the seed and defaults.
    pub fn clear_all(&mut self) {
        self.store.clear_all();
        self.sync();
    }

    /// Serialized snapshot of the persisted ledger.
    #[must_use]
    pub fn export_snapshot(&self) -> String {
        self.store.export_snapshot()
    }

    /// Replace the persisted ledger from a snapshot payload and mirror the
    /// result.
    ///
    /// # Errors
    ///
    /// Propagates [`ImportError`] from the store; the session state is left
    /// untouched on failure.
    pub fn import_snapshot(&mut self, payload: &str) -> Result<ImportSummary, ImportError> {
        let summary = self.store.import_snapshot(payload)?;
        self.sync();
        Ok(summary)
    }

    fn area_name(&self, area_id: &str) -> Option<String> {
        self.store
            .load_areas()
            .into_iter()
            .find(|area| area.id == area_id)
            .map(|area| area.name)
    }

    /// Reload the mirror from persistence and re-establish the selection
    /// invariant: unset, or the id of a currently-existing area.
    fn sync(&mut self) {
        self.areas = self.store.load_areas();
        self.stats = self.store.load_stats();
        self.selection = self.store.load_selection();
        let dangling = self
            .selection
            .as_deref()
            .is_some_and(|id| !self.areas.iter().any(|area| area.id == id));
        if dangling {
            self.store.save_selection(None);
            self.selection = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use crate::area::{AreaCategory, LootKind};
    use crate::storage::{MemoryStore, StoreExt};

    fn session() -> LedgerSession<MemoryStore, FixedClock> {
        LedgerSession::new(MemoryStore::new(), FixedClock::starting_at(1_700_000_000_000))
    }

    /// The in-memory mirror must equal a fresh read of persistence. A stats
    /// document only exists once a command has written one; before that the
    /// mirror holds a zeroed default.
    fn assert_mirrors_persistence(
        session: &LedgerSession<&MemoryStore, FixedClock>,
        kv: &MemoryStore,
    ) {
        assert_eq!(session.areas, session.store.load_areas());
        assert_eq!(session.selection, session.store.load_selection());
        if kv.get_raw("USER_STATS").is_some() {
            assert_eq!(session.stats, session.store.load_stats());
        } else {
            assert_eq!(session.stats.total_runs, 0);
            assert_eq!(session.stats.total_loot, 0);
        }
    }

    #[test]
    fn fresh_session_shows_the_seed() {
        let kv = MemoryStore::new();
        let session = LedgerSession::new(&kv, FixedClock::starting_at(1_700_000_000_000));
        assert_eq!(session.areas().len(), 10);
        assert!(session.selection().is_none());
        assert_eq!(session.stats().total_runs, 0);
        assert_mirrors_persistence(&session, &kv);
    }

    #[test]
    fn commands_keep_memory_and_persistence_agreeing() {
        let kv = MemoryStore::new();
        let mut session = LedgerSession::new(&kv, FixedClock::starting_at(1_700_000_000_000));

        session.increment_run("mephisto");
        assert_mirrors_persistence(&session, &kv);

        let custom = session.add_custom_area("Lower Kurast");
        assert_mirrors_persistence(&session, &kv);

        session.select_area(Some(&custom));
        assert_mirrors_persistence(&session, &kv);

        let loot = session
            .add_loot(&custom, NewLoot::item("Gheed's Fortune"))
            .unwrap();
        assert_mirrors_persistence(&session, &kv);

        session.remove_loot(&custom, &loot);
        assert_mirrors_persistence(&session, &kv);

        session.remove_custom_area(&custom);
        assert_mirrors_persistence(&session, &kv);

        session.clear_all();
        assert_mirrors_persistence(&session, &kv);
    }

    #[test]
    fn selection_points_at_existing_area_or_nothing() {
        let mut session = session();
        session.select_area(Some("mephisto"));
        assert_eq!(session.selected_area().map(|area| area.name.as_str()), Some("Mephisto"));

        // Unknown ids are ignored, keeping the previous selection.
        session.select_area(Some("tristram"));
        assert_eq!(session.selection(), Some("mephisto"));

        session.select_area(None);
        assert!(session.selection().is_none());
    }

    #[test]
    fn removing_the_selected_custom_area_clears_selection() {
        let kv = MemoryStore::new();
        let mut session = LedgerSession::new(&kv, FixedClock::starting_at(1_700_000_000_000));
        let custom = session.add_custom_area("Lower Kurast");
        session.select_area(Some(&custom));

        assert!(session.remove_custom_area(&custom));
        assert!(session.selection().is_none());
        assert_mirrors_persistence(&session, &kv);
    }

    #[test]
    fn dangling_persisted_selection_is_cleared_on_sync() {
        let kv = MemoryStore::new();
        kv.set_json("SELECTED_AREA", &Some("custom-123"));
        let session = LedgerSession::new(kv, FixedClock::starting_at(1_700_000_000_000));

        assert!(session.selection().is_none());
        assert!(session.store.load_selection().is_none());
    }

    #[test]
    fn session_runs_the_migration_on_construction() {
        let kv = MemoryStore::new();
        {
            let store = LedgerStore::new(&kv, FixedClock::starting_at(1));
            store.add_loot("countess", NewLoot::rune("ist", 24));
        }
        let session = LedgerSession::new(kv, FixedClock::starting_at(1_700_000_000_000));

        let countess = session
            .areas()
            .iter()
            .find(|area| area.id == "countess")
            .unwrap();
        assert_eq!(countess.loot[0].name, "Ist");
    }

    #[test]
    fn commands_record_events() {
        let mut session = session();
        session.select_area(Some("mephisto"));
        session.increment_run("mephisto");
        let custom = session.add_custom_area("Lower Kurast");
        session.add_loot(&custom, NewLoot::rune("Ber", 30));

        let names: Vec<&str> = session
            .tracker()
            .events()
            .iter()
            .map(|event| event.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "area_selected",
                "area_increment",
                "custom_area_added",
                "loot_recorded"
            ]
        );
        let loot_event = &session.tracker().events()[3];
        assert_eq!(loot_event.properties["loot_type"], LootKind::Rune.as_str());
        assert_eq!(loot_event.properties["area_name"], "Lower Kurast");

        session.flush_events();
        assert!(session.tracker().events().is_empty());
    }

    #[test]
    fn import_failure_leaves_session_untouched() {
        let kv = MemoryStore::new();
        let mut session = LedgerSession::new(&kv, FixedClock::starting_at(1_700_000_000_000));
        session.increment_run("mephisto");
        let before = session.areas().to_vec();

        let result = session.import_snapshot("{\"userStats\":{}}");
        assert!(result.is_err());
        assert_eq!(session.areas(), before.as_slice());
        assert_mirrors_persistence(&session, &kv);
    }

    #[test]
    fn custom_areas_are_custom_category() {
        let mut session = session();
        let id = session.add_custom_area("Lower Kurast");
        let area = session.areas().iter().find(|area| area.id == id).unwrap();
        assert_eq!(area.category, AreaCategory::Custom);
        assert!(id.starts_with("custom-"));
    }
}
