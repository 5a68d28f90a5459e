//! In-browser checks for the `localStorage` adapter.

#![cfg(target_arch = "wasm32")]

use huntledger_core::storage::StoreExt;
use huntledger_core::{KeyValueStore, LedgerSession, NewLoot};
use huntledger_web::{BrowserClock, BrowserStore};
use wasm_bindgen_test::wasm_bindgen_test;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn wipe() {
    let store = BrowserStore::new();
    for key in [
        "HUNTING_AREAS",
        "CUSTOM_AREAS",
        "USER_STATS",
        "SELECTED_AREA",
        "SCHEMA_VERSION",
        "huntledger.test",
    ] {
        store.remove(key);
    }
}

#[wasm_bindgen_test]
fn raw_values_round_trip_through_local_storage() {
    wipe();
    let store = BrowserStore::new();

    assert!(store.get_raw("huntledger.test").is_none());
    store.set_raw("huntledger.test", "42").unwrap();
    assert_eq!(store.get_raw("huntledger.test").as_deref(), Some("42"));

    store.remove("huntledger.test");
    assert!(store.get_raw("huntledger.test").is_none());
}

#[wasm_bindgen_test]
fn json_layer_survives_corrupt_payloads() {
    wipe();
    let store = BrowserStore::new();
    store.set_raw("huntledger.test", "{not json").unwrap();
    let value: Vec<u32> = store.get_json("huntledger.test", vec![9]);
    assert_eq!(value, vec![9]);
    store.remove("huntledger.test");
}

#[wasm_bindgen_test]
fn ledger_persists_across_session_instances() {
    wipe();
    {
        let mut session = LedgerSession::new(BrowserStore::new(), BrowserClock);
        session.increment_run("mephisto");
        session.add_loot("mephisto", NewLoot::rune("Ber", 30));
        session.select_area(Some("mephisto"));
    }

    let session = huntledger_web::create_browser_session();
    assert_eq!(session.selection(), Some("mephisto"));
    let mephisto = session.selected_area().expect("selected area present");
    assert_eq!(mephisto.total_runs, 1);
    assert_eq!(mephisto.loot.len(), 1);
    wipe();
}
