//! `localStorage`-backed persistence adapter and the browser clock.

use huntledger_core::{Clock, KeyValueStore, StorageError};

use crate::dom;

/// Key-value adapter over browser `localStorage`.
///
/// Every call re-resolves the storage handle, so a context without one (SSR,
/// tooling, storage denied) reads as permanently empty and rejects writes;
/// the core logs and swallows those rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl KeyValueStore for BrowserStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        dom::local_storage()?.get_item(key).ok().flatten()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let Some(storage) = dom::local_storage() else {
            return Err(StorageError::Unavailable);
        };
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::WriteFailed(dom::js_error_message(&err)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = dom::local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Millisecond clock from `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    #[allow(clippy::cast_possible_truncation)] // Date.now() is integral ms.
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}
