//! Key-value persistence adapter.
//!
//! Every persisted document goes through [`KeyValueStore`]: a raw
//! string-keyed backend with JSON (de)serialization layered on top by
//! [`StoreExt`]. Absent or unreadable payloads resolve to a caller-supplied
//! default, and failed writes are logged and swallowed, so callers never
//! branch on storage health.

use std::cell::RefCell;
use std::collections::HashMap;

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors a backend may report on write. They are logged by [`StoreExt::set_json`]
/// and never reach domain callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("write rejected: {0}")]
    WriteFailed(String),
}

/// Raw string-keyed persistence backend.
///
/// A backend that cannot store anything (no browser storage, read-only
/// context) should read as permanently empty and reject writes; it must not
/// panic.
pub trait KeyValueStore {
    /// Raw payload stored under `key`, if any.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the write did not happen; the prior value, if
    /// any, remains in place.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// JSON layer over any [`KeyValueStore`].
pub trait StoreExt: KeyValueStore {
    /// Deserialized value under `key`, or `default` when the key is absent
    /// or its payload does not parse.
    fn get_json<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get_raw(key) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    debug!("discarding unreadable payload under {key}: {err}");
                    default
                }
            },
            None => default,
        }
    }

    /// Serialize and store `value` under `key`. Failures are logged and
    /// swallowed; the prior value may remain in place.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to serialize payload for {key}: {err}");
                return;
            }
        };
        if let Err(err) = self.set_raw(key, &raw) {
            warn!("failed to persist {key}: {err}");
        }
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_raw(&self, key: &str) -> Option<String> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_raw(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// In-memory backend for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
