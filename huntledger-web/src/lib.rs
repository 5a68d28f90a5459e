#![forbid(unsafe_code)]
//! Browser bindings for the Huntledger core.
//!
//! This crate supplies the `localStorage`-backed persistence adapter and the
//! browser clock, plus a constructor wiring both into a ready session. All
//! presentation concerns live in the host UI shell, not here.

pub mod dom;
pub mod storage;

pub use storage::{BrowserClock, BrowserStore};

use huntledger_core::LedgerSession;

/// Session backed by browser `localStorage` and the browser clock.
pub type BrowserSession = LedgerSession<BrowserStore, BrowserClock>;

/// Create a session wired to the browser environment. Outside a browser the
/// storage adapter reads as permanently empty and swallows writes, so the
/// session still constructs and serves the seed.
#[must_use]
pub fn create_browser_session() -> BrowserSession {
    LedgerSession::new(BrowserStore::new(), BrowserClock)
}
