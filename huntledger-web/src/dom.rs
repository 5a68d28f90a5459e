//! Thin helpers over the browser globals.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Storage, Window};

/// The global `window`, when running in a browser context.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// The browser `localStorage` handle. `None` covers both a missing window
/// (non-browser context) and storage denied by the embedder.
#[must_use]
pub fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
