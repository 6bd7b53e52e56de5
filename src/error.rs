//! Error taxonomy for the canvas controller.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use wasm_bindgen::JsValue;

/// Errors surfaced by controller construction, drawing, flushing, and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// `window` is not available (not running in a browser).
    #[error("no global window")]
    NoWindow,
    /// `window.document` is not available.
    #[error("window has no document")]
    NoDocument,
    /// `document.body` is not available; key listeners attach there.
    #[error("document has no body")]
    NoBody,
    /// No element with the requested id exists.
    #[error("canvas element not found: {0}")]
    CanvasNotFound(String),
    /// The element exists but is not a `<canvas>`.
    #[error("element is not a canvas: {0}")]
    NotACanvas(String),
    /// `getContext(kind)` returned nothing usable.
    #[error("canvas has no {0} context")]
    NoContext(String),
    /// A key event arrived before a room was assigned, or after it was dropped.
    #[error("no room assigned to receive key events")]
    NoRoom,
    /// A host call threw.
    #[error("host call failed: {0}")]
    Host(String),
    /// The image-request snapshot could not be encoded.
    #[error("failed to serialize image list: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The host configuration object was malformed.
    #[error("invalid controller config: {0}")]
    Config(#[source] serde_json::Error),
}

impl CanvasError {
    /// Wrap a thrown JS value, keeping its debug rendering.
    #[must_use]
    pub fn host(value: &JsValue) -> Self {
        Self::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<CanvasError> for JsValue {
    fn from(err: CanvasError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
