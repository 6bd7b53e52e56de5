//! Controller configuration supplied by the host page.
//!
//! Every field has a default, so hosts pass only what they want to change:
//!
//! ```json
//! { "text_color": "white", "log_level": "debug" }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::CanvasError;

/// Tunables for a [`crate::controller::CanvasController`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Fill style used by `text` when the caller passes no color.
    pub text_color: String,
    /// Alignment used by `text` when the caller passes no `centered` flag.
    pub center_text: bool,
    /// Context kind requested from `getContext`.
    pub context_kind: String,
    /// Console logger level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            text_color: "black".into(),
            center_text: true,
            context_kind: "2d".into(),
            log_level: "info".into(),
        }
    }
}

impl ControllerConfig {
    /// Parse a JSON object, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Config`] if `json` is not a valid config object.
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        serde_json::from_str(json).map_err(CanvasError::Config)
    }

    /// The configured level, falling back to `Info` for unknown names.
    #[must_use]
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
