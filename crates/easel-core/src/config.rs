//! Session configuration.

use crate::error::{EaselError, EaselResult};
use crate::history::DEFAULT_MAX_HISTORY;
use crate::style::{SerializableColor, StyleAttributes};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a [`crate::DrawingSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Style attributes the session starts with.
    pub style: StyleAttributes,
    /// Content of newly placed text labels.
    pub text_placeholder: String,
    /// Maximum number of history entries (`None` = unbounded).
    pub max_history: Option<usize>,
    /// Drags whose extent does not exceed this on either axis are dropped.
    pub min_shape_extent: f64,
    /// Canvas background color.
    pub background: SerializableColor,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            style: StyleAttributes::default(),
            text_placeholder: "Text".to_string(),
            max_history: Some(DEFAULT_MAX_HISTORY),
            min_shape_extent: 1.0,
            background: SerializableColor::white(),
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> EaselResult<Self> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| EaselError::Config(format!("Invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> EaselResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| EaselError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Reject unusable values and clamp the style.
    pub fn validate(&mut self) -> EaselResult<()> {
        if self.max_history == Some(0) {
            return Err(EaselError::Config("max_history must be at least 1".into()));
        }
        if !(self.min_shape_extent.is_finite() && self.min_shape_extent >= 0.0) {
            return Err(EaselError::Config(format!(
                "min_shape_extent must be a non-negative number, got {}",
                self.min_shape_extent
            )));
        }
        self.style.clamp();
        Ok(())
    }
}
