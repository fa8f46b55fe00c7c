//! Raw pointer and keyboard events as delivered by the windowing layer.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Phase of a pointer event within a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A pointer event in screen coordinates, before the engine maps it onto
/// the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPointer {
    /// Position in screen (viewport) pixels.
    pub position: Point,
    #[serde(default)]
    pub button: MouseButton,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl RawPointer {
    /// Left-button event at a screen position.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        }
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key name, e.g. `"z"`, `"Delete"`, `"Escape"`.
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Key without modifiers.
    pub fn plain(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::default())
    }

    /// Key with Ctrl held.
    pub fn ctrl(key: impl Into<String>) -> Self {
        Self::new(
            key,
            Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        )
    }

    /// Key with Ctrl and Shift held.
    pub fn ctrl_shift(key: impl Into<String>) -> Self {
        Self::new(
            key,
            Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::default()
            },
        )
    }
}
