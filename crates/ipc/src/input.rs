//! Input event types for pointer, wheel and keyboard.
//!
//! Events arrive already classified by the host: coordinates are screen
//! pixels relative to the viewport's top-left corner.

use serde::{Deserialize, Serialize};

/// Pointer input events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MouseEvent {
    Move {
        x: f32,
        y: f32,
    },
    ButtonDown {
        button: MouseButton,
        x: f32,
        y: f32,
        #[serde(default)]
        modifiers: Modifiers,
    },
    ButtonUp {
        button: MouseButton,
        x: f32,
        y: f32,
    },
    /// Wheel over the workspace. Positive `delta_y` scrolls down (zoom out).
    Scroll {
        delta_x: f32,
        delta_y: f32,
        x: f32,
        y: f32,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// The button that paints, picks the source and pans
    pub fn is_primary(self) -> bool {
        self == MouseButton::Left
    }
}

/// Keyboard input event.
///
/// `key` uses web `KeyboardEvent.key` values ("Shift", "Alt", "z", "+", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardEvent {
    pub key: String,
    pub pressed: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    pub fn down(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            pressed: true,
            modifiers,
        }
    }

    pub fn up(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            pressed: false,
            modifiers,
        }
    }
}

/// Keyboard modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}
