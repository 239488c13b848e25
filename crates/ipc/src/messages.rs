//! Main IPC message enums for communication between the editor and UI.

use serde::{Deserialize, Serialize};

use crate::commands::{PaintCommand, ViewCommand};
use crate::error::IpcError;
use crate::input::{KeyboardEvent, MouseEvent};

/// Notice shown after the clone source is picked
pub const SOURCE_SET_NOTICE_MS: u32 = 1000;

/// Default lifetime of a transient notice
pub const DEFAULT_NOTICE_MS: u32 = 3000;

/// Messages from the UI/host to the editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToEditor {
    /// Pointer input over the workspace
    Mouse(MouseEvent),

    /// Keyboard input (already filtered by the host)
    Keyboard(KeyboardEvent),

    /// Zoom buttons, fit, viewport resize
    ViewCommand(ViewCommand),

    /// Brush sliders, undo, reset
    PaintCommand(PaintCommand),
}

/// Messages from the editor session to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorToUi {
    /// A new image replaced the document
    DocumentLoaded { width: u32, height: u32 },

    /// Zoom or pan changed
    ViewChanged {
        zoom: f32,
        /// Zoom as displayed to the user (rounded percentage)
        zoom_percent: u32,
        pan: [f32; 2],
    },

    /// Clone source picked (image space)
    SourceSet { x: f32, y: f32 },

    /// Clone source invalidated by a reset
    SourceCleared,

    /// Transient user-visible message
    Notice { message: String, duration_ms: u32 },

    /// History changed (undo button state)
    HistoryChanged { can_undo: bool, entries: usize },

    /// Pixels changed inside this image-space rectangle
    CanvasDirty {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Brush cursor or source marker needs redrawing
    OverlayChanged,

    /// Shift-drag panning started or stopped
    PanningChanged { active: bool },
}

impl UiToEditor {
    /// Parse a message sent by the UI layer
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        if json.trim().is_empty() {
            return Err(IpcError::InvalidFormat("empty message".to_string()));
        }
        Ok(serde_json::from_str(json)?)
    }
}

impl EditorToUi {
    /// Serialize a message for the UI layer
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build a notice with the default lifetime
    pub fn notice(message: impl Into<String>) -> Self {
        EditorToUi::Notice {
            message: message.into(),
            duration_ms: DEFAULT_NOTICE_MS,
        }
    }
}
