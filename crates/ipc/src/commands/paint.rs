//! Paint command types for the clone stamp.

use serde::{Deserialize, Serialize};

/// Commands for controlling the clone brush and the document history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaintCommand {
    /// Set brush diameter in pixels
    SetBrushSize { size: u32 },
    /// Set brush opacity (0.0-1.0)
    SetBrushOpacity { opacity: f32 },
    /// Set brush hardness (0.0-1.0)
    SetBrushHardness { hardness: f32 },
    /// Undo last stroke (reverts to the original when nothing is left to undo)
    Undo,
    /// Discard all edits and clear the clone source
    Reset,
}
