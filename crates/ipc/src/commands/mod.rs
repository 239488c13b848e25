//! Command types for IPC messages.

mod paint;

pub use paint::*;

use serde::{Deserialize, Serialize};

/// View navigation commands (zoom buttons, fit, host resize).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewCommand {
    /// Zoom in by the button step, centred on the layout
    ZoomIn,
    /// Zoom out by the button step, centred on the layout
    ZoomOut,
    /// Fit the image inside the viewport and reset zoom/pan
    ZoomFit,
    /// The host viewport changed size (screen pixels)
    ResizeViewport { width: f32, height: f32 },
}
