//! Shared configuration for the retouch editor
//!
//! This crate provides the single source of truth for zoom limits, fit
//! padding, history depth and the brush settings a fresh session starts
//! with. Values can be overridden from the environment for hosts that do
//! not carry their own settings UI.

use serde::{Deserialize, Serialize};

/// Smallest relative zoom factor
pub const DEFAULT_MIN_ZOOM: f32 = 0.1;

/// Largest relative zoom factor
pub const DEFAULT_MAX_ZOOM: f32 = 20.0;

/// Screen pixels kept free around the image when fitting it to the viewport
pub const DEFAULT_FIT_PADDING: f32 = 40.0;

/// Number of snapshots kept by the undo history
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Brush diameter in pixels
pub const DEFAULT_BRUSH_SIZE: u32 = 30;

/// Largest brush diameter in pixels
pub const MAX_BRUSH_SIZE: u32 = 500;

/// Brush opacity (0.0-1.0)
pub const DEFAULT_BRUSH_OPACITY: f32 = 1.0;

/// Brush hardness (0.0-1.0)
pub const DEFAULT_BRUSH_HARDNESS: f32 = 0.8;

/// Zoom limits and step factors for the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Lower clamp for the relative zoom
    pub min_zoom: f32,
    /// Upper clamp for the relative zoom
    pub max_zoom: f32,
    /// Padding subtracted from the viewport size when fitting
    pub fit_padding: f32,
    /// Factor applied by the zoom-in button and Ctrl/Cmd + "+"
    pub button_zoom_in: f32,
    /// Factor applied by the zoom-out button and Ctrl/Cmd + "-"
    pub button_zoom_out: f32,
    /// Factor applied per wheel tick scrolling up
    pub wheel_zoom_in: f32,
    /// Factor applied per wheel tick scrolling down
    pub wheel_zoom_out: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            fit_padding: DEFAULT_FIT_PADDING,
            button_zoom_in: 1.2,
            button_zoom_out: 0.8,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
        }
    }
}

/// Brush settings a new session starts with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushDefaults {
    /// Diameter in pixels
    pub size: u32,
    /// Stroke opacity 0.0-1.0
    pub opacity: f32,
    /// Edge hardness 0.0-1.0
    pub hardness: f32,
}

impl Default for BrushDefaults {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            opacity: DEFAULT_BRUSH_OPACITY,
            hardness: DEFAULT_BRUSH_HARDNESS,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub view: ViewConfig,
    /// Maximum number of history snapshots (including the loaded original)
    pub history_capacity: usize,
    pub brush: BrushDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            brush: BrushDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Build a config from defaults plus environment overrides
    ///
    /// Reads `RETOUCH_HISTORY_CAPACITY`, `RETOUCH_MIN_ZOOM` and
    /// `RETOUCH_MAX_ZOOM`. Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = env_value::<usize>("RETOUCH_HISTORY_CAPACITY") {
            config.history_capacity = capacity;
        }
        if let Some(min_zoom) = env_value::<f32>("RETOUCH_MIN_ZOOM") {
            config.view.min_zoom = min_zoom;
        }
        if let Some(max_zoom) = env_value::<f32>("RETOUCH_MAX_ZOOM") {
            config.view.max_zoom = max_zoom;
        }

        config.sanitized()
    }

    /// Return a copy with out-of-range values replaced by defaults
    ///
    /// Guarantees `history_capacity >= 1` and `0 < min_zoom <= 1 <= max_zoom`,
    /// so a freshly fitted view (zoom 1.0) is always inside the zoom range.
    pub fn sanitized(mut self) -> Self {
        if self.history_capacity == 0 {
            self.history_capacity = DEFAULT_HISTORY_CAPACITY;
        }
        if !(self.view.min_zoom > 0.0 && self.view.min_zoom <= 1.0) {
            self.view.min_zoom = DEFAULT_MIN_ZOOM;
        }
        if !(self.view.max_zoom >= 1.0 && self.view.max_zoom.is_finite()) {
            self.view.max_zoom = DEFAULT_MAX_ZOOM;
        }
        self
    }
}

fn env_value<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse().ok()
}
