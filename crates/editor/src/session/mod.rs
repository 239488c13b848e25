//! Editing session
//!
//! This module provides the document session that connects:
//! - Classified host input (`UiToEditor`)
//! - The viewport transform (screen <-> image mapping)
//! - The clone stamp engine (raster mutation)
//! - The snapshot history (undo / revert)
//!
//! Everything runs synchronously per event; each dispatch fully completes
//! its buffer mutation before returning.

mod input;
mod stroke;
mod undo;
mod view;

use glam::{UVec2, Vec2};
use retouch_config::EditorConfig;
use retouch_ipc::{EditorToUi, UiToEditor};
use retouch_painting::{
    BrushSettings, CloneStampEngine, HistoryStack, ImagePoint, RasterBuffer, WorkspacePoint,
    decode_image, encode_png,
};
use tracing::{debug, info, warn};

use crate::error::EditorError;
use crate::overlay::OverlayGeometry;
use crate::viewport::ViewportTransform;

/// Notice shown when painting is attempted without a clone source
pub const SOURCE_NOT_SET_NOTICE: &str = "Alt+Click first to set source!";

/// Input state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    /// Shift-drag in progress; `anchor` is the pointer with the pan removed
    Panning { anchor: WorkspacePoint },
    /// A clone stroke is in progress
    Drawing,
}

/// Clone source and the point where the current stroke began
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct CloneState {
    pub(crate) source: Option<ImagePoint>,
    pub(crate) drag_start: ImagePoint,
}

/// The loaded image and its history
#[derive(Debug)]
pub(crate) struct Document {
    pub(crate) buffer: RasterBuffer,
    pub(crate) history: HistoryStack,
}

impl Document {
    fn new(history_capacity: usize) -> Self {
        Self {
            buffer: RasterBuffer::new(0, 0),
            history: HistoryStack::new(history_capacity),
        }
    }

    /// Whole-canvas dirty region
    pub(crate) fn full_dirty(&self) -> EditorToUi {
        EditorToUi::CanvasDirty {
            x: 0,
            y: 0,
            width: self.buffer.width(),
            height: self.buffer.height(),
        }
    }

    pub(crate) fn history_changed(&self) -> EditorToUi {
        EditorToUi::HistoryChanged {
            can_undo: self.history.can_undo(),
            entries: self.history.len(),
        }
    }
}

/// One editing session: document, view, brush, clone source and history
///
/// Hosts drive the session through [`EditorSession::dispatch`]; image
/// ingestion and export go through [`EditorSession::load_image_bytes`] and
/// [`EditorSession::export_png`].
pub struct EditorSession {
    pub(crate) config: EditorConfig,
    /// None until an image is loaded
    pub(crate) document: Option<Document>,
    pub(crate) viewport: ViewportTransform,
    pub(crate) brush: BrushSettings,
    pub(crate) clone_state: CloneState,
    pub(crate) state: ControllerState,
    pub(crate) shift_held: bool,
    pub(crate) alt_held: bool,
    pub(crate) engine: CloneStampEngine,
    /// Last pointer position over the image (overlay only)
    pub(crate) cursor: Option<ImagePoint>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let config = config.sanitized();
        Self {
            viewport: ViewportTransform::new(config.view),
            brush: BrushSettings::from(config.brush),
            config,
            document: None,
            clone_state: CloneState::default(),
            state: ControllerState::Idle,
            shift_held: false,
            alt_held: false,
            engine: CloneStampEngine::new(),
            cursor: None,
        }
    }

    /// Handle one classified host message
    ///
    /// Recoverable refusals never surface as errors: a missing image is a
    /// silent no-op and a missing clone source becomes a notice. Only
    /// invariant violations are returned as `Err`.
    pub fn dispatch(&mut self, message: UiToEditor) -> Result<Vec<EditorToUi>, EditorError> {
        let mut events = Vec::new();
        let result = match message {
            UiToEditor::Mouse(event) => self.handle_mouse(event, &mut events),
            UiToEditor::Keyboard(event) => self.handle_keyboard(event, &mut events),
            UiToEditor::ViewCommand(command) => self.handle_view_command(command, &mut events),
            UiToEditor::PaintCommand(command) => self.handle_paint_command(command, &mut events),
        };

        match result {
            Ok(()) => Ok(events),
            Err(EditorError::NoImageLoaded) => {
                debug!("Dispatch: ignored, no image loaded");
                Ok(events)
            }
            Err(EditorError::SourceNotSet) => {
                debug!("Dispatch: clone source not set");
                events.push(EditorToUi::notice(SOURCE_NOT_SET_NOTICE));
                Ok(events)
            }
            Err(err) if err.is_recoverable() => {
                warn!("Dispatch: refused action: {}", err);
                events.push(EditorToUi::notice(err.to_string()));
                Ok(events)
            }
            Err(err) => Err(err),
        }
    }

    /// Replace the document with a decoded image
    ///
    /// History collapses to the new image, the clone source is unset and
    /// the view is fitted to the current viewport size.
    pub fn load_raster(&mut self, raster: RasterBuffer) -> Vec<EditorToUi> {
        let mut events = Vec::new();
        self.state = ControllerState::Idle;
        self.cursor = None;
        if self.clone_state.source.take().is_some() {
            events.push(EditorToUi::SourceCleared);
        }

        let capacity = self.config.history_capacity;
        let doc = self.document.get_or_insert_with(|| Document::new(capacity));
        doc.buffer.load_from(raster);
        doc.history.reset(doc.buffer.snapshot());

        let (width, height) = doc.buffer.dimensions();
        info!("Session: loaded {}x{} image", width, height);

        events.push(EditorToUi::DocumentLoaded { width, height });
        events.push(doc.history_changed());
        events.push(doc.full_dirty());

        let viewport_size = self.viewport.viewport_size();
        self.viewport.fit_to_view(UVec2::new(width, height), viewport_size);
        events.push(self.view_changed());
        events.push(EditorToUi::OverlayChanged);
        events
    }

    /// Decode image bytes and load them as the new document
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<Vec<EditorToUi>, EditorError> {
        let raster = decode_image(bytes)?;
        Ok(self.load_raster(raster))
    }

    /// Encode the current document as PNG
    pub fn export_png(&self) -> Result<Vec<u8>, EditorError> {
        let doc = self.document.as_ref().ok_or(EditorError::NoImageLoaded)?;
        Ok(encode_png(&doc.buffer)?)
    }

    /// Set the viewport size (host layout), without refitting
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.set_viewport_size(Vec2::new(width, height));
    }

    /// Read-only access to the live pixels
    pub fn buffer(&self) -> Option<&RasterBuffer> {
        self.document.as_ref().map(|doc| &doc.buffer)
    }

    pub fn history(&self) -> Option<&HistoryStack> {
        self.document.as_ref().map(|doc| &doc.history)
    }

    pub fn has_image(&self) -> bool {
        self.document.is_some()
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Current clone source, None until picked or after a reset
    pub fn source(&self) -> Option<ImagePoint> {
        self.clone_state.source
    }

    pub fn is_source_set(&self) -> bool {
        self.clone_state.source.is_some()
    }

    /// Last pointer position over the image
    pub fn cursor(&self) -> Option<ImagePoint> {
        self.cursor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Overlay geometry for the given cursor position
    ///
    /// None before an image is loaded or while the view is degenerate.
    pub fn overlay(&self, cursor: Option<ImagePoint>) -> Option<OverlayGeometry> {
        self.document.as_ref()?;
        OverlayGeometry::build(
            self.viewport.screen_pixels_per_image_pixel(),
            &self.brush,
            cursor,
            self.clone_state.source,
            self.alt_held,
        )
    }

    pub(crate) fn document_mut(&mut self) -> Result<&mut Document, EditorError> {
        self.document.as_mut().ok_or(EditorError::NoImageLoaded)
    }

    pub(crate) fn require_image(&self) -> Result<(), EditorError> {
        if self.document.is_none() {
            return Err(EditorError::NoImageLoaded);
        }
        Ok(())
    }

    pub(crate) fn view_changed(&self) -> EditorToUi {
        let pan = self.viewport.pan();
        EditorToUi::ViewChanged {
            zoom: self.viewport.zoom(),
            zoom_percent: self.viewport.zoom_percent(),
            pan: [pan.dx(), pan.dy()],
        }
    }
}
