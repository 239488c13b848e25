//! Zoom, fit and viewport resize

use glam::{UVec2, Vec2};
use retouch_ipc::{EditorToUi, ViewCommand};
use retouch_painting::ScreenPoint;

use super::EditorSession;
use crate::error::EditorError;

impl EditorSession {
    pub(crate) fn handle_view_command(
        &mut self,
        command: ViewCommand,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        match command {
            ViewCommand::ZoomIn => {
                let factor = self.config.view.button_zoom_in;
                self.zoom_step(factor, events)
            }
            ViewCommand::ZoomOut => {
                let factor = self.config.view.button_zoom_out;
                self.zoom_step(factor, events)
            }
            ViewCommand::ZoomFit => self.fit(events),
            ViewCommand::ResizeViewport { width, height } => {
                self.viewport.set_viewport_size(Vec2::new(width, height));
                if self.document.is_some() {
                    events.push(self.view_changed());
                    events.push(EditorToUi::OverlayChanged);
                }
                Ok(())
            }
        }
    }

    /// Zoom about the layout centre (buttons and shortcuts)
    pub(crate) fn zoom_step(
        &mut self,
        factor: f32,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        self.require_image()?;
        if self.viewport.zoom_by(factor, None) {
            events.push(self.view_changed());
            events.push(EditorToUi::OverlayChanged);
        }
        Ok(())
    }

    /// Wheel zoom anchored at the pointer; down zooms out, anything else zooms in
    pub(crate) fn wheel(
        &mut self,
        delta_y: f32,
        anchor: ScreenPoint,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        self.require_image()?;
        let view = self.config.view;
        // Only a positive delta zooms out; zero counts as a zoom in
        let factor = if delta_y > 0.0 {
            view.wheel_zoom_out
        } else {
            view.wheel_zoom_in
        };

        if self.viewport.zoom_by(factor, Some(anchor)) {
            events.push(self.view_changed());
            events.push(EditorToUi::OverlayChanged);
        }
        Ok(())
    }

    fn fit(&mut self, events: &mut Vec<EditorToUi>) -> Result<(), EditorError> {
        let doc = self.document.as_ref().ok_or(EditorError::NoImageLoaded)?;
        let (width, height) = doc.buffer.dimensions();
        let viewport_size = self.viewport.viewport_size();
        self.viewport.fit_to_view(UVec2::new(width, height), viewport_size);
        events.push(self.view_changed());
        events.push(EditorToUi::OverlayChanged);
        Ok(())
    }
}
