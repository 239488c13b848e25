//! Routing of pointer, keyboard and paint commands

use retouch_ipc::{EditorToUi, KeyboardEvent, MouseEvent, PaintCommand};
use retouch_painting::ScreenPoint;
use tracing::debug;

use super::{ControllerState, EditorSession};
use crate::error::EditorError;

impl EditorSession {
    pub(crate) fn handle_mouse(
        &mut self,
        event: MouseEvent,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        match event {
            MouseEvent::ButtonDown { button, x, y, modifiers } => {
                if !button.is_primary() {
                    return Ok(());
                }
                self.primary_down(ScreenPoint::new(x, y), modifiers.alt, events)
            }
            MouseEvent::Move { x, y } => self.pointer_moved(ScreenPoint::new(x, y), events),
            MouseEvent::ButtonUp { button, .. } => {
                if button.is_primary() {
                    self.end_interaction(events);
                }
                Ok(())
            }
            MouseEvent::Scroll { delta_y, x, y, .. } => {
                self.wheel(delta_y, ScreenPoint::new(x, y), events)
            }
        }
    }

    fn pointer_moved(
        &mut self,
        screen: ScreenPoint,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        self.require_image()?;

        if let ControllerState::Panning { anchor } = self.state {
            if self.shift_held {
                self.viewport.set_pan(anchor.pan_to(screen));
                events.push(self.view_changed());
                events.push(EditorToUi::OverlayChanged);
            }
            return Ok(());
        }

        let drawing = self.state == ControllerState::Drawing;
        if !drawing && !self.viewport.contains_screen_point(screen) {
            if self.cursor.take().is_some() {
                events.push(EditorToUi::OverlayChanged);
            }
            return Ok(());
        }

        let point = self.viewport.screen_to_image(screen);
        if drawing {
            self.stroke_to(point, events)?;
        }
        self.cursor = Some(point);
        events.push(EditorToUi::OverlayChanged);
        Ok(())
    }

    /// Track Shift/Alt and run the Ctrl/Cmd shortcuts
    pub(crate) fn handle_keyboard(
        &mut self,
        event: KeyboardEvent,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        let has_image = self.document.is_some();

        if !event.pressed {
            match event.key.as_str() {
                "Shift" => {
                    self.shift_held = false;
                    if matches!(self.state, ControllerState::Panning { .. }) {
                        self.end_interaction(events);
                    }
                    if has_image {
                        events.push(EditorToUi::PanningChanged { active: false });
                    }
                }
                "Alt" => {
                    self.alt_held = false;
                    events.push(EditorToUi::OverlayChanged);
                }
                _ => {}
            }
            return Ok(());
        }

        match event.key.as_str() {
            "Shift" => {
                if !self.shift_held {
                    self.shift_held = true;
                    if has_image {
                        events.push(EditorToUi::PanningChanged { active: true });
                    }
                }
                Ok(())
            }
            "Alt" => {
                self.alt_held = true;
                events.push(EditorToUi::OverlayChanged);
                Ok(())
            }
            "z" if event.modifiers.command() => self.undo(events),
            "=" | "+" if event.modifiers.command() => {
                let factor = self.config.view.button_zoom_in;
                self.zoom_step(factor, events)
            }
            "-" if event.modifiers.command() => {
                let factor = self.config.view.button_zoom_out;
                self.zoom_step(factor, events)
            }
            other => {
                debug!("Key ignored: {:?}", other);
                Ok(())
            }
        }
    }

    pub(crate) fn handle_paint_command(
        &mut self,
        command: PaintCommand,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        match command {
            PaintCommand::SetBrushSize { size } => {
                self.brush.set_size(size);
                events.push(EditorToUi::OverlayChanged);
                Ok(())
            }
            PaintCommand::SetBrushOpacity { opacity } => {
                self.brush.set_opacity(opacity);
                Ok(())
            }
            PaintCommand::SetBrushHardness { hardness } => {
                self.brush.set_hardness(hardness);
                Ok(())
            }
            PaintCommand::Undo => self.undo(events),
            PaintCommand::Reset => self.reset(events),
        }
    }
}
