//! Primary-button handling: source picking, clone strokes and pan drags

use retouch_ipc::{EditorToUi, SOURCE_SET_NOTICE_MS};
use retouch_painting::{ImagePoint, ScreenPoint, StampSample};
use tracing::{debug, info};

use super::{ControllerState, EditorSession};
use crate::error::EditorError;

impl EditorSession {
    /// Primary button pressed at a screen position
    ///
    /// Shift starts a pan, Alt picks the clone source, anything else starts
    /// a clone stroke if a source has been picked.
    pub(crate) fn primary_down(
        &mut self,
        screen: ScreenPoint,
        alt: bool,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        self.require_image()?;
        if self.state != ControllerState::Idle {
            debug!("primary_down: missed release, ending {:?}", self.state);
            self.end_interaction(events);
        }

        if self.shift_held {
            self.state = ControllerState::Panning {
                anchor: screen.to_workspace(self.viewport.pan()),
            };
            return Ok(());
        }

        let point = self.viewport.screen_to_image(screen);

        if alt || self.alt_held {
            self.clone_state.source = Some(point);
            info!("Clone source set at ({:.1}, {:.1})", point.x(), point.y());
            events.push(EditorToUi::SourceSet {
                x: point.x(),
                y: point.y(),
            });
            events.push(EditorToUi::Notice {
                message: "Source point set".to_string(),
                duration_ms: SOURCE_SET_NOTICE_MS,
            });
            events.push(EditorToUi::OverlayChanged);
            return Ok(());
        }

        self.begin_stroke(point, events)
    }

    /// Snapshot the buffer, fix the stroke origin and run the first sample
    pub(crate) fn begin_stroke(
        &mut self,
        point: ImagePoint,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        let source = self.clone_state.source.ok_or(EditorError::SourceNotSet)?;
        let doc = self.document_mut()?;

        let snapshot = doc.buffer.snapshot();
        doc.history.push(snapshot);
        events.push(doc.history_changed());

        self.clone_state.drag_start = point;
        self.state = ControllerState::Drawing;
        debug!(
            "Stroke begin at ({:.1}, {:.1}), source ({:.1}, {:.1})",
            point.x(),
            point.y(),
            source.x(),
            source.y()
        );

        self.stroke_to(point, events)
    }

    /// Run one clone sample of the active stroke
    pub(crate) fn stroke_to(
        &mut self,
        point: ImagePoint,
        events: &mut Vec<EditorToUi>,
    ) -> Result<(), EditorError> {
        let Some(source) = self.clone_state.source else {
            return Err(EditorError::SourceNotSet);
        };
        let drag_start = self.clone_state.drag_start;
        let doc = self.document.as_mut().ok_or(EditorError::NoImageLoaded)?;

        let sample = self
            .engine
            .stamp(&mut doc.buffer, &self.brush, source, drag_start, point);
        push_dirty(&sample, events);
        Ok(())
    }

    /// Finish whatever the primary button was doing
    ///
    /// A stroke is sealed into its history entry; partial strokes are kept.
    pub(crate) fn end_interaction(&mut self, events: &mut Vec<EditorToUi>) {
        match self.state {
            ControllerState::Idle => {}
            ControllerState::Panning { .. } => {
                debug!("Pan end");
            }
            ControllerState::Drawing => {
                if let Some(doc) = self.document.as_mut() {
                    let snapshot = doc.buffer.snapshot();
                    doc.history.commit(snapshot);
                    events.push(doc.history_changed());
                }
                debug!("Stroke end");
            }
        }
        self.state = ControllerState::Idle;
    }
}

fn push_dirty(sample: &StampSample, events: &mut Vec<EditorToUi>) {
    if let Some((x, y, width, height)) = sample.region {
        events.push(EditorToUi::CanvasDirty { x, y, width, height });
    }
}
