//! Undo and revert-to-original for the editing session

use retouch_ipc::EditorToUi;
use retouch_painting::UndoOutcome;
use tracing::info;

use super::EditorSession;
use crate::error::EditorError;

impl EditorSession {
    /// Step back one history entry
    ///
    /// At the first entry this discards every edit instead, exactly like
    /// [`EditorSession::reset`].
    pub(crate) fn undo(&mut self, events: &mut Vec<EditorToUi>) -> Result<(), EditorError> {
        self.require_image()?;
        self.end_interaction(events);

        let doc = self.document_mut()?;
        let reverted = match doc.history.undo() {
            Some(outcome) => {
                doc.buffer.restore(outcome.snapshot())?;
                matches!(outcome, UndoOutcome::RevertedToOriginal(_))
            }
            None => return Ok(()),
        };
        events.push(doc.history_changed());
        events.push(doc.full_dirty());

        if reverted {
            self.clear_source(events);
        }
        events.push(EditorToUi::OverlayChanged);
        Ok(())
    }

    /// Restore the loaded image and drop all history after it
    pub(crate) fn reset(&mut self, events: &mut Vec<EditorToUi>) -> Result<(), EditorError> {
        self.require_image()?;
        self.end_interaction(events);

        let doc = self.document_mut()?;
        if let Some(original) = doc.history.revert_to_original() {
            doc.buffer.restore(original)?;
        }
        info!("Session: reverted to original");
        events.push(doc.history_changed());
        events.push(doc.full_dirty());

        self.clear_source(events);
        events.push(EditorToUi::OverlayChanged);
        Ok(())
    }

    fn clear_source(&mut self, events: &mut Vec<EditorToUi>) {
        if self.clone_state.source.take().is_some() {
            events.push(EditorToUi::SourceCleared);
        }
    }
}
