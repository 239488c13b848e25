//! Retouch editor - the clone stamp editing session
//!
//! This crate owns everything that sits between classified host input and
//! the raster algorithms in `retouch-painting`:
//! - [`viewport`] - zoom/pan state and screen <-> image mapping
//! - [`overlay`] - geometry for the brush cursor and source marker
//! - [`session`] - the document session and its input state machine
//!
//! Hosts feed [`UiToEditor`](retouch_ipc::UiToEditor) messages into
//! [`EditorSession::dispatch`] and render the returned
//! [`EditorToUi`](retouch_ipc::EditorToUi) messages.

pub mod error;
pub mod overlay;
pub mod session;
pub mod viewport;

pub use error::EditorError;
pub use overlay::{BrushOutline, OverlayGeometry, SourceLabel, SourceMarker};
pub use session::{ControllerState, EditorSession};
pub use viewport::{RenderedRect, ViewState, ViewportTransform};
