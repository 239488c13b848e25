//! Error types for the editing session

use retouch_painting::{CodecError, SurfaceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Clone source not set")]
    SourceNotSet,

    #[error("Surface invariant violated: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Image codec error: {0}")]
    Codec(#[from] CodecError),
}

impl EditorError {
    /// Recoverable errors refuse the action and leave all state untouched.
    /// Surface errors mean the document and its history disagree.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EditorError::Surface(_))
    }
}
