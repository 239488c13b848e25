//! Message protocol for the retouch editor
//!
//! Defines the classified input vocabulary the host delivers to the editor
//! session and the messages the session sends back to the UI layer.

mod commands;
mod error;
mod input;
mod messages;

pub use commands::*;
pub use error::*;
pub use input::*;
pub use messages::*;
