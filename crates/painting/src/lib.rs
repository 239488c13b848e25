//! Retouch painting core - raster buffer, clone stamp and undo history
//!
//! This crate provides the leaf algorithms of the clone stamp editor:
//! - [`coords`] - Typed image/screen/workspace coordinate spaces
//! - [`surface`] - CPU RGBA8 raster buffer with out-of-bounds-safe regions
//! - [`brush`] - Brush settings and the soft circular mask
//! - [`stamp`] - Clone stamp sampling, masking and compositing
//! - [`history`] - Bounded snapshot history with undo/revert
//! - [`codec`] - Image decode/encode boundary

pub mod brush;
pub mod codec;
pub mod constants;
pub mod coords;
pub mod error;
pub mod history;
pub mod stamp;
pub mod surface;

pub use brush::*;
pub use codec::*;
pub use constants::*;
pub use coords::*;
pub use error::*;
pub use history::*;
pub use stamp::*;
pub use surface::*;
