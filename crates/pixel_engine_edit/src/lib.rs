//! Editing layer for pixel sprite frames
//!
//! Sits on top of `pixel_engine` and provides everything a frame editor
//! needs between the raw pixel algorithms and the UI:
//! - [`EditState`] - the editing session for one frame (buffer, preview
//!   overlay, undo stack, modified tracking)
//! - [`PixelJournal`] - the per-pixel undo journal every paint stroke
//!   records into
//! - [`EditOp`] / [`UndoStack`] - serializable undo operations with atomic
//!   grouping
//! - [`tools`] - the paint tool state machines (pencil, eraser, spray,
//!   line, rectangle, ellipse, flood fill)
//!
//! The UI layer delivers pointer events in buffer coordinates, renders the
//! buffer and the preview overlay, and repaints whatever
//! `take_damage()` reports. Nothing in this crate draws to a screen.

mod editor;
pub use editor::*;

mod overlay;
pub use overlay::PreviewOverlay;

pub mod tools;

// Re-export the engine types this crate's API surfaces
pub use pixel_engine::{
    alpha_blend, paint, Color, CompositingMode, EngineError, LockedPixels, PixelBuffer, Position, Rectangle, Result, Size,
};
