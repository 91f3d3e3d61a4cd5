//! Pixel-level model for sprite frame editing
//!
//! This crate contains the GUI-independent substrate every paint tool
//! operates on:
//! - ARGB [`Color`] with exact component-wise equality
//! - [`PixelBuffer`] with bounds-checked access and a scoped lock guard
//! - [`CompositingMode`] (replace / alpha "over") with deterministic
//!   integer rounding
//! - the [`paint`] module: line, rectangle, ellipse and brush point
//!   generation plus the scanline flood fill
//!
//! Editing-session concerns (undo journal, tools, overlays) live in the
//! `pixel_engine_edit` crate.

mod error;
pub use error::{EngineError, Result};

mod position;
pub use position::{Position, Size};

mod rect;
pub use rect::Rectangle;

mod color;
pub use color::Color;

mod compositing;
pub use compositing::{alpha_blend, CompositingMode};

mod pixel_buffer;
pub use pixel_buffer::{LockedPixels, PixelBuffer};

pub mod paint;
