//! Per-pixel undo journal
//!
//! Every drawing tool records each pixel mutation into a [`PixelJournal`]
//! while a stroke is in progress. When the stroke ends, the journal is
//! packed (sealed) and handed to the undo stack; replaying it in reverse
//! restores the exact pre-stroke state, pixel for pixel, independent of
//! whatever tool produced it.

use serde::{Deserialize, Serialize};

use crate::{Color, EngineError, LockedPixels, Position, Rectangle, Result};

/// A single recorded pixel mutation
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelChange {
    pub pos: Position,
    pub old: Color,
    pub new: Color,
    /// Whether replay must verify the buffer's current pixel against the
    /// expected prior color before writing. A mismatch is a soft
    /// divergence: the write is forced anyway and a diagnostic is logged.
    pub checked: bool,
}

/// Append-only log of pixel mutations for one discrete user action.
///
/// Created when a stroke begins, sealed with [`pack`](Self::pack) when it
/// ends. Registering after packing is a programmer error
/// (`JournalSealed`). The journal holds no reference to the buffer it was
/// recorded against; replay targets whatever buffer the caller locks.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PixelJournal {
    description: String,
    entries: Vec<PixelChange>,
    packed: bool,
}

impl PixelJournal {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            entries: Vec::new(),
            packed: false,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_packed(&self) -> bool {
        self.packed
    }

    pub fn entries(&self) -> &[PixelChange] {
        &self.entries
    }

    /// Record a checked pixel mutation. `old` must be the color before the
    /// write and `new` the color immediately after.
    ///
    /// # Errors
    ///
    /// Returns `JournalSealed` if called after [`pack`](Self::pack).
    pub fn register_pixel(&mut self, pos: Position, old: Color, new: Color) -> Result<()> {
        self.register(PixelChange { pos, old, new, checked: true })
    }

    /// Record an unchecked pixel mutation - for callers like the flood
    /// fill that already guarantee the replay precondition.
    ///
    /// # Errors
    ///
    /// Returns `JournalSealed` if called after [`pack`](Self::pack).
    pub fn register_unchecked_pixel(&mut self, pos: Position, old: Color, new: Color) -> Result<()> {
        self.register(PixelChange { pos, old, new, checked: false })
    }

    fn register(&mut self, change: PixelChange) -> Result<()> {
        if self.packed {
            return Err(EngineError::JournalSealed);
        }
        self.entries.push(change);
        Ok(())
    }

    /// Seal the journal and compact its storage. Idempotent.
    pub fn pack(&mut self) {
        self.entries.shrink_to_fit();
        self.packed = true;
    }

    /// Bounding rectangle of all touched pixels, for damage reporting
    pub fn bounds(&self) -> Option<Rectangle> {
        let mut iter = self.entries.iter();
        let first = iter.next()?;
        let mut rect = Rectangle::from_point(first.pos);
        for entry in iter {
            rect.expand_to(entry.pos);
        }
        Some(rect)
    }

    /// Replay all entries in reverse order, writing each old color.
    ///
    /// Returns the number of divergences encountered: checked entries whose
    /// current pixel did not match the expected post-stroke color, and
    /// entries outside the buffer. Divergent writes are still forced where
    /// possible; each one is logged.
    pub fn undo_into(&self, pixels: &mut LockedPixels<'_>) -> usize {
        let mut divergences = 0;
        for entry in self.entries.iter().rev() {
            divergences += replay_entry(pixels, entry.pos, entry.new, entry.old, entry.checked, "undo");
        }
        divergences
    }

    /// Replay all entries in forward order, writing each new color.
    ///
    /// Divergence semantics as in [`undo_into`](Self::undo_into), checked
    /// against the expected pre-stroke color.
    pub fn redo_into(&self, pixels: &mut LockedPixels<'_>) -> usize {
        let mut divergences = 0;
        for entry in &self.entries {
            divergences += replay_entry(pixels, entry.pos, entry.old, entry.new, entry.checked, "redo");
        }
        divergences
    }

    /// Release the retained entry storage. Idempotent.
    pub fn clear(&mut self) {
        self.entries = Vec::new();
    }
}

fn replay_entry(pixels: &mut LockedPixels<'_>, pos: Position, expected: Color, write: Color, checked: bool, direction: &str) -> usize {
    match pixels.pixel_at(pos) {
        Ok(current) => {
            let diverged = checked && current != expected;
            if diverged {
                log::warn!("{direction} divergence at {pos}: expected {expected}, found {current}; forcing write");
            }
            // In bounds, cannot fail
            let _ = pixels.set_pixel(pos, write);
            usize::from(diverged)
        }
        Err(_) => {
            log::warn!("{direction} entry at {pos} lies outside the {} buffer", pixels.size());
            1
        }
    }
}
