//! Tool preview overlay
//!
//! Shape tools (line, rectangle, ellipse) must not mutate the pixel buffer
//! until the gesture commits. While dragging they render into this overlay
//! instead; the UI composes it over the frame when painting the screen. A
//! cancelled gesture just clears the overlay - no journal entries, no
//! buffer writes.

use crate::{Color, Position, Size};

#[derive(Default, Clone, PartialEq)]
pub struct PreviewOverlay {
    size: Size,
    lines: Vec<Vec<Option<Color>>>,
}

impl PreviewOverlay {
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize to match a buffer; drops any current preview
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.lines.clear();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.iter().all(Option::is_none))
    }

    pub fn color_at(&self, pos: impl Into<Position>) -> Option<Color> {
        let pos = pos.into();
        if !self.in_bounds(pos) {
            return None;
        }

        self.lines.get(pos.y as usize)?.get(pos.x as usize).copied().flatten()
    }

    pub fn set(&mut self, pos: impl Into<Position>, color: Color) {
        let pos = pos.into();
        if !self.in_bounds(pos) {
            return;
        }

        if self.lines.len() <= pos.y as usize {
            self.lines.resize(pos.y as usize + 1, Vec::new());
        }

        let line = &mut self.lines[pos.y as usize];
        if line.len() <= pos.x as usize {
            line.resize(pos.x as usize + 1, None);
        }
        line[pos.x as usize] = Some(color);
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.size.width && pos.y >= 0 && pos.y < self.size.height
    }
}
