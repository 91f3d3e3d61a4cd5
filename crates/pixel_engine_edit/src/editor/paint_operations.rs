//! Paint operations on the edit state
//!
//! Each operation opens a fresh [`PixelJournal`], runs the corresponding
//! `pixel_engine::paint` algorithm with the journal as the per-pixel sink,
//! then commits the sealed journal to the undo stack. Operations return the
//! number of pixels they painted; zero means nothing was committed.

use crate::{paint, Color, CompositingMode, Position, Result};

use super::{EditOp, EditState, PixelJournal};

impl EditState {
    /// Seal a journal and push it onto the undo stack.
    ///
    /// Journals without entries are dropped - a stroke that changed nothing
    /// leaves no undo step behind.
    pub fn commit_journal(&mut self, mut journal: PixelJournal) -> Result<()> {
        if journal.is_empty() {
            return Ok(());
        }
        journal.pack();
        self.get_undo_stack().lock().unwrap().clear_redo();
        self.push_plain_undo(EditOp::Paint { journal });
        Ok(())
    }

    /// Flood fill starting at `seed`.
    ///
    /// An out-of-bounds seed is a no-op, not an error (pointer events may
    /// legitimately land outside the frame).
    pub fn flood_fill(&mut self, seed: Position, color: Color, mode: CompositingMode) -> Result<usize> {
        if !self.get_buffer().contains(seed) {
            return Ok(0);
        }

        let mut journal = PixelJournal::new("Bucket fill");
        let painted = {
            let mut pixels = self.get_buffer_mut().lock();
            paint::flood_fill(&mut pixels, seed, color, mode, |pos, old, new| {
                // The fill guarantees the precondition itself
                let _ = journal.register_unchecked_pixel(pos, old, new);
            })?
        };

        self.commit_journal(journal)?;
        Ok(painted)
    }

    /// Draw a line between two points, clipping silently at the frame edges
    pub fn draw_line(&mut self, from: Position, to: Position, color: Color, mode: CompositingMode) -> Result<usize> {
        let mut journal = PixelJournal::new("Line");
        let painted = {
            let mut pixels = self.get_buffer_mut().lock();
            paint::draw_line(&mut pixels, from, to, color, mode, |pos, old, new| {
                let _ = journal.register_pixel(pos, old, new);
            })?
        };

        self.commit_journal(journal)?;
        Ok(painted)
    }

    /// Draw a rectangle spanned by two corners
    pub fn draw_rectangle(&mut self, p0: Position, p1: Position, filled: bool, color: Color, mode: CompositingMode) -> Result<usize> {
        let description = if filled { "Filled rectangle" } else { "Rectangle" };
        self.draw_shape(description, paint::rectangle_points(p0, p1, filled), color, mode)
    }

    /// Draw an ellipse inscribed in the bounding box spanned by two corners
    pub fn draw_ellipse(&mut self, p0: Position, p1: Position, filled: bool, color: Color, mode: CompositingMode) -> Result<usize> {
        let description = if filled { "Filled ellipse" } else { "Ellipse" };
        let points = if filled {
            paint::filled_ellipse_points(p0, p1)
        } else {
            paint::ellipse_points(p0, p1)
        };
        self.draw_shape(description, points, color, mode)
    }

    fn draw_shape(&mut self, description: &str, points: Vec<Position>, color: Color, mode: CompositingMode) -> Result<usize> {
        let mut journal = PixelJournal::new(description);
        let painted = {
            let mut pixels = self.get_buffer_mut().lock();
            paint::draw_points(&mut pixels, points, color, mode, |pos, old, new| {
                let _ = journal.register_pixel(pos, old, new);
            })?
        };

        self.commit_journal(journal)?;
        Ok(painted)
    }

    /// Render a shape preview into the tool overlay, replacing the previous
    /// preview. The buffer itself is untouched; each overlay pixel shows the
    /// color the commit would produce.
    pub fn render_overlay_points(&mut self, points: impl IntoIterator<Item = Position>, color: Color, mode: CompositingMode) {
        self.clear_overlay();
        for pos in points {
            if let Ok(old) = self.get_buffer().pixel_at(pos) {
                let preview = mode.composite(old, color);
                self.get_tool_overlay_mut().set(pos, preview);
            }
        }
    }

    pub fn clear_overlay(&mut self) {
        self.get_tool_overlay_mut().clear();
    }
}
