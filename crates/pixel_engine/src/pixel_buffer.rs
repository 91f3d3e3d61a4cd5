//! Frame pixel storage
//!
//! [`PixelBuffer`] owns a contiguous row-major ARGB pixel store for a single
//! frame. Every read and write is validated against the buffer bounds;
//! out-of-bounds access is rejected, never wrapped.
//!
//! Tool operations acquire the buffer through [`PixelBuffer::lock`], which
//! returns a scoped [`LockedPixels`] guard. The guard is the only write
//! path tools use: it keeps exclusive access for the duration of the
//! operation, accumulates the bounding rectangle of all writes and
//! publishes it into the buffer's damage region when dropped - on every
//! exit path, early returns and panics included. The damage region is what
//! the surrounding UI reads to know which screen area to repaint; this
//! crate never renders anything itself.

use crate::{Color, EngineError, Position, Rectangle, Result, Size};

#[derive(Clone)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    data: Vec<Color>,
    damage: Option<Rectangle>,
}

impl PixelBuffer {
    /// Create a buffer filled with transparent black.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for non-positive dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Create a buffer filled with the given color.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for non-positive dimensions.
    pub fn filled(width: i32, height: i32, color: Color) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(EngineError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![color; (width as usize) * (height as usize)],
            damage: None,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn rectangle(&self) -> Rectangle {
        Rectangle::from_size(self.size())
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.y as usize) * (self.width as usize) + pos.x as usize)
        } else {
            None
        }
    }

    /// Read the pixel at `pos`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the buffer.
    pub fn pixel_at(&self, pos: Position) -> Result<Color> {
        self.index(pos)
            .map(|idx| self.data[idx])
            .ok_or_else(|| EngineError::out_of_bounds(pos, self.size()))
    }

    /// Overwrite the pixel at `pos` unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the buffer.
    pub fn set_pixel(&mut self, pos: Position, color: Color) -> Result<()> {
        let idx = self.index(pos).ok_or_else(|| EngineError::out_of_bounds(pos, self.size()))?;
        self.data[idx] = color;
        self.add_damage(pos);
        Ok(())
    }

    /// Raw pixel data in row-major order (for rendering collaborators)
    pub fn data(&self) -> &[Color] {
        &self.data
    }

    /// Acquire exclusive read/write access for a tool operation
    pub fn lock(&mut self) -> LockedPixels<'_> {
        LockedPixels { buffer: self, damage: None }
    }

    /// Take the accumulated invalidate rectangle, leaving it empty
    pub fn take_damage(&mut self) -> Option<Rectangle> {
        self.damage.take()
    }

    fn add_damage(&mut self, pos: Position) {
        match &mut self.damage {
            Some(rect) => rect.expand_to(pos),
            None => self.damage = Some(Rectangle::from_point(pos)),
        }
    }

    fn merge_damage(&mut self, rect: Rectangle) {
        self.damage = Some(match self.damage {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }
}

/// Scoped exclusive access to a [`PixelBuffer`].
///
/// Writes are tracked and merged into the buffer's damage region when the
/// guard is dropped.
pub struct LockedPixels<'a> {
    buffer: &'a mut PixelBuffer,
    damage: Option<Rectangle>,
}

impl LockedPixels<'_> {
    pub fn width(&self) -> i32 {
        self.buffer.width
    }

    pub fn height(&self) -> i32 {
        self.buffer.height
    }

    pub fn size(&self) -> Size {
        self.buffer.size()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.buffer.contains(pos)
    }

    /// Read the pixel at `pos`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the buffer.
    pub fn pixel_at(&self, pos: Position) -> Result<Color> {
        self.buffer
            .index(pos)
            .map(|idx| self.buffer.data[idx])
            .ok_or_else(|| EngineError::out_of_bounds(pos, self.buffer.size()))
    }

    /// Overwrite the pixel at `pos` unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the buffer.
    pub fn set_pixel(&mut self, pos: Position, color: Color) -> Result<()> {
        let idx = self
            .buffer
            .index(pos)
            .ok_or_else(|| EngineError::out_of_bounds(pos, self.buffer.size()))?;
        self.buffer.data[idx] = color;
        match &mut self.damage {
            Some(rect) => rect.expand_to(pos),
            None => self.damage = Some(Rectangle::from_point(pos)),
        }
        Ok(())
    }
}

impl Drop for LockedPixels<'_> {
    fn drop(&mut self) {
        if let Some(rect) = self.damage.take() {
            self.buffer.merge_damage(rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_buffer_is_transparent() {
        let buffer = PixelBuffer::new(4, 3).unwrap();
        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.height(), 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(buffer.pixel_at(Position::new(x, y)).unwrap(), Color::TRANSPARENT);
            }
        }
    }

    #[test]
    fn test_invalid_size_rejected() {
        assert!(PixelBuffer::new(0, 5).is_err());
        assert!(PixelBuffer::new(5, -1).is_err());
    }

    #[test]
    fn test_out_of_bounds_is_rejected_not_wrapped() {
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        for pos in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(4, 0),
            Position::new(0, 4),
        ] {
            assert!(buffer.pixel_at(pos).is_err(), "read at {pos} must fail");
            assert!(buffer.set_pixel(pos, Color::rgb(1, 2, 3)).is_err(), "write at {pos} must fail");
        }
        // A wrapped write at (4, 0) would have landed on (0, 1)
        assert_eq!(buffer.pixel_at(Position::new(0, 1)).unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        let color = Color::argb(200, 1, 2, 3);
        buffer.set_pixel(Position::new(2, 3), color).unwrap();
        assert_eq!(buffer.pixel_at(Position::new(2, 3)).unwrap(), color);
    }

    #[test]
    fn test_lock_publishes_damage_on_drop() {
        let mut buffer = PixelBuffer::new(8, 8).unwrap();
        {
            let mut pixels = buffer.lock();
            pixels.set_pixel(Position::new(1, 2), Color::rgb(255, 0, 0)).unwrap();
            pixels.set_pixel(Position::new(5, 6), Color::rgb(0, 255, 0)).unwrap();
        }
        let damage = buffer.take_damage().unwrap();
        assert_eq!(damage, Rectangle::from_corners(Position::new(1, 2), Position::new(5, 6)));
        // Taking damage drains it
        assert!(buffer.take_damage().is_none());
    }

    #[test]
    fn test_lock_without_writes_leaves_no_damage() {
        let mut buffer = PixelBuffer::new(8, 8).unwrap();
        {
            let pixels = buffer.lock();
            let _ = pixels.pixel_at(Position::new(0, 0));
        }
        assert!(buffer.take_damage().is_none());
    }
}
