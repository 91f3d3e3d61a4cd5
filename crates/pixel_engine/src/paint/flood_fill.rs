//! Scanline flood fill
//!
//! Repaints every pixel 4-connected to a seed point that currently equals
//! the seed's original color. Whole vertical runs are processed per stack
//! entry instead of one pixel at a time, so the work stack stays small even
//! for large regions.

use crate::{Color, CompositingMode, LockedPixels, Position, Result};

/// Flood fill starting at `seed`.
///
/// The replacement color is computed once: `composite(target, color)` where
/// `target` is the seed's current color. Every painted pixel is reported
/// through `on_pixel(pos, old, new)` exactly once. Returns the number of
/// pixels painted; zero when the no-op guard triggers.
///
/// # Errors
///
/// Returns `OutOfBounds` if the seed lies outside the buffer. Callers in
/// drawing paths are expected to bounds-check the seed and treat that case
/// as a no-op rather than a user-visible error.
pub fn flood_fill<F>(pixels: &mut LockedPixels<'_>, seed: Position, color: Color, mode: CompositingMode, mut on_pixel: F) -> Result<usize>
where
    F: FnMut(Position, Color, Color),
{
    let target = pixels.pixel_at(seed)?;
    let new_color = mode.composite(target, color);

    // No-op guard: identical overwrites would never terminate the span walk
    // and carry no visible change.
    if target == new_color {
        return Ok(0);
    }
    if color == target && (mode == CompositingMode::Replace || target.is_opaque()) {
        return Ok(0);
    }

    let width = pixels.width();
    let height = pixels.height();
    let mut painted = 0usize;
    let mut stack: Vec<Position> = vec![seed];

    while let Some(pos) = stack.pop() {
        let x = pos.x;

        // Walk upward to the topmost matching row of this column run
        let mut y = pos.y;
        while y > 0 && pixels.pixel_at(Position::new(x, y - 1))? == target {
            y -= 1;
        }

        // Walk downward, painting and opening spans to the sides
        let mut span_left = false;
        let mut span_right = false;
        while y < height && pixels.pixel_at(Position::new(x, y))? == target {
            let p = Position::new(x, y);
            pixels.set_pixel(p, new_color)?;
            on_pixel(p, target, new_color);
            painted += 1;

            if x > 0 {
                let matches = pixels.pixel_at(Position::new(x - 1, y))? == target;
                if matches && !span_left {
                    stack.push(Position::new(x - 1, y));
                    span_left = true;
                } else if !matches && span_left {
                    span_left = false;
                }
            }
            if x < width - 1 {
                let matches = pixels.pixel_at(Position::new(x + 1, y))? == target;
                if matches && !span_right {
                    stack.push(Position::new(x + 1, y));
                    span_right = true;
                } else if !matches && span_right {
                    span_right = false;
                }
            }

            y += 1;
        }
    }

    Ok(painted)
}
