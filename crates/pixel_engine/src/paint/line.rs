//! Line drawing algorithms
//!
//! Implements Bresenham's line algorithm for drawing lines between two
//! points. The steep case is normalized by swapping X/Y and the endpoints
//! are swapped so iteration always proceeds with increasing primary axis;
//! the set of touched pixels is therefore identical for (A,B) and (B,A),
//! which the undo journal relies on for determinism.

use crate::{Color, CompositingMode, LockedPixels, Position, Result};

use super::draw_points;

/// Generate all points on a line from p0 to p1 using Bresenham's algorithm
pub fn line_points(p0: Position, p1: Position) -> Vec<Position> {
    let steep = (p1.y - p0.y).abs() > (p1.x - p0.x).abs();

    // Normalize: iterate along x with the shallow slope
    let (a0, a1) = if steep {
        (Position::new(p0.y, p0.x), Position::new(p1.y, p1.x))
    } else {
        (p0, p1)
    };
    let (start, end) = if a0.x > a1.x { (a1, a0) } else { (a0, a1) };

    let dx = end.x - start.x;
    let dy = (end.y - start.y).abs();
    let y_step = if start.y < end.y { 1 } else { -1 };

    let mut err = dx / 2;
    let mut y = start.y;
    let mut points = Vec::with_capacity(dx as usize + 1);

    for x in start.x..=end.x {
        points.push(if steep { Position::new(y, x) } else { Position::new(x, y) });
        err -= dy;
        if err < 0 {
            y += y_step;
            err += dx;
        }
    }

    points
}

/// Draw a line from p0 to p1, compositing per pixel.
///
/// Pixels outside the buffer along the path are skipped without error.
/// Returns the number of pixels written.
///
/// # Errors
///
/// See [`draw_points`].
pub fn draw_line<F>(pixels: &mut LockedPixels<'_>, p0: Position, p1: Position, color: Color, mode: CompositingMode, on_pixel: F) -> Result<usize>
where
    F: FnMut(Position, Color, Color),
{
    draw_points(pixels, line_points(p0, p1), color, mode, on_pixel)
}
