use serde::{Deserialize, Serialize};

use crate::{Position, Size};

/// Axis-aligned rectangle over pixel coordinates.
///
/// Both corners are inclusive; a rectangle covering a single pixel has
/// `min == max`. Used for damage ("invalidate") reporting and journal
/// bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: Position,
    pub max: Position,
}

impl Rectangle {
    /// Rectangle covering exactly one pixel
    pub fn from_point(pos: Position) -> Self {
        Rectangle { min: pos, max: pos }
    }

    /// Normalized rectangle from two arbitrary corners
    pub fn from_corners(p0: Position, p1: Position) -> Self {
        Rectangle {
            min: p0.min(p1),
            max: p0.max(p1),
        }
    }

    /// Rectangle covering a whole buffer of the given size
    pub fn from_size(size: Size) -> Self {
        Rectangle {
            min: Position::new(0, 0),
            max: Position::new(size.width - 1, size.height - 1),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    /// Smallest rectangle covering both rectangles
    pub fn union(self, other: Rectangle) -> Rectangle {
        Rectangle {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the rectangle to include `pos`
    pub fn expand_to(&mut self, pos: Position) {
        self.min = self.min.min(pos);
        self.max = self.max.max(pos);
    }
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} - {}]", self.min, self.max)
    }
}
