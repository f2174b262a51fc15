//! Grid positions and rectangles
//!
//! Rectangles are half-open: a `Rect` covers the cells `x0..x1` by `y0..y1`.
//! The extent of a rectangle on an axis is simply `x1 - x0`.

use serde::{Deserialize, Serialize};

/// A cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this position by another
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An axis-aligned rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left x coordinate (inclusive)
    pub x0: i32,
    /// Top y coordinate (inclusive)
    pub y0: i32,
    /// Right x coordinate (exclusive)
    pub x1: i32,
    /// Bottom y coordinate (exclusive)
    pub y1: i32,
}

impl Rect {
    /// Create a rectangle from its corners
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from its top-left cell and size
    pub const fn with_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + height,
        }
    }

    /// Extent along x (0 for inverted rectangles)
    pub const fn width(&self) -> i32 {
        if self.x1 > self.x0 { self.x1 - self.x0 } else { 0 }
    }

    /// Extent along y (0 for inverted rectangles)
    pub const fn height(&self) -> i32 {
        if self.y1 > self.y0 { self.y1 - self.y0 } else { 0 }
    }

    /// Number of cells covered
    pub const fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub const fn top_left(&self) -> Pos {
        Pos::new(self.x0, self.y0)
    }

    pub const fn center(&self) -> Pos {
        Pos::new(
            self.x0 + self.width() / 2,
            self.y0 + self.height() / 2,
        )
    }

    /// Check if a cell is inside this rectangle
    pub const fn contains(&self, p: Pos) -> bool {
        p.x >= self.x0 && p.x < self.x1 && p.y >= self.y0 && p.y < self.y1
    }

    /// Check if this rectangle fully contains another
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        self.x0 <= other.x0 && self.x1 >= other.x1 && self.y0 <= other.y0 && self.y1 >= other.y1
    }

    /// Check if the two rectangles share at least one cell
    pub const fn intersects(&self, other: &Rect) -> bool {
        !(self.is_empty()
            || other.is_empty()
            || self.x1 <= other.x0
            || other.x1 <= self.x0
            || self.y1 <= other.y0
            || other.y1 <= self.y0)
    }

    /// Iterate over every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
        let Rect { x0, y0, x1, y1 } = *self;
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| Pos::new(x, y)))
    }
}

/// Overlap of the half-open ranges `a0..a1` and `b0..b1`
pub(crate) fn overlap(a0: i32, a1: i32, b0: i32, b1: i32) -> Option<(i32, i32)> {
    let lo = a0.max(b0);
    let hi = a1.min(b1);
    (lo < hi).then_some((lo, hi))
}
