//! Axis-aligned rectangle collision
//!
//! Everything in Pipe Dash collides as an AABB: the bird's inset body rect
//! against each pipe's two inset barrier rects.

/// An axis-aligned rectangle, y growing downward (screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Check whether two rectangles overlap
///
/// Standard separating-axis test on both axes. Touching edges do not count
/// as an overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
