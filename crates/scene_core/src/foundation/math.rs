//! Math utilities and types
//!
//! Integer rectangles for spatial bookkeeping plus the nalgebra vector
//! aliases used to describe positions and offsets.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Point2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Integer 2D offset
pub type Offset = Vector2<i32>;

/// Axis-aligned integer rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// Left edge
    pub x: i32,

    /// Top edge
    pub y: i32,

    /// Width in pixels
    pub width: i32,

    /// Height in pixels
    pub height: i32,
}

impl Rectangle {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Left edge (inclusive)
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Top edge (inclusive)
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner
    pub fn location(&self) -> Point2<i32> {
        Point2::new(self.x, self.y)
    }

    /// Center point in floating point coordinates
    #[allow(clippy::cast_precision_loss)]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 * 0.5,
            self.y as f32 + self.height as f32 * 0.5,
        )
    }

    /// True when the rectangle has zero or negative area
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check that `other` lies entirely inside this rectangle (edges may touch)
    pub const fn contains(&self, other: &Rectangle) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    /// Check whether a point lies inside this rectangle
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }

    /// Check whether the two rectangles overlap with non-zero area
    pub const fn intersects(&self, other: &Rectangle) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// Check whether the two rectangles overlap or share an edge or corner
    pub const fn touches(&self, other: &Rectangle) -> bool {
        other.left() <= self.right()
            && self.left() <= other.right()
            && other.top() <= self.bottom()
            && self.top() <= other.bottom()
    }

    /// Return a copy moved by `offset`
    pub fn translated(&self, offset: Offset) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Move this rectangle in place by `offset`
    pub fn offset(&mut self, offset: Offset) {
        self.x += offset.x;
        self.y += offset.y;
    }

    /// Split into four quadrants (top-left, top-right, bottom-left, bottom-right).
    ///
    /// Halves are floor-divided; an odd width or height leaves a one pixel
    /// strip along the trailing edge that belongs to no quadrant.
    pub const fn quadrants(&self) -> [Rectangle; 4] {
        let half_w = self.width / 2;
        let half_h = self.height / 2;
        let mid_x = self.x + half_w;
        let mid_y = self.y + half_h;

        [
            Rectangle::new(self.x, self.y, half_w, half_h),
            Rectangle::new(mid_x, self.y, half_w, half_h),
            Rectangle::new(self.x, mid_y, half_w, half_h),
            Rectangle::new(mid_x, mid_y, half_w, half_h),
        ]
    }
}
