//! Points and rectangles in image space and screen space.

use serde::{Deserialize, Serialize};

use crate::consts::MIN_BOX_EXTENT;

/// A 2D point. Whether it lives in image or screen space is up to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn delta_from(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Axis-aligned rectangle in screen units (top-left plus size).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `center`.
    pub fn centered(center: Point, size: f32) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Bounding box in image-pixel space. Origin is the top-left of the
/// original, unscaled image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// `x1 < x2`, `y1 < y2`, and both extents at least [`MIN_BOX_EXTENT`].
    pub fn is_well_formed(&self) -> bool {
        self.x1 < self.x2
            && self.y1 < self.y2
            && self.width() >= MIN_BOX_EXTENT
            && self.height() >= MIN_BOX_EXTENT
    }

    /// Round every coordinate to the nearest whole pixel.
    pub fn rounded(&self) -> Self {
        Self::new(
            self.x1.round(),
            self.y1.round(),
            self.x2.round(),
            self.y2.round(),
        )
    }
}
