//! Pan/zoom transform between image space and screen space.
//!
//! `screen = image * scale + offset`, inverted as
//! `image = (screen - offset) / scale`. The scale always stays within
//! [`MIN_SCALE`, `MAX_SCALE`].

use tracing::debug;

use crate::consts::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};
use crate::geometry::{BoundingBox, Point, ScreenRect};

/// Direction of a single wheel step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
        }
    }
}

impl Viewport {
    pub fn image_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset.x,
            p.y * self.scale + self.offset.y,
        )
    }

    pub fn screen_to_image(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset.x) / self.scale,
            (p.y - self.offset.y) / self.scale,
        )
    }

    /// Inverse transform of a single horizontal screen coordinate.
    pub fn screen_to_image_x(&self, x: f32) -> f32 {
        (x - self.offset.x) / self.scale
    }

    /// Inverse transform of a single vertical screen coordinate.
    pub fn screen_to_image_y(&self, y: f32) -> f32 {
        (y - self.offset.y) / self.scale
    }

    pub fn box_to_screen(&self, b: &BoundingBox) -> ScreenRect {
        let top_left = self.image_to_screen(Point::new(b.x1, b.y1));
        ScreenRect::new(
            top_left.x,
            top_left.y,
            b.width() * self.scale,
            b.height() * self.scale,
        )
    }

    /// Screen rect covered by an image of the given natural size.
    pub fn image_rect(&self, image_size: [f32; 2]) -> ScreenRect {
        ScreenRect::new(
            self.offset.x,
            self.offset.y,
            image_size[0] * self.scale,
            image_size[1] * self.scale,
        )
    }

    /// Shift the view by a drag delta in screen pixels.
    pub fn pan(&mut self, delta: Point) {
        self.offset.x += delta.x;
        self.offset.y += delta.y;
    }

    /// Zoom one wheel step keeping the image point under `pointer` stationary.
    pub fn zoom_at(&mut self, pointer: Point, direction: ZoomDirection) {
        let anchor = self.screen_to_image(pointer);
        let candidate = match direction {
            ZoomDirection::Out => self.scale / ZOOM_STEP,
            ZoomDirection::In => self.scale * ZOOM_STEP,
        };
        let scale = candidate.clamp(MIN_SCALE, MAX_SCALE);

        self.offset = Point::new(pointer.x - anchor.x * scale, pointer.y - anchor.y * scale);
        self.scale = scale;
        debug!(scale = self.scale, ?direction, "Zoomed at pointer");
    }

    /// Back to identity (`scale = 1`, no offset).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scale the image to fit `panel` and center it.
    pub fn fit_to(&mut self, image_size: [f32; 2], panel: ScreenRect) {
        if image_size[0] <= 0.0 || image_size[1] <= 0.0 {
            return;
        }
        let fit_x = panel.width / image_size[0];
        let fit_y = panel.height / image_size[1];
        self.scale = fit_x.min(fit_y).clamp(MIN_SCALE, MAX_SCALE);
        self.offset = Point::new(
            panel.x + (panel.width - image_size[0] * self.scale) / 2.0,
            panel.y + (panel.height - image_size[1] * self.scale) / 2.0,
        );
    }
}
