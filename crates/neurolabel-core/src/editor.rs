//! Turning a drag or resize gesture into a new image-space box.
//!
//! A gesture is modelled as the pointer delta applied to the box captured
//! when the gesture began. The grabbed point is held in image space, so a
//! zoom in the middle of a gesture keeps it under the pointer. The shape's on-screen placement is derived from
//! that delta as a [`ShapeTransform`] (position, unscaled size and the scale
//! factors a resize grip accumulates), and only the end-of-gesture transform
//! is validated and committed.

use tracing::debug;

use crate::consts::MIN_SCREEN_EXTENT;
use crate::detection::DetectionId;
use crate::geometry::{BoundingBox, Point, ScreenRect};
use crate::selection::HandleRole;
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// Drag of the shape body.
    Move,
    /// Drag of one of the selected shape's grips.
    Resize(HandleRole),
}

/// Placement of a shape on screen during a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeTransform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl ShapeTransform {
    pub fn from_rect(rect: &ScreenRect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Effective on-screen size, `(width * scale_x, height * scale_y)`.
    pub fn extent(&self) -> (f32, f32) {
        (self.width * self.scale_x, self.height * self.scale_y)
    }

    /// Fold the scale factors into the size so later gestures compose
    /// linearly.
    pub fn fold(&self) -> Self {
        let (width, height) = self.extent();
        Self {
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            ..*self
        }
    }

    /// Normalized screen rect, used to preview the gesture.
    pub fn to_rect(&self) -> ScreenRect {
        let (w, h) = self.extent();
        let (x1, x2) = (self.x.min(self.x + w), self.x.max(self.x + w));
        let (y1, y2) = (self.y.min(self.y + h), self.y.max(self.y + h));
        ScreenRect::new(x1, y1, x2 - x1, y2 - y1)
    }
}

/// An in-flight manipulation of one detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    pub id: DetectionId,
    pub kind: GestureKind,
    /// Box before the gesture began; restored if the result is rejected.
    pub origin: BoundingBox,
    /// Pointer position at gesture start, screen space.
    pub start: Point,
    /// Image-space point under the pointer at gesture start.
    pub anchor: Point,
    /// Latest pointer position, screen space.
    pub current: Point,
}

impl Gesture {
    pub fn new(
        id: DetectionId,
        kind: GestureKind,
        origin: BoundingBox,
        start: Point,
        viewport: &Viewport,
    ) -> Self {
        Self {
            id,
            kind,
            origin,
            start,
            anchor: viewport.screen_to_image(start),
            current: start,
        }
    }

    pub fn update(&mut self, pointer: Point) {
        self.current = pointer;
    }

    pub fn has_moved(&self) -> bool {
        !self.current.delta_from(self.start).is_zero()
    }

    /// Shape placement for the latest pointer position.
    pub fn transform(&self, viewport: &Viewport) -> ShapeTransform {
        self.transform_at(self.current, viewport)
    }

    /// Shape placement if the pointer were at `pointer`.
    pub fn transform_at(&self, pointer: Point, viewport: &Viewport) -> ShapeTransform {
        let rect = viewport.box_to_screen(&self.origin);
        let d = pointer.delta_from(viewport.image_to_screen(self.anchor));
        let mut t = ShapeTransform::from_rect(&rect);

        match self.kind {
            GestureKind::Move => {
                t.x += d.x;
                t.y += d.y;
            }
            GestureKind::Resize(role) => {
                if role.moves_left_edge() {
                    t.x += d.x;
                    t.scale_x = scale_for(rect.width, -d.x);
                } else if role.moves_right_edge() {
                    t.scale_x = scale_for(rect.width, d.x);
                }
                if role.moves_top_edge() {
                    t.y += d.y;
                    t.scale_y = scale_for(rect.height, -d.y);
                } else if role.moves_bottom_edge() {
                    t.scale_y = scale_for(rect.height, d.y);
                }
            }
        }
        t
    }
}

fn scale_for(extent: f32, growth: f32) -> f32 {
    if extent > 0.0 {
        (extent + growth) / extent
    } else {
        1.0
    }
}

/// Result of ending a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditOutcome {
    Committed(BoundingBox),
    /// The prior box stays in place.
    Rejected,
}

/// Validates end-of-gesture placements and maps them back to image space.
#[derive(Clone, Copy, Debug)]
pub struct BoxEditor {
    pub min_screen_extent: f32,
}

impl Default for BoxEditor {
    fn default() -> Self {
        Self {
            min_screen_extent: MIN_SCREEN_EXTENT,
        }
    }
}

impl BoxEditor {
    /// New image-space box for `transform`, or `Rejected` when the shape is
    /// smaller than the screen minimum or the resulting box is not
    /// well-formed. Flipped shapes have a negative extent and are rejected.
    pub fn commit(&self, transform: &ShapeTransform, viewport: &Viewport) -> EditOutcome {
        let (w, h) = transform.extent();
        if w < self.min_screen_extent || h < self.min_screen_extent {
            debug!(w, h, "Edit rejected: below minimum screen extent");
            return EditOutcome::Rejected;
        }

        let bbox = BoundingBox::new(
            viewport.screen_to_image_x(transform.x),
            viewport.screen_to_image_y(transform.y),
            viewport.screen_to_image_x(transform.x + w),
            viewport.screen_to_image_y(transform.y + h),
        );
        if !bbox.is_well_formed() {
            debug!(?bbox, "Edit rejected: box below minimum image extent");
            return EditOutcome::Rejected;
        }
        EditOutcome::Committed(bbox)
    }

    /// End `gesture` at its latest pointer position. The scale factors are
    /// folded into the size before the inverse mapping.
    pub fn finish(&self, gesture: &Gesture, viewport: &Viewport) -> EditOutcome {
        let transform = gesture.transform(viewport).fold();
        let outcome = self.commit(&transform, viewport);
        if let EditOutcome::Committed(bbox) = outcome {
            debug!(id = %gesture.id, ?bbox, "Gesture committed");
        }
        outcome
    }
}
