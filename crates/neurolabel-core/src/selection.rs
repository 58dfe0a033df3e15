//! Single selection and the resize grips bound to it.

use std::fmt;

use tracing::debug;

use crate::consts::HANDLE_SIZE;
use crate::detection::DetectionId;
use crate::geometry::{Point, ScreenRect};
use crate::scene::ShapeView;

/// Which grip of the selected shape a handle is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleRole {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandleRole {
    pub const ALL: &[Self] = &[
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    /// Where this grip sits on `rect`.
    pub fn anchor(&self, rect: &ScreenRect) -> Point {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        match self {
            Self::TopLeft => Point::new(rect.x, rect.y),
            Self::Top => Point::new(cx, rect.y),
            Self::TopRight => Point::new(rect.right(), rect.y),
            Self::Right => Point::new(rect.right(), cy),
            Self::BottomRight => Point::new(rect.right(), rect.bottom()),
            Self::Bottom => Point::new(cx, rect.bottom()),
            Self::BottomLeft => Point::new(rect.x, rect.bottom()),
            Self::Left => Point::new(rect.x, cy),
        }
    }

    pub fn moves_left_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    pub fn moves_right_edge(&self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    pub fn moves_top_edge(&self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    pub fn moves_bottom_edge(&self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }
}

impl fmt::Display for HandleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::Right => "right",
            Self::BottomRight => "bottom-right",
            Self::Bottom => "bottom",
            Self::BottomLeft => "bottom-left",
            Self::Left => "left",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handle {
    pub role: HandleRole,
    pub rect: ScreenRect,
}

/// Grips anchored to one shape's screen rect. Empty when nothing is selected
/// or the selected entry is not currently drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandleSet {
    pub owner: Option<DetectionId>,
    pub handles: Vec<Handle>,
}

impl HandleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn around(owner: DetectionId, rect: &ScreenRect) -> Self {
        let handles = HandleRole::ALL
            .iter()
            .map(|&role| Handle {
                role,
                rect: ScreenRect::centered(role.anchor(rect), HANDLE_SIZE),
            })
            .collect();
        Self {
            owner: Some(owner),
            handles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Grip under `p`, if any. Later grips win when they overlap.
    pub fn hit(&self, p: Point) -> Option<HandleRole> {
        self.handles
            .iter()
            .rev()
            .find(|h| h.rect.contains(p))
            .map(|h| h.role)
    }
}

/// Tracks at most one selected detection.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    selected: Option<DetectionId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: DetectionId) {
        if self.selected != Some(id) {
            debug!(%id, "Selected");
        }
        self.selected = Some(id);
    }

    pub fn deselect(&mut self) {
        if let Some(id) = self.selected.take() {
            debug!(%id, "Deselected");
        }
    }

    pub fn selected(&self) -> Option<DetectionId> {
        self.selected
    }

    pub fn is_selected(&self, id: DetectionId) -> bool {
        self.selected == Some(id)
    }

    /// Grips for the selected shape among the drawn `shapes`.
    pub fn bound_handles(&self, shapes: &[ShapeView]) -> HandleSet {
        let Some(id) = self.selected else {
            return HandleSet::empty();
        };
        shapes
            .iter()
            .find(|s| s.id == id)
            .map(|s| HandleSet::around(id, &s.rect))
            .unwrap_or_default()
    }
}
