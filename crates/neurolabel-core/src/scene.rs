//! Deterministic render model.
//!
//! A [`Scene`] is computed from the canvas model every frame and is never
//! written back: painters and hit-testing read it, gestures commit to the
//! store.

use crate::detection::DetectionId;
use crate::editor::Gesture;
use crate::geometry::ScreenRect;
use crate::selection::{HandleSet, SelectionController};
use crate::store::DetectionStore;
use crate::viewport::Viewport;

/// One drawn detection.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeView {
    pub id: DetectionId,
    pub label: String,
    pub confidence: f32,
    pub rect: ScreenRect,
    pub selected: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Screen area of the image; `None` until the image has decoded.
    pub image_rect: Option<ScreenRect>,
    /// Shapes in draw order (last is top-most).
    pub shapes: Vec<ShapeView>,
    pub handles: HandleSet,
}

/// Inputs the scene is a function of.
pub struct SceneInputs<'a> {
    pub store: &'a DetectionStore,
    pub selection: &'a SelectionController,
    pub viewport: &'a Viewport,
    pub threshold: f32,
    pub image_size: Option<[f32; 2]>,
    pub gesture: Option<&'a Gesture>,
}

impl Scene {
    pub fn build(inputs: &SceneInputs<'_>) -> Self {
        let Some(image_size) = inputs.image_size else {
            return Self::default();
        };
        let viewport = inputs.viewport;

        let shapes: Vec<ShapeView> = inputs
            .store
            .visible(inputs.threshold)
            .into_iter()
            .map(|d| {
                let rect = match inputs.gesture {
                    Some(g) if g.id == d.id && g.has_moved() => g.transform(viewport).to_rect(),
                    _ => viewport.box_to_screen(&d.bbox),
                };
                ShapeView {
                    id: d.id,
                    label: d.label.clone(),
                    confidence: d.confidence,
                    rect,
                    selected: inputs.selection.is_selected(d.id),
                }
            })
            .collect();
        let handles = inputs.selection.bound_handles(&shapes);

        Self {
            image_rect: Some(viewport.image_rect(image_size)),
            shapes,
            handles,
        }
    }

    pub fn shape(&self, id: DetectionId) -> Option<&ShapeView> {
        self.shapes.iter().find(|s| s.id == id)
    }
}
