//! The interactive annotation canvas: model state plus the derived scene.

use tracing::{debug, info};

use crate::consts::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::detection::{DetectionId, DetectionRecord};
use crate::dispatcher::{Interaction, Mode};
use crate::editor::BoxEditor;
use crate::geometry::ScreenRect;
use crate::scene::{Scene, SceneInputs};
use crate::selection::SelectionController;
use crate::store::DetectionStore;
use crate::viewport::Viewport;

/// Everything the canvas owns for the open image. Single owner: input
/// dispatch mutates it, the render step reads [`scene`](Self::scene) right
/// after.
#[derive(Clone, Debug)]
pub struct AnnotationCanvas {
    pub(crate) store: DetectionStore,
    pub(crate) viewport: Viewport,
    pub(crate) selection: SelectionController,
    pub(crate) editor: BoxEditor,
    pub(crate) interaction: Interaction,
    threshold: f32,
    image_size: Option<[f32; 2]>,
}

impl Default for AnnotationCanvas {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl AnnotationCanvas {
    pub fn new(threshold: f32) -> Self {
        Self {
            store: DetectionStore::new(),
            viewport: Viewport::default(),
            selection: SelectionController::new(),
            editor: BoxEditor::default(),
            interaction: Interaction::Idle,
            threshold: threshold.clamp(0.0, 1.0),
            image_size: None,
        }
    }

    /// Start showing a new image (fresh detection or history load).
    ///
    /// Replaces the store wholesale, resets the viewport to identity, clears
    /// selection and any gesture, and blanks the canvas until
    /// [`image_decoded`](Self::image_decoded) reports the natural size.
    pub fn load_detections(&mut self, records: Vec<DetectionRecord>) {
        self.store.replace(records);
        self.viewport.reset();
        self.selection.deselect();
        self.interaction = Interaction::Idle;
        self.image_size = None;
    }

    /// The decoded image's natural pixel size is known; rendering can start.
    pub fn image_decoded(&mut self, width: u32, height: u32) {
        info!(width, height, "Image decoded");
        self.image_size = Some([width as f32, height as f32]);
    }

    /// Drop the image and every detection.
    pub fn close(&mut self) {
        self.load_detections(Vec::new());
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold.clamp(0.0, 1.0);
        debug!(threshold = self.threshold, "Confidence threshold changed");
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn image_size(&self) -> Option<[f32; 2]> {
        self.image_size
    }

    pub fn store(&self) -> &DetectionStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selected(&self) -> Option<DetectionId> {
        self.selection.selected()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn mode(&self) -> Mode {
        self.interaction.mode()
    }

    /// Select an entry from outside the canvas (e.g. a list). Ignored while a
    /// gesture is in progress or when the id is not in the store.
    pub fn select(&mut self, id: DetectionId) {
        if self.interaction.in_gesture() || !self.store.contains(id) {
            return;
        }
        self.selection.select(id);
        self.interaction = Interaction::Selected;
    }

    /// Remove the selected entry and clear the selection.
    pub fn delete_selected(&mut self) -> Option<DetectionId> {
        if self.interaction.in_gesture() {
            return None;
        }
        let id = self.selection.selected()?;
        self.store.remove(id);
        self.selection.deselect();
        self.interaction = Interaction::Idle;
        info!(%id, remaining = self.store.len(), "Deleted selected detection");
        Some(id)
    }

    /// Scale and center the image inside `panel`.
    pub fn fit_to(&mut self, panel: ScreenRect) {
        if let Some(size) = self.image_size {
            self.viewport.fit_to(size, panel);
        }
    }

    /// Number of entries passing the current threshold.
    pub fn visible_count(&self) -> usize {
        self.store.visible(self.threshold).len()
    }

    /// Current detections with ids stripped.
    pub fn records(&self) -> Vec<DetectionRecord> {
        self.store.records()
    }

    pub fn scene(&self) -> Scene {
        Scene::build(&SceneInputs {
            store: &self.store,
            selection: &self.selection,
            viewport: &self.viewport,
            threshold: self.threshold,
            image_size: self.image_size,
            gesture: self.interaction.gesture(),
        })
    }
}
