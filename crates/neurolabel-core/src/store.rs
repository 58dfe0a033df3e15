//! Canonical, ordered list of detections for the open image.

use std::sync::Arc;

use tracing::{debug, info};

use crate::detection::{Detection, DetectionId, DetectionRecord};
use crate::geometry::BoundingBox;

/// Owns the detections of the current image.
///
/// Updates never mutate a published list: each edit builds a new list and
/// swaps the shared pointer, so a [`snapshot`](Self::snapshot) taken earlier
/// keeps seeing the state it was taken from. Entries stay in insertion order
/// and their slots only grow, which keeps lookups a binary search.
#[derive(Clone, Debug, Default)]
pub struct DetectionStore {
    generation: u32,
    entries: Arc<Vec<Detection>>,
}

impl DetectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute the whole list, assigning a fresh id to every entry.
    pub fn replace(&mut self, records: Vec<DetectionRecord>) {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let entries: Vec<Detection> = records
            .into_iter()
            .enumerate()
            .map(|(slot, record)| Detection {
                id: DetectionId {
                    generation,
                    slot: slot as u32,
                },
                label: record.label,
                confidence: record.confidence,
                bbox: record.bbox,
            })
            .collect();
        info!(generation, count = entries.len(), "Detection store replaced");
        self.entries = Arc::new(entries);
    }

    /// Replace the box of the matching entry. Unknown ids are ignored.
    pub fn update_box(&mut self, id: DetectionId, bbox: BoundingBox) {
        if self.position(id).is_none() {
            return;
        }
        let next: Vec<Detection> = self
            .entries
            .iter()
            .map(|d| {
                if d.id == id {
                    Detection { bbox, ..d.clone() }
                } else {
                    d.clone()
                }
            })
            .collect();
        debug!(%id, ?bbox, "Box updated");
        self.entries = Arc::new(next);
    }

    /// Delete the matching entry. Unknown ids are ignored.
    pub fn remove(&mut self, id: DetectionId) {
        if self.position(id).is_none() {
            return;
        }
        let next: Vec<Detection> = self
            .entries
            .iter()
            .filter(|d| d.id != id)
            .cloned()
            .collect();
        debug!(%id, remaining = next.len(), "Detection removed");
        self.entries = Arc::new(next);
    }

    /// Entries with `confidence >= threshold`, in canonical order.
    pub fn visible(&self, threshold: f32) -> Vec<&Detection> {
        self.entries
            .iter()
            .filter(|d| d.confidence >= threshold)
            .collect()
    }

    pub fn get(&self, id: DetectionId) -> Option<&Detection> {
        self.position(id).map(|i| &self.entries[i])
    }

    pub fn contains(&self, id: DetectionId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.entries.iter()
    }

    /// Shared handle to the current list.
    pub fn snapshot(&self) -> Arc<Vec<Detection>> {
        Arc::clone(&self.entries)
    }

    /// Current list with ids stripped, for saving and export.
    pub fn records(&self) -> Vec<DetectionRecord> {
        self.entries.iter().map(Detection::to_record).collect()
    }

    fn position(&self, id: DetectionId) -> Option<usize> {
        if id.generation != self.generation {
            return None;
        }
        self.entries
            .binary_search_by_key(&id.slot, |d| d.id.slot)
            .ok()
    }
}
