use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// Client-side identity of a detection.
///
/// `generation` is bumped every time the store is replaced, so an id captured
/// before a new image or history load can never match an entry after it.
/// `slot` indexes the entry within its generation and only ever grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DetectionId {
    pub generation: u32,
    pub slot: u32,
}

impl fmt::Display for DetectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.generation, self.slot)
    }
}

/// A detection held in memory by the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub id: DetectionId,
    pub label: String,
    /// Model confidence in `[0, 1]`.
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl Detection {
    /// Strip the client-side id.
    pub fn to_record(&self) -> DetectionRecord {
        DetectionRecord {
            label: self.label.clone(),
            confidence: self.confidence,
            bbox: self.bbox,
        }
    }
}

/// Persisted/wire form of a detection: `{ label, confidence, box }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub label: String,
    pub confidence: f32,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
}
