//! Request/response bodies exchanged with the detection and persistence
//! backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::DetectionRecord;

/// Body of a successful detect call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    pub filename: String,
    pub image_id: i64,
    pub detections: Vec<DetectionRecord>,
}

/// One row of the processed-image history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub filename: String,
    pub timestamp: DateTime<Utc>,
    pub detection_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
    pub id: i64,
}
