use crate::detection::DetectionRecord;
use crate::error::Result;
use crate::protocol::{DeleteResponse, DetectResponse, HistoryEntry, SaveResponse};

/// Detection and persistence service the canvas talks to.
///
/// Requests are independent: nothing here serializes or cancels them, and
/// the caller applies responses in arrival order.
pub trait AnnotationBackend: Send {
    /// Store `bytes` as a new image, run detection on it and persist the
    /// result. `enhance` asks for test-time augmentation.
    fn detect(&mut self, filename: &str, bytes: &[u8], enhance: bool) -> Result<DetectResponse>;

    /// Processed images, newest first.
    fn history(&self) -> Result<Vec<HistoryEntry>>;

    /// Stored bytes of image `id`.
    fn image(&self, id: i64) -> Result<Vec<u8>>;

    /// Annotations of image `id`; empty when there are none.
    fn annotations(&self, id: i64) -> Result<Vec<DetectionRecord>>;

    /// Replace every annotation of image `id`.
    fn save_annotations(&mut self, id: i64, records: &[DetectionRecord]) -> Result<SaveResponse>;

    /// Remove image `id` and its annotations.
    fn delete_image(&mut self, id: i64) -> Result<DeleteResponse>;
}
