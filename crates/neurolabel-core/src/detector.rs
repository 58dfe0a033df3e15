//! Pluggable source of detections for newly uploaded images.
//!
//! The object-detection model runs outside this workspace. A [`Detector`]
//! turns whatever it produced into [`DetectionRecord`]s in image pixels.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::detection::DetectionRecord;
use crate::error::Result;
use crate::geometry::BoundingBox;

/// What a detector gets to look at.
pub struct DetectionInput<'a> {
    pub filename: &'a str,
    pub bytes: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub enhance: bool,
}

pub trait Detector: Send {
    fn detect(&self, input: &DetectionInput<'_>) -> Result<Vec<DetectionRecord>>;
}

/// Produces no detections; images are annotated by hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDetector;

impl Detector for NoopDetector {
    fn detect(&self, _input: &DetectionInput<'_>) -> Result<Vec<DetectionRecord>> {
        Ok(Vec::new())
    }
}

/// Reads YOLO label files written by an external model run.
///
/// For an upload named `street.jpg` it reads `<labels_dir>/street.txt`, one
/// detection per line: `class cx cy w h [confidence]`, coordinates normalized
/// to `[0, 1]`. A missing confidence counts as `1.0`. A missing file means no
/// detections.
#[derive(Clone, Debug)]
pub struct LabelFileDetector {
    labels_dir: PathBuf,
    class_names: Vec<String>,
}

impl LabelFileDetector {
    pub fn new(labels_dir: impl Into<PathBuf>, class_names: Vec<String>) -> Self {
        Self {
            labels_dir: labels_dir.into(),
            class_names,
        }
    }

    fn label_path(&self, filename: &str) -> Option<PathBuf> {
        let stem = Path::new(filename).file_stem()?;
        Some(self.labels_dir.join(format!("{}.txt", stem.to_string_lossy())))
    }

    fn class_name(&self, class_id: usize) -> String {
        self.class_names
            .get(class_id)
            .cloned()
            .unwrap_or_else(|| format!("class_{class_id}"))
    }
}

impl Detector for LabelFileDetector {
    fn detect(&self, input: &DetectionInput<'_>) -> Result<Vec<DetectionRecord>> {
        let Some(path) = self.label_path(input.filename) else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            debug!(path = %path.display(), "No label file for upload");
            return Ok(Vec::new());
        }

        let text = std::fs::read_to_string(&path)?;
        let size = (input.width as f32, input.height as f32);
        let mut records = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_label_line(line, size) {
                Some((class_id, confidence, bbox)) => records.push(DetectionRecord {
                    label: self.class_name(class_id),
                    confidence,
                    bbox,
                }),
                None => warn!(
                    path = %path.display(),
                    line = line_no + 1,
                    "Skipping malformed label line"
                ),
            }
        }
        debug!(count = records.len(), enhance = input.enhance, "Label file read");
        Ok(records)
    }
}

/// Parse `class cx cy w h [confidence]` into a pixel box.
fn parse_label_line(line: &str, image_size: (f32, f32)) -> Option<(usize, f32, BoundingBox)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 5 && parts.len() != 6 {
        return None;
    }
    let class_id: usize = parts[0].parse().ok()?;
    let cx: f32 = parts[1].parse().ok()?;
    let cy: f32 = parts[2].parse().ok()?;
    let w: f32 = parts[3].parse().ok()?;
    let h: f32 = parts[4].parse().ok()?;
    let confidence: f32 = match parts.get(5) {
        Some(c) => c.parse().ok()?,
        None => 1.0,
    };

    let (img_w, img_h) = image_size;
    let bbox = BoundingBox::new(
        (cx - w / 2.0) * img_w,
        (cy - h / 2.0) * img_h,
        (cx + w / 2.0) * img_w,
        (cy + h / 2.0) * img_h,
    );
    Some((class_id, confidence.clamp(0.0, 1.0), bbox))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_line_with_confidence() {
        let (class_id, conf, bbox) = parse_label_line("2 0.5 0.5 0.2 0.4 0.87", (100.0, 50.0)).unwrap();
        assert_eq!(class_id, 2);
        assert!((conf - 0.87).abs() < 1e-6);
        assert!((bbox.x1 - 40.0).abs() < 1e-4);
        assert!((bbox.x2 - 60.0).abs() < 1e-4);
        assert!((bbox.y1 - 15.0).abs() < 1e-4);
        assert!((bbox.y2 - 35.0).abs() < 1e-4);
    }

    #[test]
    fn test_parse_label_line_defaults_confidence() {
        let (_, conf, _) = parse_label_line("0 0.5 0.5 0.1 0.1", (10.0, 10.0)).unwrap();
        assert_eq!(conf, 1.0);
    }

    #[test]
    fn test_parse_label_line_rejects_garbage() {
        assert!(parse_label_line("0 0.5 0.5", (10.0, 10.0)).is_none());
        assert!(parse_label_line("car 0.5 0.5 0.1 0.1", (10.0, 10.0)).is_none());
        assert!(parse_label_line("0 a b c d", (10.0, 10.0)).is_none());
    }
}
