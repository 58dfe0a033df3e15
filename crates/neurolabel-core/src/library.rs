//! Directory-backed image and annotation store.
//!
//! Layout under the library root:
//!
//! ```text
//! images/<id>_<filename>   uploaded bytes
//! library.json             image records with their annotations
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::backend::AnnotationBackend;
use crate::config::LabelerConfig;
use crate::consts::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_MIN_DETECTION_CONFIDENCE, LIBRARY_IMAGES_DIR,
    LIBRARY_INDEX_FILE,
};
use crate::detection::DetectionRecord;
use crate::detector::{DetectionInput, Detector, LabelFileDetector, NoopDetector};
use crate::error::{LabelError, Result};
use crate::imaging::image_dimensions;
use crate::protocol::{DeleteResponse, DetectResponse, HistoryEntry, SaveResponse};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ImageRecord {
    id: i64,
    filename: String,
    /// Relative to the library root.
    path: PathBuf,
    timestamp: DateTime<Utc>,
    annotations: Vec<DetectionRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct LibraryIndex {
    next_id: i64,
    images: Vec<ImageRecord>,
}

impl Default for LibraryIndex {
    fn default() -> Self {
        Self {
            next_id: 1,
            images: Vec::new(),
        }
    }
}

pub struct LocalLibrary {
    root: PathBuf,
    index: LibraryIndex,
    detector: Box<dyn Detector>,
    min_confidence: f32,
    history_limit: usize,
}

impl LocalLibrary {
    /// Open (or create) a library at `root`.
    pub fn open(root: impl Into<PathBuf>, detector: Box<dyn Detector>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(root.join(LIBRARY_IMAGES_DIR))?;

        let index_path = root.join(LIBRARY_INDEX_FILE);
        let index = if index_path.exists() {
            let content = std::fs::read_to_string(&index_path)?;
            serde_json::from_str(&content)?
        } else {
            LibraryIndex::default()
        };
        info!(root = %root.display(), images = index.images.len(), "Library opened");

        Ok(Self {
            root,
            index,
            detector,
            min_confidence: DEFAULT_MIN_DETECTION_CONFIDENCE,
            history_limit: DEFAULT_HISTORY_LIMIT,
        })
    }

    /// Open the library described by `config`, with a label-file detector
    /// when a labels directory is configured.
    pub fn from_config(config: &LabelerConfig) -> Result<Self> {
        let detector: Box<dyn Detector> = match &config.detector.labels_dir {
            Some(dir) => Box::new(LabelFileDetector::new(
                dir.clone(),
                config.detector.class_names.clone(),
            )),
            None => Box::new(NoopDetector),
        };
        Ok(Self::open(&config.library.root, detector)?
            .with_min_confidence(config.detector.min_confidence)
            .with_history_limit(config.library.history_limit))
    }

    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record(&self, id: i64) -> Result<&ImageRecord> {
        self.index
            .images
            .iter()
            .find(|r| r.id == id)
            .ok_or(LabelError::ImageNotFound { id })
    }

    fn record_mut(&mut self, id: i64) -> Result<&mut ImageRecord> {
        self.index
            .images
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LabelError::ImageNotFound { id })
    }

    /// Write the index through a temp file so a crash never leaves it torn.
    fn persist(&self) -> Result<()> {
        let index_path = self.root.join(LIBRARY_INDEX_FILE);
        let tmp_path = index_path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&self.index)?;
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &index_path)?;
        Ok(())
    }
}

impl AnnotationBackend for LocalLibrary {
    fn detect(&mut self, filename: &str, bytes: &[u8], enhance: bool) -> Result<DetectResponse> {
        let (width, height) = image_dimensions(bytes)?;
        let name = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let input = DetectionInput {
            filename: &name,
            bytes,
            width,
            height,
            enhance,
        };
        let min_confidence = self.min_confidence;
        let annotations: Vec<DetectionRecord> = self
            .detector
            .detect(&input)?
            .into_iter()
            .filter(|d| d.confidence >= min_confidence)
            .map(|d| DetectionRecord {
                bbox: d.bbox.rounded(),
                ..d
            })
            .collect();

        let detections = annotations
            .iter()
            .map(|d| DetectionRecord {
                confidence: (d.confidence * 100.0).round() / 100.0,
                ..d.clone()
            })
            .collect();

        // Nothing touches the disk or the index until detection succeeded.
        let id = self.index.next_id;
        let rel_path = Path::new(LIBRARY_IMAGES_DIR).join(format!("{id}_{name}"));
        let abs_path = self.root.join(&rel_path);
        std::fs::write(&abs_path, bytes)?;

        self.index.next_id += 1;
        self.index.images.push(ImageRecord {
            id,
            filename: name.clone(),
            path: rel_path,
            timestamp: Utc::now(),
            annotations,
        });
        if let Err(e) = self.persist() {
            self.index.images.pop();
            self.index.next_id = id;
            if let Err(remove_err) = std::fs::remove_file(&abs_path) {
                warn!(path = %abs_path.display(), error = %remove_err, "Failed to remove upload");
            }
            return Err(e);
        }
        info!(id, filename = %name, width, height, enhance, "Image stored and detected");

        Ok(DetectResponse {
            filename: name,
            image_id: id,
            detections,
        })
    }

    fn history(&self) -> Result<Vec<HistoryEntry>> {
        let mut entries: Vec<HistoryEntry> = self
            .index
            .images
            .iter()
            .map(|r| HistoryEntry {
                id: r.id,
                filename: r.filename.clone(),
                timestamp: r.timestamp,
                detection_count: r.annotations.len(),
            })
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries.truncate(self.history_limit);
        Ok(entries)
    }

    fn image(&self, id: i64) -> Result<Vec<u8>> {
        let path = self.root.join(&self.record(id)?.path);
        if !path.exists() {
            return Err(LabelError::FileMissing { path });
        }
        Ok(std::fs::read(path)?)
    }

    fn annotations(&self, id: i64) -> Result<Vec<DetectionRecord>> {
        Ok(self
            .record(id)
            .map(|r| r.annotations.clone())
            .unwrap_or_default())
    }

    fn save_annotations(&mut self, id: i64, records: &[DetectionRecord]) -> Result<SaveResponse> {
        self.record_mut(id)?.annotations = records.to_vec();
        self.persist()?;
        debug!(id, count = records.len(), "Annotations saved");
        Ok(SaveResponse {
            status: "success".to_string(),
            count: records.len(),
        })
    }

    fn delete_image(&mut self, id: i64) -> Result<DeleteResponse> {
        let path = self.root.join(&self.record(id)?.path);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        self.index.images.retain(|r| r.id != id);
        self.persist()?;
        info!(id, "Image deleted");
        Ok(DeleteResponse {
            status: "deleted".to_string(),
            id,
        })
    }
}
