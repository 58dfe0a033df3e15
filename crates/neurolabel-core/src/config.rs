use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_HISTORY_LIMIT, DEFAULT_MIN_DETECTION_CONFIDENCE,
};
use crate::error::{LabelError, Result};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LabelerConfig {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

impl LabelerConfig {
    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LabelError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LabelError::Config(e.to_string()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Directory holding stored images and the annotation index.
    pub root: PathBuf,
    /// Maximum number of entries a history listing returns.
    pub history_limit: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("neurolabel_library"),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Directory of pre-computed YOLO label files (`<image stem>.txt`).
    /// Without one, detection yields no boxes.
    pub labels_dir: Option<PathBuf>,
    /// Class names indexed by YOLO class id.
    pub class_names: Vec<String>,
    /// Detections below this confidence are discarded (0.0..1.0).
    pub min_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            labels_dir: None,
            class_names: Vec::new(),
            min_confidence: DEFAULT_MIN_DETECTION_CONFIDENCE,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Initial confidence threshold of the visible subset (0.0..1.0).
    pub confidence_threshold: f32,
    /// Initial state of the "enhance" toggle sent with detect requests.
    pub enhance: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            enhance: false,
        }
    }
}
