use std::path::PathBuf;

use neurolabel_core::config::LabelerConfig;
use neurolabel_core::detection::DetectionRecord;
use neurolabel_core::imaging::DecodedImage;
use neurolabel_core::protocol::HistoryEntry;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Upload a local image, run detection and store the result.
    Detect { path: PathBuf, enhance: bool },

    /// Refresh the processed-image history.
    LoadHistory,

    /// Fetch a stored image and its saved annotations.
    OpenHistoryItem { id: i64, filename: String },

    /// Replace the stored annotations of an image with the edited set.
    SaveAnnotations {
        id: i64,
        records: Vec<DetectionRecord>,
    },

    DeleteImage { id: i64 },

    /// Reopen the library with a newly imported config.
    OpenLibrary { config: LabelerConfig },
}

/// Results sent from worker thread back to UI thread, applied in arrival
/// order.
pub enum WorkerResult {
    /// Detection finished; the decoded image follows separately.
    Detected {
        image_id: i64,
        filename: String,
        detections: Vec<DetectionRecord>,
    },
    /// Saved annotations of a history entry; the decoded image follows
    /// separately.
    HistoryItemLoaded {
        image_id: i64,
        filename: String,
        detections: Vec<DetectionRecord>,
    },
    ImageDecoded {
        image_id: i64,
        image: DecodedImage,
    },
    History {
        entries: Vec<HistoryEntry>,
    },
    Saved {
        image_id: i64,
        count: usize,
    },
    Deleted {
        image_id: i64,
    },
    ConfigImported {
        config: LabelerConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
