/// Smallest allowed viewport scale.
pub const MIN_SCALE: f32 = 0.1;

/// Largest allowed viewport scale.
pub const MAX_SCALE: f32 = 5.0;

/// Multiplicative zoom factor applied per wheel step.
pub const ZOOM_STEP: f32 = 1.1;

/// Minimum box extent in image pixels, per axis.
pub const MIN_BOX_EXTENT: f32 = 5.0;

/// Minimum extent in screen units a manipulated shape may have at gesture end.
pub const MIN_SCREEN_EXTENT: f32 = 5.0;

/// Side length of a square resize grip, in screen units.
pub const HANDLE_SIZE: f32 = 8.0;

/// Confidence threshold applied when nothing else is configured.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Detections below this confidence are dropped before they are stored.
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f32 = 0.2;

/// Number of entries returned by a history listing.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Name of the index file inside a local library directory.
pub const LIBRARY_INDEX_FILE: &str = "library.json";

/// Name of the directory holding uploaded images inside a local library.
pub const LIBRARY_IMAGES_DIR: &str = "images";
