//! Local JSON export of the edited detections.

use std::path::Path;

use tracing::info;

use crate::detection::DetectionRecord;
use crate::error::Result;

/// Pretty JSON array of `{ label, confidence, box }`. Client ids never
/// appear in the output.
pub fn export_json(records: &[DetectionRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn write_export(path: &Path, records: &[DetectionRecord]) -> Result<()> {
    let json = export_json(records)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), count = records.len(), "Annotations exported");
    Ok(())
}
