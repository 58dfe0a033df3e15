mod common;

use std::path::PathBuf;

use neurolabel_core::config::LabelerConfig;
use neurolabel_core::detection::DetectionRecord;
use neurolabel_core::error::LabelError;
use neurolabel_core::export::{export_json, write_export};
use neurolabel_core::imaging::{decode_image, image_dimensions};

use common::{canvas_with, click, png_bytes, record};

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn test_export_uses_wire_field_names() {
    let json = export_json(&[record("car", 0.88, 10.0, 20.0, 50.0, 60.0)]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value[0];
    assert_eq!(first["label"], "car");
    assert_eq!(first["box"]["x1"], 10.0);
    assert_eq!(first["box"]["y2"], 60.0);
    assert!(first.get("id").is_none());
    assert!(first.get("bbox").is_none());
}

#[test]
fn test_export_reflects_edits() {
    let mut canvas = canvas_with(
        vec![
            record("car", 0.9, 10.0, 10.0, 50.0, 50.0),
            record("dog", 0.8, 60.0, 60.0, 90.0, 90.0),
        ],
        100,
        100,
    );
    click(&mut canvas, 20.0, 20.0);
    canvas.delete_selected();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotations.json");
    write_export(&path, &canvas.records()).unwrap();

    let parsed: Vec<DetectionRecord> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, vec![record("dog", 0.8, 60.0, 60.0, 90.0, 90.0)]);
}

#[test]
fn test_export_empty_list() {
    assert_eq!(export_json(&[]).unwrap(), "[]");
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_defaults() {
    let config = LabelerConfig::default();
    assert_eq!(config.library.history_limit, 20);
    assert_eq!(config.detector.min_confidence, 0.2);
    assert_eq!(config.canvas.confidence_threshold, 0.5);
    assert!(!config.canvas.enhance);
    assert!(config.detector.labels_dir.is_none());
}

#[test]
fn test_config_partial_toml() {
    let config = LabelerConfig::from_toml(
        r#"
[library]
root = "/data/labels"
history_limit = 5

[canvas]
confidence_threshold = 0.3
enhance = true
"#,
    )
    .unwrap();
    assert_eq!(config.library.root, PathBuf::from("/data/labels"));
    assert_eq!(config.library.history_limit, 5);
    assert_eq!(config.canvas.confidence_threshold, 0.3);
    assert!(config.canvas.enhance);
    assert_eq!(config.detector.min_confidence, 0.2);
}

#[test]
fn test_config_toml_round_trip_via_file() {
    let mut config = LabelerConfig::default();
    config.detector.labels_dir = Some(PathBuf::from("runs/detect/labels"));
    config.detector.class_names = vec!["person".into(), "bicycle".into()];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("neurolabel.toml");
    std::fs::write(&path, config.to_toml().unwrap()).unwrap();

    let loaded = LabelerConfig::load(&path).unwrap();
    assert_eq!(loaded.detector.labels_dir, config.detector.labels_dir);
    assert_eq!(loaded.detector.class_names, config.detector.class_names);
}

#[test]
fn test_config_invalid_toml() {
    let err = LabelerConfig::from_toml("[library\nroot = 1").unwrap_err();
    assert!(matches!(err, LabelError::Config(_)));
}

#[test]
fn test_config_missing_file() {
    let err = LabelerConfig::load(std::path::Path::new("/nonexistent/neurolabel.toml")).unwrap_err();
    assert!(matches!(err, LabelError::Io(_)));
}

// ---------------------------------------------------------------------------
// Imaging
// ---------------------------------------------------------------------------

#[test]
fn test_decode_png() {
    let decoded = decode_image(&png_bytes(12, 7)).unwrap();
    assert_eq!((decoded.width, decoded.height), (12, 7));
    assert_eq!(decoded.rgba.len(), 12 * 7 * 4);
    assert_eq!(&decoded.rgba[..4], &[128, 128, 128, 255]);
}

#[test]
fn test_dimensions_without_decode() {
    assert_eq!(image_dimensions(&png_bytes(33, 21)).unwrap(), (33, 21));
}
