use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use neurolabel_core::backend::AnnotationBackend;
use neurolabel_core::config::LabelerConfig;

use crate::summary::print_detections;

#[derive(Args)]
pub struct DetectArgs {
    /// Image to store and analyze
    pub image: PathBuf,

    /// Ask the detector for test-time augmentation
    #[arg(long)]
    pub enhance: bool,

    /// Only list detections at or above this confidence
    #[arg(long)]
    pub threshold: Option<f32>,
}

pub fn run(args: &DetectArgs, config: &LabelerConfig) -> Result<()> {
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let filename = args
        .image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut library = super::open_library(config)?;
    let enhance = args.enhance || config.canvas.enhance;
    let resp = library
        .detect(&filename, &bytes, enhance)
        .with_context(|| format!("Detection failed for {}", args.image.display()))?;

    let threshold = args
        .threshold
        .unwrap_or(config.canvas.confidence_threshold)
        .clamp(0.0, 1.0);
    print_detections(&resp, threshold);
    Ok(())
}
