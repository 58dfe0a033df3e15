use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Image {id} not found")]
    ImageNotFound { id: i64 },

    #[error("File not found on disk: {}", path.display())]
    FileMissing { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, LabelError>;
