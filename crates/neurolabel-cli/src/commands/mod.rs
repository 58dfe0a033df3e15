pub mod config;
pub mod delete;
pub mod detect;
pub mod export;
pub mod history;

use anyhow::{Context, Result};
use neurolabel_core::config::LabelerConfig;
use neurolabel_core::library::LocalLibrary;

pub(crate) fn open_library(config: &LabelerConfig) -> Result<LocalLibrary> {
    LocalLibrary::from_config(config).with_context(|| {
        format!("Failed to open library at {}", config.library.root.display())
    })
}
