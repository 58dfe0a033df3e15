use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use neurolabel_core::backend::AnnotationBackend;
use neurolabel_core::config::LabelerConfig;
use neurolabel_core::export::{export_json, write_export};

#[derive(Args)]
pub struct ExportArgs {
    /// Stored image id
    pub id: i64,

    /// Write JSON to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ExportArgs, config: &LabelerConfig) -> Result<()> {
    let library = super::open_library(config)?;
    // Fails on an unknown id instead of exporting an empty list.
    library.image(args.id)?;
    let records = library.annotations(args.id)?;

    if let Some(ref path) = args.output {
        write_export(path, &records)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} annotations exported to {}", records.len(), path.display());
    } else {
        println!("{}", export_json(&records)?);
    }
    Ok(())
}
