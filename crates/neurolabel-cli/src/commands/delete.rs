use anyhow::Result;
use clap::Args;
use neurolabel_core::backend::AnnotationBackend;
use neurolabel_core::config::LabelerConfig;

#[derive(Args)]
pub struct DeleteArgs {
    /// Stored image id
    pub id: i64,
}

pub fn run(args: &DeleteArgs, config: &LabelerConfig) -> Result<()> {
    let mut library = super::open_library(config)?;
    let resp = library.delete_image(args.id)?;
    println!("Image {} {}", resp.id, resp.status);
    Ok(())
}
