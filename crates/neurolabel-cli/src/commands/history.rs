use anyhow::Result;
use clap::Args;
use neurolabel_core::backend::AnnotationBackend;
use neurolabel_core::config::LabelerConfig;

use crate::summary::print_history;

#[derive(Args)]
pub struct HistoryArgs {
    /// Show at most N entries (defaults to the configured limit)
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(args: &HistoryArgs, config: &LabelerConfig) -> Result<()> {
    let mut library = super::open_library(config)?;
    if let Some(limit) = args.limit {
        library = library.with_history_limit(limit);
    }
    let entries = library.history()?;
    print_history(&entries);
    Ok(())
}
