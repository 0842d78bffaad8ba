//! Usage: ecohub list <SEED> <ENTITY>

use clap::Args;
use ecohub_core_types::RequestContext;
use ecohub_store::RecordStore;
use std::path::PathBuf;

use super::{in_context, load_hub, print_records, CommandResult};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Seed YAML file to load
    pub seed: PathBuf,

    /// Entity name, e.g. Challenge or daily_fact
    pub entity: String,
}

pub async fn execute(args: ListArgs, ctx: &RequestContext) -> CommandResult {
    let hub = load_hub(&args.seed, ctx)?;
    let store = hub.by_name(&args.entity).map_err(|e| in_context(e, ctx))?;

    let records = store.all().await.map_err(|e| in_context(e, ctx))?;
    print_records(&records, ctx)
}
