//! Usage: ecohub get <SEED> <ENTITY> <ID>

use clap::Args;
use ecohub_core::errors::{ExError, ExErrorKind};
use ecohub_core::RecordKey;
use ecohub_core_types::RequestContext;
use ecohub_store::RecordStore;
use std::path::PathBuf;

use super::{in_context, load_hub, render_json, CommandResult};

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Seed YAML file to load
    pub seed: PathBuf,

    /// Entity name, e.g. Challenge or daily_fact
    pub entity: String,

    /// Record id; parsed like an integer prefix ("12abc" is 12)
    pub id: String,
}

pub async fn execute(args: GetArgs, ctx: &RequestContext) -> CommandResult {
    let hub = load_hub(&args.seed, ctx)?;
    let store = hub.by_name(&args.entity).map_err(|e| in_context(e, ctx))?;

    let found = store
        .get(RecordKey::from(args.id.as_str()))
        .await
        .map_err(|e| in_context(e, ctx))?;

    match found {
        Some(record) => {
            println!("{}", render_json(&record, ctx)?);
            Ok(())
        }
        None => {
            let err = ExError::new(ExErrorKind::NotFound)
                .with_op("record_get")
                .with_entity(store.name())
                .with_message(format!("Record {} not found", args.id));
            Err(in_context(err, ctx).into())
        }
    }
}
