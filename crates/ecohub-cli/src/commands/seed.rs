//! Seed file command
//!
//! Usage: ecohub seed check <PATH>

use clap::{Args, Subcommand};
use ecohub_core_types::RequestContext;
use serde_json::json;
use std::path::PathBuf;

use super::{in_context, render_json, CommandResult};

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Validate a seed file and report its digest and record counts
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to seed YAML file
    pub path: PathBuf,
}

/// Execute seed command
pub async fn execute(args: SeedArgs, ctx: &RequestContext) -> CommandResult {
    match args.command {
        SeedCommand::Check(check_args) => execute_check(check_args, ctx),
    }
}

fn execute_check(args: CheckArgs, ctx: &RequestContext) -> CommandResult {
    let (report, _hub) =
        ecohub_store::seed::import_seed(&args.path).map_err(|e| in_context(e, ctx))?;

    let total = report.total();
    let summary = json!({
        "path": args.path.display().to_string(),
        "digest": report.digest,
        "total": total,
        "counts": report.counts,
    });
    println!("{}", render_json(&summary, ctx)?);
    Ok(())
}
