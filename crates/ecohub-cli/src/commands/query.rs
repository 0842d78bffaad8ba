//! Usage: ecohub query <SEED> <ENTITY> [--where field=value]... [--order-by FIELD] [--limit N]

use clap::Args;
use ecohub_core::Query;
use ecohub_core_types::RequestContext;
use ecohub_store::RecordStore;
use serde_json::Value;
use std::path::PathBuf;

use super::{in_context, load_hub, print_records, CommandResult};

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Seed YAML file to load
    pub seed: PathBuf,

    /// Entity name, e.g. Challenge or daily_fact
    pub entity: String,

    /// Exact-match condition; the value is read as JSON when it parses
    #[arg(long = "where", value_name = "FIELD=VALUE", value_parser = parse_condition)]
    pub conditions: Vec<(String, Value)>,

    /// Sort field, prefixed with '-' for descending
    #[arg(long, allow_hyphen_values = true)]
    pub order_by: Option<String>,

    /// Maximum number of records; 0 means no limit
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

pub async fn execute(args: QueryArgs, ctx: &RequestContext) -> CommandResult {
    let hub = load_hub(&args.seed, ctx)?;
    let store = hub.by_name(&args.entity).map_err(|e| in_context(e, ctx))?;

    let records = store
        .filter(&build_query(&args))
        .await
        .map_err(|e| in_context(e, ctx))?;
    print_records(&records, ctx)
}

fn build_query(args: &QueryArgs) -> Query {
    let mut query = args
        .conditions
        .iter()
        .fold(Query::new(), |q, (field, value)| q.where_eq(field.clone(), value.clone()));

    if let Some(order_by) = &args.order_by {
        query = query.order_by(order_by);
    }

    query.limit(args.limit)
}

/// Parse `field=value`; `value` is JSON when it parses, otherwise a string
fn parse_condition(raw: &str) -> Result<(String, Value), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;

    if field.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((field.to_string(), value))
}
