//! Seed parser with validation
//!
//! Parses YAML and validates schema version, entity names and record shape

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ecohub_core::{EntityKind, Fields};

use crate::errors::{io_error, seed_validation, Result};
use crate::seed::format_v0::SeedV0;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("seed_read", e))?;
    parse_seed_str(&content)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

/// Validate a parsed seed
fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    resolve_entities(seed).map(|_| ())
}

/// Resolve entity names and convert every record into `Fields`
///
/// The map is ordered like `EntityKind::ALL`; records keep file order.
pub(crate) fn resolve_entities(seed: &SeedV0) -> Result<BTreeMap<EntityKind, Vec<Fields>>> {
    let mut resolved: BTreeMap<EntityKind, Vec<Fields>> = BTreeMap::new();

    for (name, records) in &seed.entities {
        let kind: EntityKind = name
            .parse()
            .map_err(|_| seed_validation(&format!("Unknown entity '{}'", name)))?;

        if resolved.contains_key(&kind) {
            return Err(seed_validation(&format!(
                "Entity '{}' listed more than once (as '{}')",
                kind, name
            )));
        }

        let mut fields = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let record_fields = Fields::from_value(record.clone()).map_err(|e| {
                seed_validation(&format!("{} record {}: {}", kind, index, e))
            })?;

            let reserved = record_fields.system_keys();
            if !reserved.is_empty() {
                return Err(seed_validation(&format!(
                    "{} record {} sets store-assigned field(s): {}",
                    kind,
                    index,
                    reserved.join(", ")
                )));
            }

            fields.push(record_fields);
        }

        resolved.insert(kind, fields);
    }

    Ok(resolved)
}
