//! Seed importer orchestration
//!
//! Imports seeds by running `Command::Create` batches through the core
//! `apply_all` boundary and wrapping the resulting registry in an `EntityHub`

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use ecohub_core::errors::ExError;
use ecohub_core::{apply_all, Command, EntityKind, Registry};
use ecohub_core::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;

use crate::errors::Result;
use crate::hub::EntityHub;
use crate::seed::digest::compute_seed_digest;
use crate::seed::format_v0::SeedV0;
use crate::seed::parser::{parse_seed_file, parse_seed_str, resolve_entities};

/// Outcome of a seed import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// SHA256 hex digest of the canonical seed
    pub digest: String,

    /// Records created per entity type; every type is listed
    pub counts: BTreeMap<EntityKind, usize>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Import a seed file into a fresh hub
///
/// This is the main entry point for seed import. It:
/// 1. Parses and validates the seed YAML
/// 2. Computes the seed digest
/// 3. Creates records entity by entity (`EntityKind::ALL` order, file order
///    within an entity), so ids are deterministic
/// 4. Hands the populated registry to a new `EntityHub`
pub fn import_seed(path: &Path) -> Result<(ImportReport, EntityHub)> {
    let started = Instant::now();
    log_op_start!("seed_import", path = %path.display());

    let outcome = parse_seed_file(path).and_then(|seed| import_parsed(&seed));
    finish("seed_import", started, outcome)
}

/// Import a seed from a YAML string
pub fn import_seed_str(content: &str) -> Result<(ImportReport, EntityHub)> {
    let started = Instant::now();
    log_op_start!("seed_import");

    let outcome = parse_seed_str(content).and_then(|seed| import_parsed(&seed));
    finish("seed_import", started, outcome)
}

/// The create commands a seed expands to, in import order
pub fn seed_commands(seed: &SeedV0) -> Result<Vec<Command>> {
    let commands = resolve_entities(seed)?
        .into_iter()
        .flat_map(|(entity, records)| {
            records
                .into_iter()
                .map(move |fields| Command::Create { entity, fields })
        })
        .collect();
    Ok(commands)
}

fn import_parsed(seed: &SeedV0) -> Result<(ImportReport, EntityHub)> {
    let digest = compute_seed_digest(seed);
    let commands = seed_commands(seed)?;

    let (registry, _applied) = apply_all(&Registry::new(), commands)
        .map_err(|e| ExError::from(e).with_op("seed_import"))?;

    let counts = registry
        .iter()
        .map(|(kind, collection)| (kind, collection.len()))
        .collect();

    Ok((ImportReport { digest, counts }, EntityHub::from_registry(registry)))
}

fn finish(
    op: &'static str,
    started: Instant,
    outcome: Result<(ImportReport, EntityHub)>,
) -> Result<(ImportReport, EntityHub)> {
    let duration_ms = started.elapsed().as_millis() as u64;
    match &outcome {
        Ok((report, _)) => {
            log_op_end!(
                op,
                duration_ms = duration_ms,
                digest = report.digest.as_str(),
                result_len = report.total()
            );
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = duration_ms);
        }
    }
    outcome
}
