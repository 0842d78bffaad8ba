//! Seed Format v0 schema
//!
//! Defines the YAML structure for seed import:
//!
//! ```yaml
//! schema_version: 0
//! entities:
//!   Challenge:
//!     - title: Zero Waste Week Challenge
//!       points: 100
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level seed file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Records to create, keyed by entity name
    ///
    /// Names are matched like `EntityKind::from_str`. Each record is a
    /// mapping of user fields; the store assigns `id` and the timestamps.
    #[serde(default)]
    pub entities: BTreeMap<String, Vec<Value>>,
}

impl SeedV0 {
    pub fn record_count(&self) -> usize {
        self.entities.values().map(Vec::len).sum()
    }
}
