//! Seed digest canonicalization
//!
//! Computes stable SHA256 digests of seeds for reproducibility

use std::collections::BTreeMap;

use ecohub_core::EntityKind;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::seed::format_v0::SeedV0;

/// Compute a stable digest for a seed
///
/// Returns a SHA256 hex digest of the canonical JSON rendering: entity names
/// normalized to their canonical spelling, object keys sorted, records in
/// file order.
pub fn compute_seed_digest(seed: &SeedV0) -> String {
    let canonical = canonicalize_seed(seed).to_string();

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

fn canonicalize_seed(seed: &SeedV0) -> Value {
    let mut entities: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for (name, records) in &seed.entities {
        let canonical_name = name
            .parse::<EntityKind>()
            .map(|kind| kind.name().to_string())
            .unwrap_or_else(|_| name.clone());
        entities
            .entry(canonical_name)
            .or_default()
            .extend(records.iter().cloned());
    }

    json!({
        "schema_version": seed.schema_version,
        "entities": entities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::parse_seed_str;

    #[test]
    fn test_digest_is_hex_sha256() {
        let seed = parse_seed_str("schema_version: 0\n").unwrap();
        let digest = compute_seed_digest(&seed);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_digest_ignores_key_order_and_name_spelling() {
        let a = parse_seed_str(
            "schema_version: 0\nentities:\n  DailyFact:\n    - title: x\n      featured: true\n",
        )
        .unwrap();
        let b = parse_seed_str(
            "schema_version: 0\nentities:\n  daily-fact:\n    - featured: true\n      title: x\n",
        )
        .unwrap();
        assert_eq!(compute_seed_digest(&a), compute_seed_digest(&b));
    }

    #[test]
    fn test_digest_depends_on_record_order() {
        let a = parse_seed_str(
            "schema_version: 0\nentities:\n  User:\n    - name: a\n    - name: b\n",
        )
        .unwrap();
        let b = parse_seed_str(
            "schema_version: 0\nentities:\n  User:\n    - name: b\n    - name: a\n",
        )
        .unwrap();
        assert_ne!(compute_seed_digest(&a), compute_seed_digest(&b));
    }
}
