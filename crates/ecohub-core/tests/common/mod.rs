use ecohub_core::{Collection, Fields};
use serde_json::Value;

/// Create a collection pre-filled with one record per field mapping
#[allow(dead_code)]
pub fn collection_with(name: &str, rows: Vec<Value>) -> Collection {
    let mut collection = Collection::new(name);
    for row in rows {
        collection.create(Fields::from_value(row).unwrap());
    }
    collection
}

/// Titles of `records`, in order, for compact assertions
#[allow(dead_code)]
pub fn titles(records: &[ecohub_core::Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            r.get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}
