//! In-memory `RecordStore`
//!
//! Each operation takes the collection lock for its whole read-modify-write,
//! so concurrent callers never interleave inside one operation. This layer
//! owns boundary logging; `Collection` itself only emits debug events.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use ecohub_core::errors::ExError;
use ecohub_core::{log_op_end, log_op_error, log_op_start};
use ecohub_core::{Collection, Fields, Query, Record, RecordKey};
use tokio::sync::Mutex;

use crate::errors::Result;
use crate::record_store::RecordStore;

/// Shared handle to one collection
///
/// Cloning is cheap and every clone sees the same records.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    name: Arc<str>,
    inner: Arc<Mutex<Collection>>,
}

impl MemoryStore {
    /// An empty store for the given entity type name
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_collection(Collection::new(name))
    }

    /// Wrap an already populated collection, e.g. one built by seed import
    pub fn from_collection(collection: Collection) -> Self {
        Self {
            name: Arc::from(collection.name()),
            inner: Arc::new(Mutex::new(collection)),
        }
    }

    /// Copy of the current collection state
    pub async fn snapshot(&self) -> Collection {
        self.inner.lock().await.clone()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create(&self, fields: Fields) -> Result<Record> {
        let started = Instant::now();
        log_op_start!("record_create", entity = self.name());

        let record = self.inner.lock().await.create(fields);

        log_op_end!(
            "record_create",
            duration_ms = elapsed_ms(started),
            entity = self.name(),
            record_id = record.id().get()
        );
        Ok(record)
    }

    async fn all(&self) -> Result<Vec<Record>> {
        let started = Instant::now();
        log_op_start!("record_list", entity = self.name());

        let records = self.inner.lock().await.all();

        log_op_end!(
            "record_list",
            duration_ms = elapsed_ms(started),
            entity = self.name(),
            result_len = records.len()
        );
        Ok(records)
    }

    async fn get(&self, id: RecordKey) -> Result<Option<Record>> {
        let started = Instant::now();
        log_op_start!("record_get", entity = self.name(), record_id = %id);

        let found = self.inner.lock().await.get(id);

        log_op_end!(
            "record_get",
            duration_ms = elapsed_ms(started),
            entity = self.name(),
            found = found.is_some()
        );
        Ok(found)
    }

    async fn filter(&self, query: &Query) -> Result<Vec<Record>> {
        let started = Instant::now();
        log_op_start!(
            "record_filter",
            entity = self.name(),
            conditions = query.conditions().len()
        );

        let records = self.inner.lock().await.filter(query);

        log_op_end!(
            "record_filter",
            duration_ms = elapsed_ms(started),
            entity = self.name(),
            result_len = records.len()
        );
        Ok(records)
    }

    async fn update(&self, id: RecordKey, updates: Fields) -> Result<Option<Record>> {
        let started = Instant::now();
        log_op_start!("record_update", entity = self.name(), record_id = %id);

        let updated = self.inner.lock().await.update(id, updates);

        log_op_end!(
            "record_update",
            duration_ms = elapsed_ms(started),
            entity = self.name(),
            found = updated.is_some()
        );
        Ok(updated)
    }

    async fn update_if(
        &self,
        id: RecordKey,
        expected_version: u64,
        updates: Fields,
    ) -> Result<Option<Record>> {
        let started = Instant::now();
        log_op_start!(
            "record_update_if",
            entity = self.name(),
            record_id = %id,
            expected_version = expected_version
        );

        let outcome = self
            .inner
            .lock()
            .await
            .update_if(id, expected_version, updates);

        match outcome {
            Ok(updated) => {
                log_op_end!(
                    "record_update_if",
                    duration_ms = elapsed_ms(started),
                    entity = self.name(),
                    found = updated.is_some()
                );
                Ok(updated)
            }
            Err(err) => {
                log_op_error!(
                    "record_update_if",
                    err.clone(),
                    duration_ms = elapsed_ms(started),
                    entity = self.name()
                );
                Err(ExError::from(err).with_op("record_update_if"))
            }
        }
    }

    async fn delete(&self, id: RecordKey) -> Result<bool> {
        let started = Instant::now();
        log_op_start!("record_delete", entity = self.name(), record_id = %id);

        let removed = self.inner.lock().await.delete(id);

        log_op_end!(
            "record_delete",
            duration_ms = elapsed_ms(started),
            entity = self.name(),
            removed = removed
        );
        Ok(removed)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.inner.lock().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecohub_core::ExErrorKind;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryStore::new("Challenge");
        let created = store
            .create(Fields::new().with("title", "Zero Waste Week"))
            .await
            .unwrap();

        let fetched = store.get(RecordKey::from("1")).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.name(), "Challenge");
    }

    #[tokio::test]
    async fn test_missing_record_is_soft() {
        let store = MemoryStore::new("Review");
        assert!(store.get(RecordKey::from(5u64)).await.unwrap().is_none());
        assert!(store
            .update(RecordKey::from(5u64), Fields::new())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete(RecordKey::from(5u64)).await.unwrap());
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_update_if_conflict_maps_to_exerror() {
        let store = MemoryStore::new("Message");
        let record = store.create(Fields::new().with("read", false)).await.unwrap();
        store
            .update(RecordKey::from(record.id()), Fields::new().with("read", true))
            .await
            .unwrap();

        let err = store
            .update_if(
                RecordKey::from(record.id()),
                record.version(),
                Fields::new().with("read", false),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Conflict);
        assert_eq!(err.op(), Some("record_update_if"));
        assert_eq!(err.entity(), Some("Message"));

        let current = store.get(RecordKey::from(record.id())).await.unwrap().unwrap();
        assert_eq!(current.get("read"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new("User");
        let other = store.clone();
        store.create(Fields::new()).await.unwrap();
        assert_eq!(other.len().await.unwrap(), 1);
        assert_eq!(other.snapshot().await.len(), 1);
    }
}
