//! Async record store contract
//!
//! Semantics match `ecohub_core::Collection`: missing records are `None` or
//! `false`, never an error. The `Result` wrapper leaves room for backends
//! whose calls can fail (I/O, remote services).

use crate::errors::Result;
use async_trait::async_trait;
use ecohub_core::{Fields, Query, Record, RecordKey};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Entity type name of the underlying collection
    fn name(&self) -> &str;

    async fn create(&self, fields: Fields) -> Result<Record>;

    /// Snapshot of every record in insertion order
    async fn all(&self) -> Result<Vec<Record>>;

    async fn get(&self, id: RecordKey) -> Result<Option<Record>>;

    async fn filter(&self, query: &Query) -> Result<Vec<Record>>;

    /// Merge `updates` into an existing record
    async fn update(&self, id: RecordKey, updates: Fields) -> Result<Option<Record>>;

    /// Merge `updates` only if the record is still at `expected_version`
    ///
    /// # Errors
    ///
    /// Returns an `ERR_CONFLICT` error when the version has moved on.
    async fn update_if(
        &self,
        id: RecordKey,
        expected_version: u64,
        updates: Fields,
    ) -> Result<Option<Record>>;

    async fn delete(&self, id: RecordKey) -> Result<bool>;

    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
