use crate::errors::{EcoHubError, Result};
use crate::model::record::stamp_now;
use crate::model::{Fields, Record, RecordId, RecordKey};
use crate::queries::Query;

/// In-memory record store for one entity type
///
/// Records are kept in insertion order. Ids come from a counter that starts
/// at 1 and only moves forward, so an id is never handed out twice even
/// after its record is deleted.
///
/// Not thread-safe on its own; shared access goes through a wrapper that
/// serialises calls (see `ecohub-store`).
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    records: Vec<Record>,
    next_id: u64,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
            next_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Create a record from `fields`
    ///
    /// Assigns the next id and stamps `created_date` and `updated_date` with
    /// the same instant. Any `id`, `created_date` or `updated_date` among
    /// `fields` is discarded.
    pub fn create(&mut self, fields: Fields) -> Record {
        let id = RecordId::new(self.next_id);
        self.next_id += 1;

        let record = Record::new(id, stamp_now(), fields);
        tracing::debug!(entity = %self.name, record_id = id.get(), "record created");

        self.records.push(record.clone());
        record
    }

    /// Copy of every record, in insertion order
    pub fn all(&self) -> Vec<Record> {
        self.records.clone()
    }

    /// Look up a record; malformed ids are simply not found
    pub fn get(&self, id: impl Into<RecordKey>) -> Option<Record> {
        self.position(&id.into())
            .map(|index| self.records[index].clone())
    }

    /// Filter, sort and limit, in that order
    pub fn filter(&self, query: &Query) -> Vec<Record> {
        query.run(&self.records)
    }

    /// Shallow-merge `updates` into the record and restamp `updated_date`
    ///
    /// Returns `None` (collection untouched) when no record has that id.
    /// `id`, `created_date` and `updated_date` in `updates` are ignored.
    pub fn update(&mut self, id: impl Into<RecordKey>, updates: Fields) -> Option<Record> {
        let index = self.position(&id.into())?;
        Some(self.update_at(index, updates))
    }

    /// Compare-and-swap update against the record's version
    ///
    /// Returns `Ok(None)` when the record does not exist.
    ///
    /// # Errors
    ///
    /// Returns `VersionConflict` if the record's current version differs from
    /// `expected_version`; the record is left unchanged.
    pub fn update_if(
        &mut self,
        id: impl Into<RecordKey>,
        expected_version: u64,
        updates: Fields,
    ) -> Result<Option<Record>> {
        let Some(index) = self.position(&id.into()) else {
            return Ok(None);
        };

        let current = &self.records[index];
        if current.version() != expected_version {
            return Err(EcoHubError::VersionConflict {
                entity: self.name.clone(),
                id: current.id().get(),
                expected: expected_version,
                actual: current.version(),
            });
        }

        Ok(Some(self.update_at(index, updates)))
    }

    /// Remove a record, keeping the order of the rest
    ///
    /// Returns whether a record was removed.
    pub fn delete(&mut self, id: impl Into<RecordKey>) -> bool {
        match self.position(&id.into()) {
            Some(index) => {
                let removed = self.records.remove(index);
                tracing::debug!(entity = %self.name, record_id = removed.id().get(), "record deleted");
                true
            }
            None => false,
        }
    }

    fn update_at(&mut self, index: usize, updates: Fields) -> Record {
        let record = &mut self.records[index];
        record.apply_update(updates, stamp_now());
        tracing::debug!(
            entity = %self.name,
            record_id = record.id().get(),
            version = record.version(),
            "record updated"
        );
        record.clone()
    }

    fn position(&self, key: &RecordKey) -> Option<usize> {
        let id = key.resolve()?;
        // Ids are assigned in increasing order and records are only appended
        // or removed, so the vector stays sorted by id.
        self.records.binary_search_by_key(&id, Record::id).ok()
    }
}
