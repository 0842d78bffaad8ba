//! EcoDesign Hub core: schema-less in-memory record store
//!
//! This crate provides the synchronous data plane:
//! - `Record` / `Fields`: open field mappings plus store-assigned id and timestamps
//! - `Collection`: create, get, filter-sort-limit, merge-update, delete
//! - `Query` / `OrderBy`: exact-match conditions with a total sort order
//! - `Registry`: one collection per `EntityKind`
//! - `Command` + `apply()`: functional-boundary mutations and atomic batches
//! - Error and logging facilities shared by the other crates

pub mod apply;
pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;

pub use ecohub_core_types as types;

pub use apply::{apply, apply_all};
pub use commands::{Applied, Command};
pub use errors::{EcoHubError, ExError, ExErrorKind, Result};
pub use model::{EntityKind, Fields, Record, RecordId, RecordKey};
pub use ops::{Collection, Registry};
pub use queries::{OrderBy, Query, SortDirection};
