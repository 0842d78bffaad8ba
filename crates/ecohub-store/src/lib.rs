//! EcoDesign Hub store: async service facade and seed import
//!
//! Provides:
//! - `RecordStore`: async calling convention over the record store operations
//! - `MemoryStore`: one `Collection` behind a per-collection mutex
//! - `EntityHub`: one store per entity type, built once at start-up
//! - Seed format v0 parser, digest and importer

pub mod errors;
pub mod hub;
pub mod memory;
pub mod record_store;
pub mod seed;

// Re-export key types
pub use errors::Result;
pub use hub::EntityHub;
pub use memory::MemoryStore;
pub use record_store::RecordStore;
