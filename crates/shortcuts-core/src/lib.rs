//! shortcuts-core: a local shortcut collection with durable persistence
//! and semicolon-CSV import/export.
//!
//! The store owns the canonical collection, serialized as a single JSON
//! blob behind an injected [`storage::StoragePort`]. The CSV transcoder is
//! a stateless pair of pure functions over the in-memory collection.

pub mod csv;
pub mod error;
pub mod record;
pub mod storage;
pub mod store;
pub mod validate;
