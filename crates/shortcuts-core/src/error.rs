//! Error types shared across the crate.

use thiserror::Error;

use crate::validate::ValidationError;

/// Failures raised by the persistence layer.
///
/// Reads degrade soft (see `ShortcutStore::load`); only writes and explicit
/// validation surface through this type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage: {0}")]
    Storage(String),
    #[error("encode collection: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
