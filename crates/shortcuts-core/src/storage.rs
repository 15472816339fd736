//! Storage ports: read/write a string blob by key.
//!
//! The store never touches a backend directly; it is handed a port so
//! tests (and embedders) can run against an in-memory slot.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// A durable key-value slot for string blobs.
pub trait StoragePort {
    /// Read the blob at `key`. Missing slots are `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Overwrite the blob at `key` unconditionally.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Delete the slot at `key`. Deleting a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory port for tests and ephemeral embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a slot, bypassing the store. Used to stage corrupt or
    /// foreign blobs in tests.
    pub fn seed(&self, key: &str, value: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

/// Filesystem port: one file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a slot key to a file path. Key characters outside
    /// `[A-Za-z0-9._-]` are replaced so keys like `shortcuts:v1` stay
    /// portable filenames.
    fn slot_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl StoragePort for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Storage(format!("read slot: {err}"))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .map_err(|err| StoreError::Storage(format!("create storage dir: {err}")))?;
        fs::write(self.slot_path(key), value)
            .map_err(|err| StoreError::Storage(format!("write slot: {err}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Storage(format!("remove slot: {err}"))),
        }
    }
}
