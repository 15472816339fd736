//! Persistence store: the canonical shortcut collection behind a fixed
//! storage key.
//!
//! Every mutator persists synchronously and returns the new list; callers
//! must adopt the returned list and discard their prior reference.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::StoreError;
use crate::record::{ShortcutKind, ShortcutRecord};
use crate::storage::StoragePort;

/// Fixed key for the serialized collection. The shape is unversioned; a
/// breaking schema change would need a new key.
pub const STORAGE_KEY: &str = "shortcuts:v1";

/// Partial update applied by [`ShortcutStore::update`].
///
/// `id` and `created_at` are excluded by construction. Outer `None` leaves
/// a field untouched; for the optional fields, `Some(None)` clears.
#[derive(Debug, Clone, Default)]
pub struct ShortcutPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<Option<String>>,
    pub icon: Option<Option<String>>,
    pub kind: Option<ShortcutKind>,
    pub tags: Option<Option<Vec<String>>>,
}

impl ShortcutPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.icon.is_none()
            && self.kind.is_none()
            && self.tags.is_none()
    }

    fn apply(&self, record: &mut ShortcutRecord) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(url) = &self.url {
            record.url = url.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(icon) = &self.icon {
            record.icon = icon.clone();
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(tags) = &self.tags {
            record.tags = tags.clone();
        }
    }
}

/// Store over an injected [`StoragePort`], keyed at [`STORAGE_KEY`].
pub struct ShortcutStore {
    port: Box<dyn StoragePort>,
    key: String,
}

impl ShortcutStore {
    pub fn new(port: Box<dyn StoragePort>) -> Self {
        Self::with_key(port, STORAGE_KEY)
    }

    pub fn with_key(port: Box<dyn StoragePort>, key: &str) -> Self {
        Self {
            port,
            key: key.to_string(),
        }
    }

    /// Load the collection. Never raises: a missing, corrupt or non-array
    /// blob yields the empty list, and elements lacking a string
    /// `id`/`title`/`url` are dropped. Surplus fields on surviving
    /// elements pass through untouched (no re-validation, no repair).
    pub fn load(&self) -> Vec<ShortcutRecord> {
        let raw = match self.port.read(&self.key) {
            Ok(Some(raw)) => raw,
            _ => return Vec::new(),
        };
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(_) => return Vec::new(),
        };
        let Value::Array(items) = parsed else {
            return Vec::new();
        };
        items
            .into_iter()
            .filter(has_required_shape)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()
    }

    /// Serialize the full list and overwrite the slot. Last writer wins.
    pub fn save(&self, list: &[ShortcutRecord]) -> Result<(), StoreError> {
        let data = serde_json::to_string(list)?;
        self.port.write(&self.key, &data)
    }

    /// Prepend `record` (newest-first order), persist, return the new list.
    pub fn add(
        &self,
        list: &[ShortcutRecord],
        record: ShortcutRecord,
    ) -> Result<Vec<ShortcutRecord>, StoreError> {
        let mut next = Vec::with_capacity(list.len() + 1);
        next.push(record);
        next.extend_from_slice(list);
        self.save(&next)?;
        Ok(next)
    }

    /// Drop the record with `id`, persist, return the new list. Unknown
    /// ids persist the unchanged list.
    pub fn remove(
        &self,
        list: &[ShortcutRecord],
        id: &str,
    ) -> Result<Vec<ShortcutRecord>, StoreError> {
        let next: Vec<ShortcutRecord> =
            list.iter().filter(|record| record.id != id).cloned().collect();
        self.save(&next)?;
        Ok(next)
    }

    /// Shallow-merge `patch` over the record with `id` and stamp
    /// `updated_at = now`. `id` and `created_at` cannot change. Unknown
    /// ids persist the unchanged list.
    pub fn update(
        &self,
        list: &[ShortcutRecord],
        id: &str,
        patch: &ShortcutPatch,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShortcutRecord>, StoreError> {
        let next: Vec<ShortcutRecord> = list
            .iter()
            .map(|record| {
                if record.id != id {
                    return record.clone();
                }
                let mut merged = record.clone();
                patch.apply(&mut merged);
                merged.updated_at = Some(now);
                merged
            })
            .collect();
        self.save(&next)?;
        Ok(next)
    }

    /// Delete the slot entirely.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.port.remove(&self.key)
    }
}

/// Minimal shape filter applied on load: string `id`, `title` and `url`.
fn has_required_shape(value: &Value) -> bool {
    value.get("id").is_some_and(Value::is_string)
        && value.get("title").is_some_and(Value::is_string)
        && value.get("url").is_some_and(Value::is_string)
}
