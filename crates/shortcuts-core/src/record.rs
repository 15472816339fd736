//! The shortcut record: the sole persisted entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{ShortcutInput, ValidationError};

/// Coarse classification of a shortcut target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutKind {
    #[default]
    Link,
    App,
    Doc,
    Dashboard,
    Other,
}

impl ShortcutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::App => "app",
            Self::Doc => "doc",
            Self::Dashboard => "dashboard",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "link" => Ok(Self::Link),
            "app" => Ok(Self::App),
            "doc" => Ok(Self::Doc),
            "dashboard" => Ok(Self::Dashboard),
            "other" => Ok(Self::Other),
            other => Err(ValidationError::Kind(other.to_string())),
        }
    }
}

/// One shortcut entry.
///
/// The wire shape is camelCase JSON with `type` carrying the kind. Stored
/// elements may carry fields this revision does not know about; they are
/// captured in `extra` and re-emitted on save rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ShortcutKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ShortcutRecord {
    /// Build a fresh record from validated input. The id is generated and
    /// `created_at` is set once; neither mutates afterwards.
    pub fn from_input(input: ShortcutInput, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            title: input.title,
            url: input.url,
            description: input.description,
            icon: input.icon,
            kind: input.kind,
            tags: input.tags,
            created_at: now,
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Generate a unique record id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Render-time test distinguishing an image-URL icon from a glyph icon.
pub fn icon_is_url(icon: &str) -> bool {
    icon.starts_with("http://") || icon.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            ShortcutKind::Link,
            ShortcutKind::App,
            ShortcutKind::Doc,
            ShortcutKind::Dashboard,
            ShortcutKind::Other,
        ] {
            assert_eq!(ShortcutKind::parse(kind.as_str()), Ok(kind));
        }
    }

    #[test]
    fn kind_rejects_unknown() {
        assert!(ShortcutKind::parse("bookmark").is_err());
        assert!(ShortcutKind::parse("").is_err());
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&ShortcutKind::Dashboard).unwrap_or_default();
        assert_eq!(json, "\"dashboard\"");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn icon_prefix_test() {
        assert!(icon_is_url("https://example.com/favicon.ico"));
        assert!(icon_is_url("http://example.com/x.png"));
        assert!(!icon_is_url("📎"));
        assert!(!icon_is_url("httpish"));
    }
}
