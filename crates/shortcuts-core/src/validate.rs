//! Field-level validation for user-entered shortcut input.
//!
//! This is the contract consumed by the interactive surface (add/update).
//! CSV import deliberately does not go through it; import has its own,
//! looser acceptance rules in [`crate::csv`].

use thiserror::Error;
use url::Url;

use crate::record::ShortcutKind;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MAX_URL_CHARS: usize = 2048;
pub const MAX_ICON_CHARS: usize = 256;
pub const MAX_TAGS: usize = 10;
pub const MAX_TAG_CHARS: usize = 30;

/// Structured rejection. Callers render it as a single message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must be 1-{MAX_TITLE_CHARS} characters")]
    Title,
    #[error("description exceeds {MAX_DESCRIPTION_CHARS} characters")]
    Description,
    #[error("url must be a valid absolute URL")]
    UrlInvalid,
    #[error("url exceeds {MAX_URL_CHARS} characters")]
    UrlTooLong,
    #[error("url scheme not allowed")]
    UrlScheme,
    #[error("icon exceeds {MAX_ICON_CHARS} characters")]
    Icon,
    #[error("at most {MAX_TAGS} tags allowed")]
    TooManyTags,
    #[error("invalid tag: {0}")]
    Tag(String),
    #[error("invalid type: {0}")]
    Kind(String),
}

/// User-editable fields of a shortcut. Ids and timestamps are generated by
/// the store side, never entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutInput {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub kind: ShortcutKind,
    pub tags: Option<Vec<String>>,
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len == 0 || len > MAX_TITLE_CHARS {
        return Err(ValidationError::Title);
    }
    Ok(())
}

/// Accept absolute URLs only, length-capped, with script-injection
/// schemes rejected.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.chars().count() > MAX_URL_CHARS {
        return Err(ValidationError::UrlTooLong);
    }
    let parsed = Url::parse(url).map_err(|_| ValidationError::UrlInvalid)?;
    if parsed.scheme().eq_ignore_ascii_case("javascript") {
        return Err(ValidationError::UrlScheme);
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::Description);
    }
    Ok(())
}

pub fn validate_icon(icon: &str) -> Result<(), ValidationError> {
    if icon.chars().count() > MAX_ICON_CHARS {
        return Err(ValidationError::Icon);
    }
    Ok(())
}

/// Tags are bounded in count and per-tag length; duplicates are allowed.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::TooManyTags);
    }
    for tag in tags {
        let len = tag.chars().count();
        if len == 0 || len > MAX_TAG_CHARS {
            return Err(ValidationError::Tag(tag.clone()));
        }
    }
    Ok(())
}

/// Full accept/reject predicate over one input object.
pub fn validate_input(input: &ShortcutInput) -> Result<(), ValidationError> {
    validate_title(&input.title)?;
    validate_url(&input.url)?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    if let Some(icon) = &input.icon {
        validate_icon(icon)?;
    }
    if let Some(tags) = &input.tags {
        validate_tags(tags)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bounds() {
        assert!(validate_title("a").is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_CHARS)).is_ok());
        assert_eq!(validate_title(""), Err(ValidationError::Title));
        assert_eq!(
            validate_title(&"x".repeat(MAX_TITLE_CHARS + 1)),
            Err(ValidationError::Title)
        );
    }

    #[test]
    fn url_accepts_absolute() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1").is_ok());
        assert!(validate_url("HTTPS://X.COM").is_ok());
    }

    #[test]
    fn url_rejects_relative() {
        assert_eq!(validate_url("example.com"), Err(ValidationError::UrlInvalid));
        assert_eq!(validate_url("/path/only"), Err(ValidationError::UrlInvalid));
        assert_eq!(validate_url(""), Err(ValidationError::UrlInvalid));
    }

    #[test]
    fn url_rejects_script_scheme() {
        assert_eq!(
            validate_url("javascript:alert(1)"),
            Err(ValidationError::UrlScheme)
        );
        assert_eq!(
            validate_url("JavaScript:alert(1)"),
            Err(ValidationError::UrlScheme)
        );
    }

    #[test]
    fn url_length_cap() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_CHARS));
        assert_eq!(validate_url(&long), Err(ValidationError::UrlTooLong));
    }

    #[test]
    fn description_and_icon_caps() {
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_CHARS)).is_ok());
        assert_eq!(
            validate_description(&"d".repeat(MAX_DESCRIPTION_CHARS + 1)),
            Err(ValidationError::Description)
        );
        assert!(validate_icon("📎").is_ok());
        assert_eq!(
            validate_icon(&"i".repeat(MAX_ICON_CHARS + 1)),
            Err(ValidationError::Icon)
        );
    }

    #[test]
    fn tag_bounds() {
        assert!(validate_tags(&["work".to_string(), "docs".to_string()]).is_ok());

        let many: Vec<String> = (0..MAX_TAGS + 1).map(|i| format!("tag-{i}")).collect();
        assert_eq!(validate_tags(&many), Err(ValidationError::TooManyTags));

        assert_eq!(
            validate_tags(&[String::new()]),
            Err(ValidationError::Tag(String::new()))
        );
        let long = "t".repeat(MAX_TAG_CHARS + 1);
        assert_eq!(
            validate_tags(&[long.clone()]),
            Err(ValidationError::Tag(long))
        );
    }

    #[test]
    fn duplicate_tags_are_allowed() {
        assert!(validate_tags(&["dup".to_string(), "dup".to_string()]).is_ok());
    }

    #[test]
    fn input_accepts_minimal() {
        let input = ShortcutInput {
            title: "Docs".to_string(),
            url: "https://example.com".to_string(),
            ..Default::default()
        };
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn input_checks_optional_fields() {
        let input = ShortcutInput {
            title: "Docs".to_string(),
            url: "https://example.com".to_string(),
            description: Some("d".repeat(MAX_DESCRIPTION_CHARS + 1)),
            ..Default::default()
        };
        assert_eq!(validate_input(&input), Err(ValidationError::Description));
    }
}
