//! CSV transcoder: semicolon-delimited export and tolerant import.
//!
//! The format is deliberately not RFC-4180: the field delimiter is `;` so
//! comma-joined tag lists stay unquoted, quoting itself follows the usual
//! double-quote rules, and output carries a UTF-8 BOM for spreadsheet
//! tools.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::record::{generate_id, ShortcutKind, ShortcutRecord};

/// Export column order; also the header row.
pub const CSV_HEADERS: [&str; 5] = ["title", "url", "description", "tags", "icon"];

const BOM: char = '\u{feff}';

/// Aggregate import outcome. `imported` counts rows accepted by
/// validation, before URL deduplication collapses them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Serialize a collection to CSV text.
pub fn serialize(list: &[ShortcutRecord]) -> String {
    let mut rows = Vec::with_capacity(list.len() + 1);
    rows.push(CSV_HEADERS.join(";"));

    for record in list {
        let tags = record.tags.as_deref().unwrap_or_default().join(",");
        let fields = [
            record.title.as_str(),
            record.url.as_str(),
            record.description.as_deref().unwrap_or(""),
            tags.as_str(),
            record.icon.as_deref().unwrap_or(""),
        ];
        let row: Vec<String> = fields.iter().map(|field| escape_field(field)).collect();
        rows.push(row.join(";"));
    }

    format!("{BOM}{}", rows.join("\n"))
}

/// Quote a field when it contains the delimiter, a quote or a line break;
/// internal quotes are doubled.
fn escape_field(value: &str) -> String {
    if value.contains([';', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Prefix `https://` when the trimmed value carries no `http(s)://`
/// scheme (case-insensitive check, rest of the value untouched).
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn has_http_scheme(value: &str) -> bool {
    let head: String = value.chars().take(8).collect::<String>().to_lowercase();
    head.starts_with("http://") || head.starts_with("https://")
}

/// Parse CSV text into a replacement collection plus counters.
///
/// Accepted rows are deduplicated by lower-cased, scheme-stripped
/// normalized URL, later rows overwriting earlier ones in place. The
/// result wholly supersedes the caller's collection; merging is the
/// caller's decision. Every record gets a fresh id and
/// `created_at == updated_at == now`.
pub fn parse(text: &str, now: DateTime<Utc>) -> (Vec<ShortcutRecord>, ImportSummary) {
    let rows = split_rows(text);
    let mut summary = ImportSummary::default();
    if rows.is_empty() {
        return (Vec::new(), summary);
    }

    let first: Vec<String> = rows[0].iter().map(|field| field.to_lowercase()).collect();
    let has_header = first.iter().any(|f| f.as_str() == "title")
        && first.iter().any(|f| f.as_str() == "url");
    let header = has_header.then_some(first.as_slice());

    let col_title = resolve_column(header, "title", 0);
    let col_url = resolve_column(header, "url", 1);
    let col_description = resolve_column(header, "description", 2);
    let col_tags = resolve_column(header, "tags", 3);
    let col_icon = resolve_column(header, "icon", 4);

    let start = usize::from(has_header);
    let mut by_url: IndexMap<String, ShortcutRecord> = IndexMap::new();

    for row in rows.iter().skip(start) {
        let title = field_at(row, col_title).trim();
        let url = normalize_url(field_at(row, col_url));

        if title.is_empty() || url.is_empty() {
            summary.skipped += 1;
            continue;
        }

        let description = field_at(row, col_description).trim();
        let icon = field_at(row, col_icon).trim();
        let tags: Vec<String> = field_at(row, col_tags)
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        let record = ShortcutRecord {
            id: generate_id(),
            title: title.to_string(),
            url: url.clone(),
            description: (!description.is_empty()).then(|| description.to_string()),
            icon: (!icon.is_empty()).then(|| icon.to_string()),
            kind: ShortcutKind::default(),
            tags: (!tags.is_empty()).then_some(tags),
            created_at: now,
            updated_at: Some(now),
            extra: serde_json::Map::new(),
        };

        by_url.insert(dedup_key(&url), record);
        summary.imported += 1;
    }

    (by_url.into_values().collect(), summary)
}

/// Dedup key for an accepted row: the lower-cased normalized URL with the
/// scheme stripped, so `http://` and `https://` duplicates of the same
/// location collapse.
fn dedup_key(url: &str) -> String {
    let lower = url.to_lowercase();
    lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower)
        .to_string()
}

/// Resolve a column by header name, falling back to the positional slot
/// when no header row was detected. A header that lacks the name maps the
/// column to nothing (fields read as empty).
fn resolve_column(header: Option<&[String]>, name: &str, fallback: usize) -> Option<usize> {
    match header {
        Some(fields) => fields.iter().position(|f| f.as_str() == name),
        None => Some(fallback),
    }
}

fn field_at(row: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|index| row.get(index))
        .map(String::as_str)
        .unwrap_or("")
}

/// Tokenizer state for the quote-aware scan.
enum ScanState {
    Unquoted,
    Quoted,
    QuotedSeenQuote,
}

/// Split text into rows of trimmed fields.
///
/// One leading BOM is stripped, line endings are normalized, and blank
/// lines are dropped. Inside a quoted span a doubled quote is a literal
/// quote and delimiters/newlines are field content, so quoted fields may
/// span physical lines.
fn split_rows(text: &str) -> Vec<Vec<String>> {
    let body = text.strip_prefix(BOM).unwrap_or(text);
    let normalized = body.replace("\r\n", "\n").replace('\r', "\n");

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Unquoted;

    let push_field = |fields: &mut Vec<String>, current: &mut String| {
        fields.push(std::mem::take(current).trim().to_string());
    };
    let finish_row = |rows: &mut Vec<Vec<String>>, fields: &mut Vec<String>| {
        let row = std::mem::take(fields);
        // A row holding one empty field came from a blank line.
        if !(row.len() == 1 && row[0].is_empty()) {
            rows.push(row);
        }
    };

    for ch in normalized.chars() {
        match state {
            ScanState::Unquoted => match ch {
                '"' => state = ScanState::Quoted,
                ';' => push_field(&mut fields, &mut current),
                '\n' => {
                    push_field(&mut fields, &mut current);
                    finish_row(&mut rows, &mut fields);
                }
                _ => current.push(ch),
            },
            ScanState::Quoted => match ch {
                '"' => state = ScanState::QuotedSeenQuote,
                _ => current.push(ch),
            },
            ScanState::QuotedSeenQuote => match ch {
                '"' => {
                    current.push('"');
                    state = ScanState::Quoted;
                }
                ';' => {
                    push_field(&mut fields, &mut current);
                    state = ScanState::Unquoted;
                }
                '\n' => {
                    push_field(&mut fields, &mut current);
                    finish_row(&mut rows, &mut fields);
                    state = ScanState::Unquoted;
                }
                _ => {
                    current.push(ch);
                    state = ScanState::Unquoted;
                }
            },
        }
    }

    if !fields.is_empty() || !current.is_empty() {
        push_field(&mut fields, &mut current);
        finish_row(&mut rows, &mut fields);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_leaves_plain_fields_bare() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("has,comma"), "has,comma");
    }

    #[test]
    fn escape_quotes_delimiter_and_quote() {
        assert_eq!(escape_field("a;b"), "\"a;b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn normalize_url_prefixes_missing_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
    }

    #[test]
    fn normalize_url_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://x.com"), "http://x.com");
        assert_eq!(normalize_url("HTTPS://X.COM"), "HTTPS://X.COM");
    }

    #[test]
    fn normalize_url_empty() {
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn split_rows_basic() {
        let rows = split_rows("a;b;c\nd;e;f");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn split_rows_drops_blank_lines() {
        let rows = split_rows("a;b\n\n   \nc;d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn split_rows_handles_quotes() {
        let rows = split_rows("\"a;b\";\"say \"\"hi\"\"\";plain");
        assert_eq!(rows, vec![vec!["a;b", "say \"hi\"", "plain"]]);
    }

    #[test]
    fn split_rows_quoted_newline_stays_in_field() {
        let rows = split_rows("\"two\nlines\";x");
        assert_eq!(rows, vec![vec!["two\nlines", "x"]]);
    }

    #[test]
    fn split_rows_normalizes_line_endings() {
        let rows = split_rows("a;b\r\nc;d\re;f");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"], vec!["e", "f"]]);
    }

    #[test]
    fn split_rows_strips_leading_bom() {
        let rows = split_rows("\u{feff}title;url");
        assert_eq!(rows, vec![vec!["title", "url"]]);
    }

    #[test]
    fn split_rows_trims_fields() {
        let rows = split_rows("  a  ;  b  ");
        assert_eq!(rows, vec![vec!["a", "b"]]);
    }
}
