//! `shortcuts list` and `shortcuts tags` — read-only views over the
//! collection with the search/filter semantics of the interactive UI.

use std::collections::BTreeSet;
use std::io::Write;

use shortcuts_core::record::ShortcutRecord;
use tabwriter::TabWriter;

use crate::add::flag_value;
use crate::{CommandOutput, ShortcutsBackend};

const USAGE: &str = "usage: shortcuts list [--query TEXT] [--tag TAG]... [--json]";

pub(crate) fn run_list(args: &[&str], backend: &dyn ShortcutsBackend) -> CommandOutput {
    match execute_list(args, backend) {
        Ok(output) => output,
        Err((0, message)) => CommandOutput::success(format!("{message}\n")),
        Err((exit_code, message)) => CommandOutput::failure(exit_code, &message),
    }
}

#[derive(Debug, Default)]
struct ListArgs {
    json: bool,
    query: Option<String>,
    tags: Vec<String>,
}

fn execute_list(
    args: &[&str],
    backend: &dyn ShortcutsBackend,
) -> Result<CommandOutput, (i32, String)> {
    let parsed = parse_list_args(args)?;
    let list = backend.load();

    let query = parsed
        .query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .unwrap_or_default();

    let filtered: Vec<&ShortcutRecord> = list
        .iter()
        .filter(|record| matches_query(record, &query) && matches_tags(record, &parsed.tags))
        .collect();

    if parsed.json {
        let json =
            serde_json::to_string_pretty(&filtered).map_err(|e| (1, format!("encode: {e}")))?;
        return Ok(CommandOutput::success(format!("{json}\n")));
    }

    if filtered.is_empty() {
        return Ok(CommandOutput::success("no shortcuts\n".to_string()));
    }

    let table = render_table(&filtered).map_err(|e| (1, e))?;
    Ok(CommandOutput::success(table))
}

fn parse_list_args(args: &[&str]) -> Result<ListArgs, (i32, String)> {
    let mut parsed = ListArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match *arg {
            "--json" => parsed.json = true,
            "--query" | "-q" => parsed.query = Some(flag_value(arg, iter.next())?),
            "--tag" => parsed.tags.push(flag_value(arg, iter.next())?),
            "-h" | "--help" => return Err((0, USAGE.to_string())),
            other => return Err((1, format!("unknown argument: {other}\n{USAGE}"))),
        }
    }
    Ok(parsed)
}

/// Case-insensitive substring match over title, description, url and tags.
/// An empty query matches everything.
fn matches_query(record: &ShortcutRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    record.title.to_lowercase().contains(query)
        || record
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query))
        || record.url.to_lowercase().contains(query)
        || record
            .tags
            .as_deref()
            .is_some_and(|tags| tags.iter().any(|t| t.to_lowercase().contains(query)))
}

/// The record must carry every active tag (exact match).
fn matches_tags(record: &ShortcutRecord, active: &[String]) -> bool {
    if active.is_empty() {
        return true;
    }
    record
        .tags
        .as_deref()
        .is_some_and(|tags| active.iter().all(|wanted| tags.contains(wanted)))
}

fn render_table(records: &[&ShortcutRecord]) -> Result<String, String> {
    let mut tw = TabWriter::new(Vec::new());
    writeln!(tw, "ID\tTITLE\tURL\tTYPE\tTAGS").map_err(|e| format!("render table: {e}"))?;
    for record in records {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}",
            record.id,
            record.title,
            record.url,
            record.kind.as_str(),
            record.tags.as_deref().unwrap_or_default().join(",")
        )
        .map_err(|e| format!("render table: {e}"))?;
    }
    tw.flush().map_err(|e| format!("render table: {e}"))?;
    let bytes = tw
        .into_inner()
        .map_err(|e| format!("render table: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("render table: {e}"))
}

pub(crate) fn run_tags(args: &[&str], backend: &dyn ShortcutsBackend) -> CommandOutput {
    let json = match args {
        [] => false,
        ["--json"] => true,
        ["-h"] | ["--help"] => {
            return CommandOutput::success("usage: shortcuts tags [--json]\n".to_string())
        }
        other => {
            return CommandOutput::failure(
                1,
                &format!("unknown argument: {}", other.join(" ")),
            )
        }
    };

    let list = backend.load();
    let mut tags: BTreeSet<String> = BTreeSet::new();
    for record in &list {
        for tag in record.tags.as_deref().unwrap_or_default() {
            tags.insert(tag.clone());
        }
    }

    if json {
        let sorted: Vec<&String> = tags.iter().collect();
        return match serde_json::to_string(&sorted) {
            Ok(json) => CommandOutput::success(format!("{json}\n")),
            Err(e) => CommandOutput::failure(1, &format!("encode: {e}")),
        };
    }

    let mut out = String::new();
    for tag in &tags {
        out.push_str(tag);
        out.push('\n');
    }
    CommandOutput::success(out)
}
