//! `shortcuts add` — validate and prepend one shortcut.

use shortcuts_core::record::{ShortcutKind, ShortcutRecord};
use shortcuts_core::validate::{validate_input, ShortcutInput};

use crate::{CommandOutput, ShortcutsBackend};

const USAGE: &str = "usage: shortcuts add <title> <url> [--description TEXT] [--icon ICON] [--type link|app|doc|dashboard|other] [--tags a,b,c]";

pub(crate) fn run_add(args: &[&str], backend: &dyn ShortcutsBackend) -> CommandOutput {
    match execute_add(args, backend) {
        Ok(output) => output,
        Err((0, message)) => CommandOutput::success(format!("{message}\n")),
        Err((exit_code, message)) => CommandOutput::failure(exit_code, &message),
    }
}

#[derive(Debug, Default)]
struct AddArgs {
    title: String,
    url: String,
    description: Option<String>,
    icon: Option<String>,
    kind: Option<String>,
    tags: Option<String>,
}

fn execute_add(
    args: &[&str],
    backend: &dyn ShortcutsBackend,
) -> Result<CommandOutput, (i32, String)> {
    let parsed = parse_add_args(args)?;

    let kind = match parsed.kind.as_deref() {
        Some(value) => ShortcutKind::parse(value).map_err(|e| (1, e.to_string()))?,
        None => ShortcutKind::default(),
    };
    let tags = parsed
        .tags
        .as_deref()
        .map(split_tags)
        .filter(|tags| !tags.is_empty());

    let input = ShortcutInput {
        title: parsed.title,
        url: parsed.url,
        description: parsed.description,
        icon: parsed.icon,
        kind,
        tags,
    };
    validate_input(&input).map_err(|e| (1, e.to_string()))?;

    let record = ShortcutRecord::from_input(input, backend.now_utc());
    let id = record.id.clone();

    let list = backend.load();
    backend.add(&list, record).map_err(|e| (1, e))?;

    Ok(CommandOutput::success(format!("{id}\n")))
}

fn parse_add_args(args: &[&str]) -> Result<AddArgs, (i32, String)> {
    let mut parsed = AddArgs::default();
    let mut positionals: Vec<&str> = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match *arg {
            "--description" | "-d" => parsed.description = Some(flag_value(arg, iter.next())?),
            "--icon" => parsed.icon = Some(flag_value(arg, iter.next())?),
            "--type" => parsed.kind = Some(flag_value(arg, iter.next())?),
            "--tags" => parsed.tags = Some(flag_value(arg, iter.next())?),
            "-h" | "--help" => return Err((0, USAGE.to_string())),
            flag if flag.starts_with('-') => {
                return Err((1, format!("unknown flag: {flag}\n{USAGE}")))
            }
            positional => positionals.push(positional),
        }
    }

    match positionals.as_slice() {
        [title, url] => {
            parsed.title = (*title).to_string();
            parsed.url = (*url).to_string();
            Ok(parsed)
        }
        _ => Err((1, USAGE.to_string())),
    }
}

pub(crate) fn flag_value(flag: &str, value: Option<&&str>) -> Result<String, (i32, String)> {
    value
        .map(|v| (*v).to_string())
        .ok_or_else(|| (1, format!("flag {flag} requires a value")))
}

/// Split a comma-separated tag list, trimming entries and dropping empties.
pub(crate) fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
