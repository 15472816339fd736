//! `shortcuts update` — patch fields of one shortcut.
//!
//! Passing an empty value to `--description`, `--icon` or `--tags` clears
//! the field; omitting a flag leaves the field untouched. `id` and the
//! creation timestamp can never change.

use shortcuts_core::record::ShortcutKind;
use shortcuts_core::store::ShortcutPatch;
use shortcuts_core::validate::{
    validate_description, validate_icon, validate_tags, validate_title, validate_url,
};

use crate::add::{flag_value, split_tags};
use crate::{CommandOutput, ShortcutsBackend};

const USAGE: &str = "usage: shortcuts update <id> [--title TEXT] [--url URL] [--description TEXT] [--icon ICON] [--type KIND] [--tags a,b,c]";

pub(crate) fn run_update(args: &[&str], backend: &dyn ShortcutsBackend) -> CommandOutput {
    match execute_update(args, backend) {
        Ok(output) => output,
        Err((0, message)) => CommandOutput::success(format!("{message}\n")),
        Err((exit_code, message)) => CommandOutput::failure(exit_code, &message),
    }
}

fn execute_update(
    args: &[&str],
    backend: &dyn ShortcutsBackend,
) -> Result<CommandOutput, (i32, String)> {
    let (id, patch) = parse_update_args(args)?;

    if patch.is_empty() {
        return Err((1, format!("nothing to update\n{USAGE}")));
    }

    let list = backend.load();
    if !list.iter().any(|record| record.id == id) {
        return Err((1, format!("shortcut not found: {id}")));
    }

    backend
        .update(&list, &id, &patch, backend.now_utc())
        .map_err(|e| (1, e))?;

    Ok(CommandOutput::success(String::new()))
}

fn parse_update_args(args: &[&str]) -> Result<(String, ShortcutPatch), (i32, String)> {
    let mut patch = ShortcutPatch::default();
    let mut id: Option<String> = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match *arg {
            "--title" => {
                let title = flag_value(arg, iter.next())?;
                validate_title(&title).map_err(|e| (1, e.to_string()))?;
                patch.title = Some(title);
            }
            "--url" => {
                let url = flag_value(arg, iter.next())?;
                validate_url(&url).map_err(|e| (1, e.to_string()))?;
                patch.url = Some(url);
            }
            "--description" | "-d" => {
                let value = flag_value(arg, iter.next())?;
                if value.is_empty() {
                    patch.description = Some(None);
                } else {
                    validate_description(&value).map_err(|e| (1, e.to_string()))?;
                    patch.description = Some(Some(value));
                }
            }
            "--icon" => {
                let value = flag_value(arg, iter.next())?;
                if value.is_empty() {
                    patch.icon = Some(None);
                } else {
                    validate_icon(&value).map_err(|e| (1, e.to_string()))?;
                    patch.icon = Some(Some(value));
                }
            }
            "--type" => {
                let value = flag_value(arg, iter.next())?;
                patch.kind = Some(ShortcutKind::parse(&value).map_err(|e| (1, e.to_string()))?);
            }
            "--tags" => {
                let value = flag_value(arg, iter.next())?;
                let tags = split_tags(&value);
                if tags.is_empty() {
                    patch.tags = Some(None);
                } else {
                    validate_tags(&tags).map_err(|e| (1, e.to_string()))?;
                    patch.tags = Some(Some(tags));
                }
            }
            "-h" | "--help" => return Err((0, USAGE.to_string())),
            flag if flag.starts_with('-') => {
                return Err((1, format!("unknown flag: {flag}\n{USAGE}")))
            }
            positional => {
                if id.replace(positional.to_string()).is_some() {
                    return Err((1, USAGE.to_string()));
                }
            }
        }
    }

    match id {
        Some(id) => Ok((id, patch)),
        None => Err((1, USAGE.to_string())),
    }
}
