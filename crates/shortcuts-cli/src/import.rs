//! `shortcuts import` — replace the stored collection from a CSV file.
//!
//! A file-read failure is the one hard failure in the core flow: it
//! aborts before anything is written, leaving the collection untouched.

use shortcuts_core::csv;

use crate::{CommandOutput, ShortcutsBackend};

const USAGE: &str = "usage: shortcuts import <file> [--json]";

pub(crate) fn run_import(args: &[&str], backend: &dyn ShortcutsBackend) -> CommandOutput {
    match execute_import(args, backend) {
        Ok(output) => output,
        Err((0, message)) => CommandOutput::success(format!("{message}\n")),
        Err((exit_code, message)) => CommandOutput::failure(exit_code, &message),
    }
}

fn execute_import(
    args: &[&str],
    backend: &dyn ShortcutsBackend,
) -> Result<CommandOutput, (i32, String)> {
    let (path, json) = match args {
        ["-h"] | ["--help"] => return Err((0, USAGE.to_string())),
        [path] => (*path, false),
        [path, "--json"] | ["--json", path] => (*path, true),
        _ => return Err((1, USAGE.to_string())),
    };

    let text = backend.read_file(path).map_err(|e| (1, e))?;
    let (records, summary) = csv::parse(&text, backend.now_utc());

    // Wholesale replace: the parsed list supersedes the stored collection.
    backend.save(&records).map_err(|e| (1, e))?;

    if json {
        let encoded = serde_json::to_string(&summary).map_err(|e| (1, format!("encode: {e}")))?;
        return Ok(CommandOutput::success(format!("{encoded}\n")));
    }
    Ok(CommandOutput::success(format!(
        "imported {} rows, skipped {} ({} shortcuts stored)\n",
        summary.imported,
        summary.skipped,
        records.len()
    )))
}
