//! `shortcuts export` — write the collection as semicolon CSV.

use shortcuts_core::csv;

use crate::{CommandOutput, ShortcutsBackend};

const USAGE: &str = "usage: shortcuts export [file|-]";
const DEFAULT_FILE: &str = "shortcuts.csv";

pub(crate) fn run_export(args: &[&str], backend: &dyn ShortcutsBackend) -> CommandOutput {
    match execute_export(args, backend) {
        Ok(output) => output,
        Err((0, message)) => CommandOutput::success(format!("{message}\n")),
        Err((exit_code, message)) => CommandOutput::failure(exit_code, &message),
    }
}

fn execute_export(
    args: &[&str],
    backend: &dyn ShortcutsBackend,
) -> Result<CommandOutput, (i32, String)> {
    let target = match args {
        ["-h"] | ["--help"] => return Err((0, USAGE.to_string())),
        [] => DEFAULT_FILE,
        [path] => *path,
        _ => return Err((1, USAGE.to_string())),
    };

    let list = backend.load();
    let text = csv::serialize(&list);

    if target == "-" {
        return Ok(CommandOutput::success(format!("{text}\n")));
    }

    backend.write_file(target, &text).map_err(|e| (1, e))?;
    Ok(CommandOutput::success(format!(
        "exported {} shortcuts to {target}\n",
        list.len()
    )))
}
