//! `shortcuts remove` — drop one shortcut by id.

use crate::{CommandOutput, ShortcutsBackend};

const USAGE: &str = "usage: shortcuts remove <id>";

pub(crate) fn run_remove(args: &[&str], backend: &dyn ShortcutsBackend) -> CommandOutput {
    match execute_remove(args, backend) {
        Ok(output) => output,
        Err((0, message)) => CommandOutput::success(format!("{message}\n")),
        Err((exit_code, message)) => CommandOutput::failure(exit_code, &message),
    }
}

fn execute_remove(
    args: &[&str],
    backend: &dyn ShortcutsBackend,
) -> Result<CommandOutput, (i32, String)> {
    let id = match args {
        ["-h"] | ["--help"] => return Err((0, USAGE.to_string())),
        [id] => *id,
        _ => return Err((1, USAGE.to_string())),
    };

    let list = backend.load();
    if !list.iter().any(|record| record.id == id) {
        return Err((1, format!("shortcut not found: {id}")));
    }

    backend.remove(&list, id).map_err(|e| (1, e))?;
    Ok(CommandOutput::success(String::new()))
}
