//! shortcuts-cli: command-line surface over the shortcuts core.

mod add;
mod export;
mod import;
mod list;
mod remove;
mod update;

use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use shortcuts_core::record::ShortcutRecord;
use shortcuts_core::storage::FileStorage;
use shortcuts_core::store::{ShortcutPatch, ShortcutStore};

/// Environment variable selecting the data directory.
pub const ENV_DATA_DIR: &str = "SHORTCUTS_DIR";
/// Directory under `$HOME` used when the variable is unset.
pub const DEFAULT_DIR_NAME: &str = ".shortcuts";

static VERSION: OnceLock<String> = OnceLock::new();

/// Set the version string for `--version` output.
pub fn set_version(version: &str) {
    let _ = VERSION.set(version.to_string());
}

fn get_version() -> &'static str {
    VERSION.get().map(|s| s.as_str()).unwrap_or("dev")
}

fn help_text() -> String {
    "\
shortcuts manages a local collection of named links.

Usage:
  shortcuts [command]

Available Commands:
  add         Add a shortcut (validated; prepended to the collection)
  clear       Remove all shortcuts
  export      Export the collection as semicolon CSV
  help        Help about any command
  import      Replace the collection from a CSV file
  list        List shortcuts, optionally filtered
  remove      Remove a shortcut by id
  tags        List distinct tags in use
  update      Update fields of a shortcut by id

Flags:
  -h, --help      help for shortcuts
  -v, --version   version for shortcuts

Use \"shortcuts [command] --help\" for more information about a command.\n"
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub(crate) fn success(stdout: String) -> Self {
        Self {
            stdout,
            stderr: String::new(),
            exit_code: 0,
        }
    }

    pub(crate) fn failure(exit_code: i32, message: &str) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("{message}\n"),
            exit_code,
        }
    }
}

/// Seam between commands and the world, so tests can run against an
/// in-memory collection and fixed clock.
pub trait ShortcutsBackend {
    fn now_utc(&self) -> DateTime<Utc>;
    /// Load the stored collection (fail-soft: worst case is empty).
    fn load(&self) -> Vec<ShortcutRecord>;
    /// Overwrite the stored collection wholesale.
    fn save(&self, list: &[ShortcutRecord]) -> Result<(), String>;
    fn add(
        &self,
        list: &[ShortcutRecord],
        record: ShortcutRecord,
    ) -> Result<Vec<ShortcutRecord>, String>;
    fn remove(&self, list: &[ShortcutRecord], id: &str) -> Result<Vec<ShortcutRecord>, String>;
    fn update(
        &self,
        list: &[ShortcutRecord],
        id: &str,
        patch: &ShortcutPatch,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShortcutRecord>, String>;
    fn clear(&self) -> Result<(), String>;
    fn read_file(&self, path: &str) -> Result<String, String>;
    fn write_file(&self, path: &str, contents: &str) -> Result<(), String>;
}

/// Backend persisting under `$SHORTCUTS_DIR` (default `$HOME/.shortcuts`).
pub struct FilesystemShortcutsBackend;

fn resolve_data_dir() -> Result<PathBuf, String> {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME")
        .map_err(|_| format!("HOME not set; set {ENV_DATA_DIR} to a data directory"))?;
    Ok(PathBuf::from(home).join(DEFAULT_DIR_NAME))
}

impl FilesystemShortcutsBackend {
    fn store(&self) -> Result<ShortcutStore, String> {
        let dir = resolve_data_dir()?;
        Ok(ShortcutStore::new(Box::new(FileStorage::new(dir))))
    }
}

impl ShortcutsBackend for FilesystemShortcutsBackend {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn load(&self) -> Vec<ShortcutRecord> {
        self.store().map(|store| store.load()).unwrap_or_default()
    }

    fn save(&self, list: &[ShortcutRecord]) -> Result<(), String> {
        self.store()?.save(list).map_err(|e| e.to_string())
    }

    fn add(
        &self,
        list: &[ShortcutRecord],
        record: ShortcutRecord,
    ) -> Result<Vec<ShortcutRecord>, String> {
        self.store()?.add(list, record).map_err(|e| e.to_string())
    }

    fn remove(&self, list: &[ShortcutRecord], id: &str) -> Result<Vec<ShortcutRecord>, String> {
        self.store()?.remove(list, id).map_err(|e| e.to_string())
    }

    fn update(
        &self,
        list: &[ShortcutRecord],
        id: &str,
        patch: &ShortcutPatch,
        now: DateTime<Utc>,
    ) -> Result<Vec<ShortcutRecord>, String> {
        self.store()?
            .update(list, id, patch, now)
            .map_err(|e| e.to_string())
    }

    fn clear(&self) -> Result<(), String> {
        self.store()?.clear().map_err(|e| e.to_string())
    }

    fn read_file(&self, path: &str) -> Result<String, String> {
        std::fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))
    }

    fn write_file(&self, path: &str, contents: &str) -> Result<(), String> {
        std::fs::write(path, contents).map_err(|e| format!("write {path}: {e}"))
    }
}

/// Run the CLI from test arguments.
pub fn run_cli_for_test(args: &[&str], backend: &dyn ShortcutsBackend) -> CommandOutput {
    let Some((command, rest)) = args.split_first() else {
        return CommandOutput::success(help_text());
    };

    match *command {
        "help" | "-h" | "--help" => CommandOutput::success(help_text()),
        "-v" | "--version" => CommandOutput::success(format!("shortcuts {}\n", get_version())),
        "add" => add::run_add(rest, backend),
        "list" => list::run_list(rest, backend),
        "tags" => list::run_tags(rest, backend),
        "update" => update::run_update(rest, backend),
        "remove" => remove::run_remove(rest, backend),
        "import" => import::run_import(rest, backend),
        "export" => export::run_export(rest, backend),
        "clear" => run_clear(backend),
        other => CommandOutput::failure(
            1,
            &format!("unknown command: {other}\nRun 'shortcuts --help' for usage."),
        ),
    }
}

/// Run the CLI from process arguments.
pub fn run_cli(args: &[String], backend: &dyn ShortcutsBackend) -> CommandOutput {
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    run_cli_for_test(&refs, backend)
}

fn run_clear(backend: &dyn ShortcutsBackend) -> CommandOutput {
    match backend.clear() {
        Ok(()) => CommandOutput::success(String::new()),
        Err(e) => CommandOutput::failure(1, &e),
    }
}
