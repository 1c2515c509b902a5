//! Command handlers for the CLI.

mod notes;
mod serve;


use anyhow::{Result, anyhow};
use clap::CommandFactory;
use std::io;
use std::path::Path;

use crate::cli::{Cli, CompletionsArgs};
use crate::domain::Validated;
use crate::infra::JsonFileStore;
use crate::service::NoteService;

// Re-export public items
pub use notes::{handle_edit, handle_list, handle_new, handle_remove, handle_show};
pub use serve::handle_serve;

// Re-export for tests
#[cfg(test)]
pub(crate) use notes::{edit_note, list_notes, new_note, remove_note, show_note};

pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "notes-api", &mut io::stdout());
    Ok(())
}

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the note service over the JSON data file.
pub(crate) fn open_service(data_file: &Path) -> NoteService<JsonFileStore> {
    NoteService::new(JsonFileStore::new(data_file))
}

/// Turns validator field errors into one error with a line per field.
pub(crate) fn validated<T>(result: Validated<T>) -> Result<T> {
    result.map_err(|errors| {
        let lines: Vec<String> = errors.iter().map(|e| format!("  {e}")).collect();
        anyhow!("validation failed:\n{}", lines.join("\n"))
    })
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
