//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::NotesCommand;
use notes_api::domain::{NewNote, Note};
use notes_api::infra::{JsonFileStore, NoteStore};
use notes_api::service::NoteService;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with its own data file and config file.
///
/// The temp directory is removed on drop. The config path points at a file
/// that does not exist unless a test writes it, so the user's real config
/// never leaks in.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    data_file: PathBuf,
    config_file: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_file = temp_dir.path().join("data").join("notes.json");
        let config_file = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            data_file,
            config_file,
        }
    }

    /// Returns the path to the JSON data file.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Returns the path to the (optional) config file.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Adds a note directly through the service and returns it.
    pub fn add_note(&self, title: &str, content: &str) -> Note {
        self.service()
            .create(NewNote::new(title, content))
            .expect("Failed to create test note")
    }

    /// Returns every persisted note, in stored order.
    pub fn notes(&self) -> Vec<Note> {
        JsonFileStore::new(&self.data_file).load()
    }

    /// Writes the config file.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(&self.config_file, contents).expect("Failed to write config");
    }

    /// Creates a NotesCommand configured for this test environment.
    pub fn cmd(&self) -> NotesCommand {
        NotesCommand::new()
            .config(&self.config_file)
            .data_file(&self.data_file)
    }

    fn service(&self) -> NoteService<JsonFileStore> {
        NoteService::new(JsonFileStore::new(&self.data_file))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
