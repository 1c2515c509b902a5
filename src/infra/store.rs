//! Whole-collection persistence for notes.
//!
//! The collection is one pretty-printed JSON array. Every load reads the
//! full file and every save rewrites it.

use crate::domain::Note;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

/// Errors while persisting the note collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize notes for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("note store lock poisoned")]
    Poisoned,
}

/// Load/save access to the complete note collection.
///
/// `load` never fails: unreadable storage is reported in the log and treated
/// as an empty collection. `save` replaces the persisted collection wholesale.
pub trait NoteStore: Send + Sync + 'static {
    fn load(&self) -> Vec<Note>;

    fn save(&self, notes: &[Note]) -> Result<(), StoreError>;
}

/// Stores the collection as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Note>, String> {
        let bytes = std::fs::read(&self.path).map_err(|e| e.to_string())?;
        serde_json::from_slice(&bytes).map_err(|e| e.to_string())
    }

    /// Creates the parent directory (if any) so the temp file can live next
    /// to the target and the final rename stays on one filesystem.
    fn ensure_parent(&self) -> Result<&Path, StoreError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            path: parent.into(),
            source: e,
        })?;
        Ok(parent)
    }
}

impl NoteStore for JsonFileStore {
    fn load(&self) -> Vec<Note> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "data file missing, initialising empty collection");
            if let Err(e) = self.save(&[]) {
                warn!(path = %self.path.display(), error = %e, "failed to initialise data file");
            }
            return Vec::new();
        }

        match self.read() {
            Ok(notes) => notes,
            Err(reason) => {
                warn!(
                    path = %self.path.display(),
                    error = %reason,
                    "failed to read notes, treating collection as empty"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        let parent = self.ensure_parent()?;

        let content = serde_json::to_string_pretty(notes).map_err(|e| StoreError::Serialize {
            path: self.path.clone(),
            source: e,
        })?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        temp.write_all(content.as_bytes())
            .map_err(|e| StoreError::Io {
                path: self.path.clone(),
                source: e,
            })?;

        temp.persist(&self.path).map_err(|e| StoreError::AtomicWrite {
            path: self.path.clone(),
            source: e.error,
        })?;

        Ok(())
    }
}

/// Keeps the collection in memory; used by tests and benchmarks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: Mutex<Vec<Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `notes`.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
        }
    }
}

impl NoteStore for MemoryStore {
    fn load(&self) -> Vec<Note> {
        match self.notes.lock() {
            Ok(notes) => notes.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        let mut guard = self.notes.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = notes.to_vec();
        Ok(())
    }
}
