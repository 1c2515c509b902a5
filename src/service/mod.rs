//! Business rules over the note collection.
//!
//! Every operation loads the whole collection from the store, works on it in
//! memory and, for mutations, saves the whole collection back. A per-service
//! mutex serialises these load-modify-save sequences so concurrent requests
//! within one process cannot lose each other's writes.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::debug;

use crate::domain::{ListQuery, NewNote, Note, NoteId, NotePatch, Page, now, paginate};
use crate::infra::{NoteStore, StoreError};


/// Errors returned by [`NoteService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No note has the requested id.
    #[error("Note with id {id} not found")]
    NotFound { id: NoteId },

    /// The collection could not be persisted.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Create, list, read, update and delete notes held by a [`NoteStore`].
#[derive(Debug)]
pub struct NoteService<S> {
    store: S,
    lock: Mutex<()>,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn exclusive(&self) -> MutexGuard<'_, ()> {
        // The guarded value is (), so a poisoned lock carries no broken state.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Creates a note with a fresh id and both timestamps set to now.
    pub fn create(&self, new: NewNote) -> ServiceResult<Note> {
        let _guard = self.exclusive();
        let mut notes = self.store.load();

        let note = Note::create(new, now());
        notes.push(note.clone());
        self.store.save(&notes)?;

        debug!(id = %note.id(), "created note");
        Ok(note)
    }

    /// Lists notes in insertion order, filtered by a case-insensitive
    /// substring match on title or content, then sliced to the requested page.
    pub fn list(&self, query: &ListQuery) -> ServiceResult<Page<Note>> {
        let _guard = self.exclusive();
        let mut notes = self.store.load();

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            notes.retain(|n| n.matches(&needle));
        }

        Ok(paginate(notes, query.page))
    }

    /// Returns the note with `id`.
    pub fn get(&self, id: &NoteId) -> ServiceResult<Note> {
        let _guard = self.exclusive();
        self.store
            .load()
            .into_iter()
            .find(|n| n.id() == id)
            .ok_or(ServiceError::NotFound { id: *id })
    }

    /// Merges `patch` into the note with `id` and refreshes its `updated_at`.
    pub fn update(&self, id: &NoteId, patch: NotePatch) -> ServiceResult<Note> {
        let _guard = self.exclusive();
        let mut notes = self.store.load();

        let note = notes
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or(ServiceError::NotFound { id: *id })?;
        note.apply(patch, now());
        let updated = note.clone();

        self.store.save(&notes)?;

        debug!(%id, "updated note");
        Ok(updated)
    }

    /// Removes the note with `id` and returns the removed record.
    pub fn delete(&self, id: &NoteId) -> ServiceResult<Note> {
        let _guard = self.exclusive();
        let mut notes = self.store.load();

        let index = notes
            .iter()
            .position(|n| n.id() == id)
            .ok_or(ServiceError::NotFound { id: *id })?;
        let removed = notes.remove(index);

        self.store.save(&notes)?;

        debug!(%id, "deleted note");
        Ok(removed)
    }
}
