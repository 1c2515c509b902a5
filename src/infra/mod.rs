//! Persistence of the note collection

mod store;

pub use store::{JsonFileStore, MemoryStore, NoteStore, StoreError};
