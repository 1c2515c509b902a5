//! Core types: Note, NoteId (UUID), pagination and request validation

mod note;
mod note_id;
mod pagination;
mod validation;

pub use note::{NewNote, Note, NotePatch, now};
pub use note_id::{NoteId, ParseNoteIdError};
pub use pagination::{
    DEFAULT_LIMIT, DEFAULT_PAGE, ListQuery, MAX_LIMIT, Page, PageRequest, Pagination, paginate,
};
pub use validation::{
    AT_LEAST_ONE_FIELD, FieldError, INVALID_ID, ListParams, Validated, validate_create,
    validate_id, validate_list, validate_update,
};
