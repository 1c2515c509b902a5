//! Request validators.
//!
//! Each validator turns raw request input into the typed value the service
//! consumes, or into a list of per-field errors. Every field is checked
//! independently and the first failing rule for a field is reported, so one
//! response carries all field problems at once.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::{ListQuery, MAX_LIMIT, NewNote, NoteId, NotePatch, PageRequest};
use crate::domain::{DEFAULT_LIMIT, DEFAULT_PAGE};

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field (`title`, `limit`, `id`, ...).
    pub field: String,
    /// Human-readable description of the failed rule.
    pub message: String,
    /// The rejected value, when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    /// Creates a field error without an echoed value.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Attaches the rejected value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of a validator: the typed input or every field error found.
pub type Validated<T> = Result<T, Vec<FieldError>>;

pub const AT_LEAST_ONE_FIELD: &str = "At least one field (title or content) must be provided";
pub const INVALID_ID: &str = "Invalid note ID format";

/// Length bounds for a trimmed text field.
struct TextRule {
    field: &'static str,
    label: &'static str,
    min: usize,
    max: usize,
}

const TITLE: TextRule = TextRule {
    field: "title",
    label: "Title",
    min: 3,
    max: 100,
};

const CONTENT: TextRule = TextRule {
    field: "content",
    label: "Content",
    min: 0,
    max: 10_000,
};

const SEARCH: TextRule = TextRule {
    field: "search",
    label: "Search query",
    min: 0,
    max: 100,
};

impl TextRule {
    /// Trims `raw` and checks its length in characters.
    fn check(&self, raw: &str) -> Result<String, FieldError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len >= self.min && len <= self.max {
            return Ok(trimmed.to_string());
        }
        let message = if self.min > 0 {
            format!(
                "{} must be between {} and {} characters",
                self.label, self.min, self.max
            )
        } else {
            format!("{} must not exceed {} characters", self.label, self.max)
        };
        Err(FieldError::new(self.field, message).with_value(raw))
    }

    /// Reads the field from a JSON object. Absent yields `Ok(None)`; present
    /// values must be strings.
    fn optional(&self, body: &Map<String, Value>) -> Result<Option<String>, FieldError> {
        match body.get(self.field) {
            None => Ok(None),
            Some(Value::String(s)) => self.check(s).map(Some),
            Some(other) => Err(FieldError::new(
                self.field,
                format!("{} must be a string", self.label),
            )
            .with_value(other.clone())),
        }
    }

    /// Like [`TextRule::optional`] but absence, or a blank string, is an error.
    fn required(&self, body: &Map<String, Value>) -> Result<String, FieldError> {
        let required = || FieldError::new(self.field, format!("{} is required", self.label));
        match body.get(self.field) {
            Some(Value::String(s)) if s.trim().is_empty() => Err(required().with_value(s.as_str())),
            _ => self.optional(body)?.ok_or_else(required),
        }
    }
}

/// Flattens the errors of independently checked fields.
fn collect<const N: usize>(errors: [Option<FieldError>; N]) -> Vec<FieldError> {
    errors.into_iter().flatten().collect()
}

fn object(body: &Value) -> Result<&Map<String, Value>, FieldError> {
    body.as_object()
        .ok_or_else(|| FieldError::new("body", "Request body must be a JSON object"))
}

fn parse_id(raw: &str) -> Result<NoteId, FieldError> {
    raw.parse()
        .map_err(|_| FieldError::new("id", INVALID_ID).with_value(raw))
}

/// Validates a create request body: `title` required, `content` optional.
pub fn validate_create(body: &Value) -> Validated<NewNote> {
    let fields = object(body).map_err(|e| vec![e])?;
    let title = TITLE.required(fields);
    let content = CONTENT.optional(fields);

    match (title, content) {
        (Ok(title), Ok(content)) => Ok(NewNote::new(title, content.unwrap_or_default())),
        (title, content) => Err(collect([title.err(), content.err()])),
    }
}

/// Validates a path id for get-by-id and delete.
pub fn validate_id(raw: &str) -> Validated<NoteId> {
    parse_id(raw).map_err(|e| vec![e])
}

/// Validates a partial update: a path id plus at least one of `title` or
/// `content`, each with the same bounds as on create.
pub fn validate_update(raw_id: &str, body: &Value) -> Validated<(NoteId, NotePatch)> {
    let id = parse_id(raw_id);
    let patch = object(body).map_err(|e| vec![e]).and_then(|fields| {
        match (TITLE.optional(fields), CONTENT.optional(fields)) {
            (Ok(None), Ok(None)) => Err(vec![FieldError::new("body", AT_LEAST_ONE_FIELD)]),
            (Ok(title), Ok(content)) => Ok(NotePatch { title, content }),
            (title, content) => Err(collect([title.err(), content.err()])),
        }
    });

    match (id, patch) {
        (Ok(id), Ok(patch)) => Ok((id, patch)),
        (id, patch) => {
            let mut errors = collect([id.err()]);
            errors.extend(patch.err().unwrap_or_default());
            Err(errors)
        }
    }
}

/// Raw list query parameters as received in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

/// Validates list parameters: `page` >= 1, `limit` in 1..=100, `search` at
/// most 100 characters. Missing values fall back to page 1, limit 10.
pub fn validate_list(params: &ListParams) -> Validated<ListQuery> {
    let page = match params.page.as_deref() {
        None => Ok(DEFAULT_PAGE),
        Some(raw) => match raw.parse::<usize>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(FieldError::new("page", "Page must be a positive integer").with_value(raw)),
        },
    };
    let limit = match params.limit.as_deref() {
        None => Ok(DEFAULT_LIMIT),
        Some(raw) => match raw.parse::<usize>() {
            Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => Ok(limit),
            _ => Err(FieldError::new(
                "limit",
                format!("Limit must be an integer between 1 and {MAX_LIMIT}"),
            )
            .with_value(raw)),
        },
    };
    let search = match params.search.as_deref() {
        None => Ok(None),
        Some(raw) => SEARCH
            .check(raw)
            .map(|s| Some(s).filter(|s| !s.is_empty())),
    };

    match (page, limit, search) {
        (Ok(page), Ok(limit), Ok(search)) => Ok(ListQuery {
            page: PageRequest::new(page, limit),
            search,
        }),
        (page, limit, search) => Err(collect([page.err(), limit.err(), search.err()])),
    }
}
