//! Note struct and the create/patch inputs that produce and mutate it.

use crate::domain::NoteId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns the current time, truncated to the millisecond precision that
/// survives serialization.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A persisted note.
///
/// # Fields
/// - `id`: Unique identifier, assigned at creation and never changed
/// - `title`: Trimmed title (3-100 characters, enforced at the request boundary)
/// - `content`: Trimmed body, possibly empty
/// - `created_at`: Set once when the note is created
/// - `updated_at`: Refreshed on every modification, never before `created_at`
///
/// Serialized with camelCase keys and RFC 3339 UTC timestamps at millisecond
/// precision, e.g. `2024-01-15T10:30:00.000Z`.
///
/// # Examples
///
/// ```
/// use notes_api::domain::{NewNote, Note, NotePatch};
///
/// let now = notes_api::domain::now();
/// let mut note = Note::create(NewNote::new("API Design", "Draft"), now);
/// note.apply(NotePatch::title("Final API"), now);
/// assert_eq!(note.title(), "Final API");
/// assert_eq!(note.content(), "Draft");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note with a fresh id, stamping both timestamps with `now`.
    pub fn create(new: NewNote, now: DateTime<Utc>) -> Self {
        Self {
            id: NoteId::new(),
            title: new.title,
            content: new.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the fields present in `patch` and refreshes `updated_at`.
    ///
    /// Absent fields keep their stored value; a field present but empty
    /// overwrites. `updated_at` never moves backwards, even if the clock does.
    pub fn apply(&mut self, patch: NotePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = now.max(self.updated_at);
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the note was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the note was last modified.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns true if `needle` (already lowercased) occurs in the title or
    /// content, ignoring case.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id)
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content_len", &self.content.len())
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Validated input for creating a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Validated partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    /// A patch that only replaces the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    /// A patch that only replaces the content.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    /// Returns true if the patch would change nothing but `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Serde adapter for millisecond RFC 3339 timestamps in UTC.
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
