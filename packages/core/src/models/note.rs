//! Note Data Structure
//!
//! A `Note` is a plain record: it owns its fields and enforces its own
//! invariants (immutable id, `updated_at >= created_at`, guarded setters)
//! but knows nothing about observers. Change notification is the job of
//! [`NoteManager`](crate::services::NoteManager), which calls these setters
//! and turns an effective change into events.
//!
//! # Examples
//!
//! ```rust
//! use notepad_core::models::Note;
//! use chrono::Utc;
//!
//! let mut note = Note::new("Standup", "", Utc::now());
//! assert!(note.set_title("Daily standup", Utc::now()));
//! assert!(!note.set_title("Daily standup", Utc::now())); // unchanged: no-op
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::lenient;
use crate::utils::{self, TextStats};

/// Case policy for text matching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    Sensitive,
    #[default]
    Insensitive,
}

/// A single note.
///
/// # Fields
///
/// - `id`: UUID string, fixed at creation
/// - `title`, `content`: `content` is rich-text markup kept as an opaque blob
/// - `category_id`: empty string means uncategorized
/// - `created_at`: fixed at creation
/// - `updated_at`: bumped by every effective setter call
/// - `is_pinned`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "NoteRecord")]
pub struct Note {
    id: String,
    title: String,
    content: String,
    category_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_pinned: bool,
}

/// Wire shape accepted on load. Every field is optional and type-tolerant.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    content: String,
    #[serde(default, deserialize_with = "lenient::string")]
    category_id: String,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    is_pinned: bool,
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            category_id: record.category_id,
            created_at: record.created_at,
            // Keep the ordering invariant even for hand-edited files
            updated_at: record.updated_at.max(record.created_at),
            is_pinned: record.is_pinned,
        }
    }
}

impl Note {
    /// Create a note with a fresh UUID, uncategorized and unpinned.
    pub fn new(title: impl Into<String>, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            category_id: String::new(),
            created_at: now,
            updated_at: now,
            is_pinned: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category_id.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    /// Returns `true` if the title actually changed.
    pub fn set_title(&mut self, title: impl Into<String>, now: DateTime<Utc>) -> bool {
        let title = title.into();
        if self.title == title {
            return false;
        }
        self.title = title;
        self.touch(now);
        true
    }

    pub fn set_content(&mut self, content: impl Into<String>, now: DateTime<Utc>) -> bool {
        let content = content.into();
        if self.content == content {
            return false;
        }
        self.content = content;
        self.touch(now);
        true
    }

    /// Pass `""` to make the note uncategorized.
    pub fn set_category_id(&mut self, category_id: impl Into<String>, now: DateTime<Utc>) -> bool {
        let category_id = category_id.into();
        if self.category_id == category_id {
            return false;
        }
        self.category_id = category_id;
        self.touch(now);
        true
    }

    pub fn set_pinned(&mut self, pinned: bool, now: DateTime<Utc>) -> bool {
        if self.is_pinned == pinned {
            return false;
        }
        self.is_pinned = pinned;
        self.touch(now);
        true
    }

    /// `updated_at` never moves backwards, even if the clock does.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }

    pub(crate) fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    pub fn to_json(&self) -> Value {
        // Serializing plain strings, bools and timestamps cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Decode a note from a JSON object.
    ///
    /// Missing or mistyped fields take defaults (empty string, `false`,
    /// the Unix epoch). Only a value that is not an object is an error.
    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        // Derived struct visitors also accept arrays positionally
        if !value.is_object() {
            return Err(serde::de::Error::custom("note record must be a JSON object"));
        }
        Note::deserialize(value)
    }

    /// Plain-text preview of the content, at most `max_len` characters
    /// plus an ellipsis when truncated.
    pub fn preview(&self, max_len: usize) -> String {
        utils::preview(&self.content, max_len)
    }

    /// Substring match over title or content.
    pub fn contains_text(&self, needle: &str, case: CaseSensitivity) -> bool {
        match case {
            CaseSensitivity::Sensitive => {
                self.title.contains(needle) || self.content.contains(needle)
            }
            CaseSensitivity::Insensitive => {
                let needle = needle.to_lowercase();
                self.title.to_lowercase().contains(&needle)
                    || self.content.to_lowercase().contains(&needle)
            }
        }
    }

    pub fn stats(&self) -> TextStats {
        utils::text_stats(&self.content)
    }
}

/// Partial update applied by [`NoteManager::update_note`](crate::services::NoteManager::update_note)
///
/// `None` fields are left untouched. Fields that already hold the given
/// value are skipped, so an update can be a no-op even when not empty.
///
/// ```rust
/// use notepad_core::models::NoteUpdate;
///
/// let update = NoteUpdate::new().with_title("Standup").with_pinned(true);
/// assert!(!update.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// `Some("")` moves the note to uncategorized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl NoteUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.is_pinned = Some(pinned);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category_id.is_none()
            && self.is_pinned.is_none()
    }
}
