//! Store Events
//!
//! Every change to the store is announced as a [`StoreEvent`]. Views
//! subscribe to the [`NoteManager`](crate::services::NoteManager) and never
//! to individual entities, so they stay decoupled from one another and
//! from entity lifetimes.
//!
//! # Event Flow
//!
//! 1. A view calls a mutation on the manager
//! 2. The entity applies a guarded assignment; unchanged values stop here
//! 3. Field-level events, then `DirtyChanged` (on a flip), then the
//!    entity-level `NoteModified`/`CategoryModified` are dispatched
//!    synchronously to callbacks in registration order
//! 4. Each event is also published on a broadcast channel for async consumers
//!
//! Payloads carrying a `Note` or `Category` are snapshots taken after the
//! change. Views should still re-query the manager when re-rendering.

use chrono::{DateTime, Utc};

use crate::models::{Category, Color, Note};

/// Events emitted by the note store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A note was created
    NoteCreated(Note),

    /// A note was deleted
    NoteDeleted { id: String },

    /// A note changed (after its field-level events)
    NoteModified(Note),

    /// The note collection changed structurally (create/delete/load)
    NotesChanged,

    NoteTitleChanged { id: String, title: String },
    NoteContentChanged { id: String, content: String },
    NoteCategoryChanged { id: String, category_id: String },
    NotePinnedChanged { id: String, pinned: bool },
    NoteUpdatedAtChanged { id: String, updated_at: DateTime<Utc> },

    /// A category was created
    CategoryCreated(Category),

    /// A category was deleted (notes and children keep the stale id)
    CategoryDeleted { id: String },

    /// A category changed (after its field-level events)
    CategoryModified(Category),

    /// The category collection changed structurally (create/delete/load)
    CategoriesChanged,

    CategoryNameChanged { id: String, name: String },
    CategoryColorChanged { id: String, color: Color },
    CategoryParentChanged { id: String, parent_id: String },

    /// The store was replaced from a file
    DataLoaded,

    /// The store was written to a file
    DataSaved,

    /// The dirty flag flipped
    DirtyChanged(bool),
}

/// Discriminant of a [`StoreEvent`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NoteCreated,
    NoteDeleted,
    NoteModified,
    NotesChanged,
    NoteTitleChanged,
    NoteContentChanged,
    NoteCategoryChanged,
    NotePinnedChanged,
    NoteUpdatedAtChanged,
    CategoryCreated,
    CategoryDeleted,
    CategoryModified,
    CategoriesChanged,
    CategoryNameChanged,
    CategoryColorChanged,
    CategoryParentChanged,
    DataLoaded,
    DataSaved,
    DirtyChanged,
}

impl StoreEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StoreEvent::NoteCreated(_) => EventKind::NoteCreated,
            StoreEvent::NoteDeleted { .. } => EventKind::NoteDeleted,
            StoreEvent::NoteModified(_) => EventKind::NoteModified,
            StoreEvent::NotesChanged => EventKind::NotesChanged,
            StoreEvent::NoteTitleChanged { .. } => EventKind::NoteTitleChanged,
            StoreEvent::NoteContentChanged { .. } => EventKind::NoteContentChanged,
            StoreEvent::NoteCategoryChanged { .. } => EventKind::NoteCategoryChanged,
            StoreEvent::NotePinnedChanged { .. } => EventKind::NotePinnedChanged,
            StoreEvent::NoteUpdatedAtChanged { .. } => EventKind::NoteUpdatedAtChanged,
            StoreEvent::CategoryCreated(_) => EventKind::CategoryCreated,
            StoreEvent::CategoryDeleted { .. } => EventKind::CategoryDeleted,
            StoreEvent::CategoryModified(_) => EventKind::CategoryModified,
            StoreEvent::CategoriesChanged => EventKind::CategoriesChanged,
            StoreEvent::CategoryNameChanged { .. } => EventKind::CategoryNameChanged,
            StoreEvent::CategoryColorChanged { .. } => EventKind::CategoryColorChanged,
            StoreEvent::CategoryParentChanged { .. } => EventKind::CategoryParentChanged,
            StoreEvent::DataLoaded => EventKind::DataLoaded,
            StoreEvent::DataSaved => EventKind::DataSaved,
            StoreEvent::DirtyChanged(_) => EventKind::DirtyChanged,
        }
    }

    /// Stable string name, e.g. `note:created`, for logs and bridges
    pub fn event_type(&self) -> &'static str {
        match self.kind() {
            EventKind::NoteCreated => "note:created",
            EventKind::NoteDeleted => "note:deleted",
            EventKind::NoteModified => "note:modified",
            EventKind::NotesChanged => "notes:changed",
            EventKind::NoteTitleChanged => "note:title-changed",
            EventKind::NoteContentChanged => "note:content-changed",
            EventKind::NoteCategoryChanged => "note:category-changed",
            EventKind::NotePinnedChanged => "note:pinned-changed",
            EventKind::NoteUpdatedAtChanged => "note:updated-at-changed",
            EventKind::CategoryCreated => "category:created",
            EventKind::CategoryDeleted => "category:deleted",
            EventKind::CategoryModified => "category:modified",
            EventKind::CategoriesChanged => "categories:changed",
            EventKind::CategoryNameChanged => "category:name-changed",
            EventKind::CategoryColorChanged => "category:color-changed",
            EventKind::CategoryParentChanged => "category:parent-changed",
            EventKind::DataLoaded => "data:loaded",
            EventKind::DataSaved => "data:saved",
            EventKind::DirtyChanged => "data:dirty-changed",
        }
    }

    /// Id of the note or category this event is about, if any
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            StoreEvent::NoteCreated(note) | StoreEvent::NoteModified(note) => Some(note.id()),
            StoreEvent::CategoryCreated(category) | StoreEvent::CategoryModified(category) => {
                Some(category.id())
            }
            StoreEvent::NoteDeleted { id }
            | StoreEvent::NoteTitleChanged { id, .. }
            | StoreEvent::NoteContentChanged { id, .. }
            | StoreEvent::NoteCategoryChanged { id, .. }
            | StoreEvent::NotePinnedChanged { id, .. }
            | StoreEvent::NoteUpdatedAtChanged { id, .. }
            | StoreEvent::CategoryDeleted { id }
            | StoreEvent::CategoryNameChanged { id, .. }
            | StoreEvent::CategoryColorChanged { id, .. }
            | StoreEvent::CategoryParentChanged { id, .. } => Some(id.as_str()),
            StoreEvent::NotesChanged
            | StoreEvent::CategoriesChanged
            | StoreEvent::DataLoaded
            | StoreEvent::DataSaved
            | StoreEvent::DirtyChanged(_) => None,
        }
    }
}
