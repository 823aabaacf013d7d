//! Note Manager
//!
//! Owns every note and category, answers queries over them, persists them
//! to a JSON data file and announces each change as a [`StoreEvent`].
//!
//! # Event Ordering
//!
//! For an effective note mutation the manager emits, in order:
//!
//! 1. `NoteUpdatedAtChanged` (when the timestamp moved)
//! 2. one field event per changed field
//! 3. `DirtyChanged(true)` if the store was clean
//! 4. `NoteModified` with a snapshot of the note
//!
//! Category mutations follow the same pattern without step 1. Creating or
//! deleting marks the store dirty first, then emits the entity event and
//! the collection event (`NotesChanged`/`CategoriesChanged`).
//!
//! Unknown ids are not errors: lookups return `None`, deletes return
//! `false` and setters return [`UpdateOutcome::NotFound`], with no events.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::models::time::{SystemTimeProvider, TimeProvider};
use crate::models::{CaseSensitivity, Category, Color, Note, NoteUpdate};
use crate::store::{
    read_data_file, write_data_file, Callback, EventKind, LoadSummary, StoreError, StoreEvent,
    Subscribers, SubscriptionId,
};

/// Broadcast channel capacity for async event receivers
const EVENT_CHANNEL_CAPACITY: usize = 128;

/// Result of a mutation addressed by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No entity with that id
    NotFound,
    /// The entity already held the given value(s); nothing was emitted
    Unchanged,
    Changed,
}

impl UpdateOutcome {
    pub fn is_changed(self) -> bool {
        self == UpdateOutcome::Changed
    }
}

/// Repository of notes and categories.
///
/// Not thread-safe: callbacks run synchronously on the caller's thread and
/// need not be `Send`. Async consumers use [`subscribe_to_events`] instead.
///
/// [`subscribe_to_events`]: NoteManager::subscribe_to_events
///
/// # Examples
///
/// ```rust
/// use notepad_core::{NoteManager, StoreConfig};
///
/// let mut manager = NoteManager::new(StoreConfig::default());
/// let work = manager.create_category(Some("Work")).id().to_string();
/// let standup = manager.create_note(Some("Standup")).id().to_string();
/// manager.set_note_category(&standup, &work);
///
/// let titles: Vec<_> = manager
///     .get_notes_by_category(&work)
///     .iter()
///     .map(|n| n.title())
///     .collect();
/// assert_eq!(titles, ["Standup"]);
/// assert!(manager.get_notes_by_category("").is_empty());
/// ```
pub struct NoteManager {
    config: StoreConfig,
    clock: Arc<dyn TimeProvider>,
    notes: HashMap<String, Note>,
    categories: HashMap<String, Category>,
    dirty: bool,
    subscribers: Subscribers,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl NoteManager {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_time_provider(config, Arc::new(SystemTimeProvider))
    }

    /// Create a manager that takes timestamps from `clock`
    pub fn with_time_provider(config: StoreConfig, clock: Arc<dyn TimeProvider>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            clock,
            notes: HashMap::new(),
            categories: HashMap::new(),
            dirty: false,
            subscribers: Subscribers::default(),
            event_tx,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current time according to the manager's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Register a callback for every event.
    ///
    /// Callbacks run in registration order before the mutating call returns.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &NoteManager) + 'static,
    {
        self.subscribers.add(None, Box::new(callback) as Callback)
    }

    /// Register a callback for events of one kind only
    pub fn subscribe_to<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &NoteManager) + 'static,
    {
        self.subscribers.add(Some(kind), Box::new(callback) as Callback)
    }

    /// Returns `false` if the subscription was already removed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Subscribe to store events from async code.
    ///
    /// Receives the same events, in the same order, as synchronous
    /// subscribers. A receiver that falls more than the channel capacity
    /// behind gets `RecvError::Lagged` and should re-query the manager.
    pub fn subscribe_to_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&mut self, event: StoreEvent) {
        debug!(
            event_type = event.event_type(),
            entity_id = event.entity_id().unwrap_or(""),
            "Emitting store event"
        );
        // Callbacks only see `&NoteManager`, so the list cannot change during dispatch
        let mut subscribers = std::mem::take(&mut self.subscribers);
        subscribers.dispatch(&event, self);
        self.subscribers = subscribers;

        let _ = self.event_tx.send(event);
    }

    // ------------------------------------------------------------------
    // Dirty tracking
    // ------------------------------------------------------------------

    /// `true` when there are changes since the last save or load
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Emits `DirtyChanged` only when the flag actually flips
    pub fn set_dirty(&mut self, dirty: bool) {
        if self.dirty == dirty {
            return;
        }
        self.dirty = dirty;
        self.emit(StoreEvent::DirtyChanged(dirty));
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    /// Create a note. `None` or an empty title uses the configured default.
    pub fn create_note(&mut self, title: Option<&str>) -> &Note {
        let title = title
            .filter(|t| !t.is_empty())
            .unwrap_or(self.config.default_note_title.as_str())
            .to_string();
        let note = Note::new(title, "", self.clock.now());
        let id = note.id().to_string();
        debug!(note_id = %id, title = %note.title(), "Creating note");

        self.notes.insert(id.clone(), note.clone());
        self.set_dirty(true);
        self.emit(StoreEvent::NoteCreated(note));
        self.emit(StoreEvent::NotesChanged);

        &self.notes[&id]
    }

    pub fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    /// All notes, in no particular order
    pub fn get_all_notes(&self) -> Vec<&Note> {
        self.notes.values().collect()
    }

    /// Notes filed under `category_id`; `""` selects uncategorized notes
    pub fn get_notes_by_category(&self, category_id: &str) -> Vec<&Note> {
        self.notes
            .values()
            .filter(|note| note.category_id() == category_id)
            .collect()
    }

    pub fn get_pinned_notes(&self) -> Vec<&Note> {
        self.notes.values().filter(|note| note.is_pinned()).collect()
    }

    /// Notes whose title or content contains `keyword`, using the
    /// configured case policy. An empty keyword matches every note.
    pub fn search_notes(&self, keyword: &str) -> Vec<&Note> {
        self.search_notes_with(keyword, self.config.search_case)
    }

    pub fn search_notes_with(&self, keyword: &str, case: CaseSensitivity) -> Vec<&Note> {
        self.notes
            .values()
            .filter(|note| note.contains_text(keyword, case))
            .collect()
    }

    /// Content preview at the configured length
    pub fn note_preview(&self, id: &str) -> Option<String> {
        self.notes
            .get(id)
            .map(|note| note.preview(self.config.preview_length))
    }

    pub fn delete_note(&mut self, id: &str) -> bool {
        if self.notes.remove(id).is_none() {
            debug!(note_id = %id, "Delete ignored, note not found");
            return false;
        }
        debug!(note_id = %id, "Deleted note");

        self.set_dirty(true);
        self.emit(StoreEvent::NoteDeleted { id: id.to_string() });
        self.emit(StoreEvent::NotesChanged);
        true
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn set_note_title(&mut self, id: &str, title: &str) -> UpdateOutcome {
        self.update_note(id, NoteUpdate::new().with_title(title))
    }

    pub fn set_note_content(&mut self, id: &str, content: &str) -> UpdateOutcome {
        self.update_note(id, NoteUpdate::new().with_content(content))
    }

    /// Pass `""` to make the note uncategorized. The category is not
    /// required to exist.
    pub fn set_note_category(&mut self, id: &str, category_id: &str) -> UpdateOutcome {
        self.update_note(id, NoteUpdate::new().with_category_id(category_id))
    }

    pub fn set_note_pinned(&mut self, id: &str, pinned: bool) -> UpdateOutcome {
        self.update_note(id, NoteUpdate::new().with_pinned(pinned))
    }

    /// Apply every field of `update`, then emit a single `NoteModified`
    /// if anything changed.
    pub fn update_note(&mut self, id: &str, update: NoteUpdate) -> UpdateOutcome {
        let now = self.clock.now();
        let Some(note) = self.notes.get_mut(id) else {
            debug!(note_id = %id, "Update ignored, note not found");
            return UpdateOutcome::NotFound;
        };

        let previous_updated_at = note.updated_at();
        let mut field_events = Vec::new();

        if let Some(title) = update.title {
            if note.set_title(title, now) {
                field_events.push(StoreEvent::NoteTitleChanged {
                    id: id.to_string(),
                    title: note.title().to_string(),
                });
            }
        }
        if let Some(content) = update.content {
            if note.set_content(content, now) {
                field_events.push(StoreEvent::NoteContentChanged {
                    id: id.to_string(),
                    content: note.content().to_string(),
                });
            }
        }
        if let Some(category_id) = update.category_id {
            if note.set_category_id(category_id, now) {
                field_events.push(StoreEvent::NoteCategoryChanged {
                    id: id.to_string(),
                    category_id: note.category_id().to_string(),
                });
            }
        }
        if let Some(pinned) = update.is_pinned {
            if note.set_pinned(pinned, now) {
                field_events.push(StoreEvent::NotePinnedChanged {
                    id: id.to_string(),
                    pinned,
                });
            }
        }

        if field_events.is_empty() {
            return UpdateOutcome::Unchanged;
        }

        let snapshot = note.clone();
        debug!(note_id = %id, fields = field_events.len(), "Updated note");

        if snapshot.updated_at() != previous_updated_at {
            self.emit(StoreEvent::NoteUpdatedAtChanged {
                id: id.to_string(),
                updated_at: snapshot.updated_at(),
            });
        }
        for event in field_events {
            self.emit(event);
        }
        self.set_dirty(true);
        self.emit(StoreEvent::NoteModified(snapshot));
        UpdateOutcome::Changed
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Create a root category. `None` or an empty name uses the configured
    /// default.
    pub fn create_category(&mut self, name: Option<&str>) -> &Category {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or(self.config.default_category_name.as_str())
            .to_string();
        let category = Category::new(name);
        let id = category.id().to_string();
        debug!(category_id = %id, name = %category.name(), "Creating category");

        self.categories.insert(id.clone(), category.clone());
        self.set_dirty(true);
        self.emit(StoreEvent::CategoryCreated(category));
        self.emit(StoreEvent::CategoriesChanged);

        &self.categories[&id]
    }

    pub fn get_category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn get_all_categories(&self) -> Vec<&Category> {
        self.categories.values().collect()
    }

    /// Categories without a parent
    pub fn get_root_categories(&self) -> Vec<&Category> {
        self.categories
            .values()
            .filter(|category| category.is_root())
            .collect()
    }

    pub fn get_child_categories(&self, parent_id: &str) -> Vec<&Category> {
        self.categories
            .values()
            .filter(|category| category.parent_id() == parent_id)
            .collect()
    }

    /// Remove a category. Notes and child categories keep referring to
    /// the removed id.
    pub fn delete_category(&mut self, id: &str) -> bool {
        if self.categories.remove(id).is_none() {
            debug!(category_id = %id, "Delete ignored, category not found");
            return false;
        }
        debug!(category_id = %id, "Deleted category");

        self.set_dirty(true);
        self.emit(StoreEvent::CategoryDeleted { id: id.to_string() });
        self.emit(StoreEvent::CategoriesChanged);
        true
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn set_category_name(&mut self, id: &str, name: &str) -> UpdateOutcome {
        self.apply_category_change(id, |category| {
            category
                .set_name(name)
                .then(|| StoreEvent::CategoryNameChanged {
                    id: id.to_string(),
                    name: name.to_string(),
                })
        })
    }

    pub fn set_category_color(&mut self, id: &str, color: Color) -> UpdateOutcome {
        self.apply_category_change(id, |category| {
            category
                .set_color(color)
                .then(|| StoreEvent::CategoryColorChanged {
                    id: id.to_string(),
                    color,
                })
        })
    }

    /// Pass `""` to make the category a root. Neither existence of the
    /// parent nor absence of cycles is checked.
    pub fn set_category_parent(&mut self, id: &str, parent_id: &str) -> UpdateOutcome {
        self.apply_category_change(id, |category| {
            category
                .set_parent_id(parent_id)
                .then(|| StoreEvent::CategoryParentChanged {
                    id: id.to_string(),
                    parent_id: parent_id.to_string(),
                })
        })
    }

    fn apply_category_change<F>(&mut self, id: &str, apply: F) -> UpdateOutcome
    where
        F: FnOnce(&mut Category) -> Option<StoreEvent>,
    {
        let Some(category) = self.categories.get_mut(id) else {
            debug!(category_id = %id, "Update ignored, category not found");
            return UpdateOutcome::NotFound;
        };
        let Some(field_event) = apply(category) else {
            return UpdateOutcome::Unchanged;
        };
        let snapshot = category.clone();
        debug!(category_id = %id, event_type = field_event.event_type(), "Updated category");

        self.emit(field_event);
        self.set_dirty(true);
        self.emit(StoreEvent::CategoryModified(snapshot));
        UpdateOutcome::Changed
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Configured data path, or the platform default
    pub fn data_file_path(&self) -> Result<PathBuf, StoreError> {
        self.config.resolve_data_path()
    }

    fn target_path(&self, path: Option<&Path>) -> Result<PathBuf, StoreError> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => self.data_file_path(),
        }
    }

    /// Write every note and category to `path` (or the data file path).
    ///
    /// On success the store is clean and `DataSaved` has been emitted.
    /// Returns the path written.
    pub fn save_to_file(&mut self, path: Option<&Path>) -> Result<PathBuf, StoreError> {
        let path = self.target_path(path)?;

        if let Err(e) = write_data_file(&path, self.notes.values(), self.categories.values()) {
            warn!(path = %path.display(), error = %e, "Failed to save data file");
            return Err(e);
        }
        info!(
            path = %path.display(),
            notes = self.notes.len(),
            categories = self.categories.len(),
            "Saved data file"
        );

        self.set_dirty(false);
        self.emit(StoreEvent::DataSaved);
        Ok(path)
    }

    /// Save only when there are unsaved changes. Returns whether a save
    /// happened.
    pub fn save_if_dirty(&mut self, path: Option<&Path>) -> Result<bool, StoreError> {
        if !self.dirty {
            return Ok(false);
        }
        self.save_to_file(path)?;
        Ok(true)
    }

    /// Replace the whole store with the contents of `path` (or the data
    /// file path).
    ///
    /// Any failure leaves the store exactly as it was. Entities held before
    /// the load are gone afterwards, even if they had the same ids.
    pub fn load_from_file(&mut self, path: Option<&Path>) -> Result<LoadSummary, StoreError> {
        let path = self.target_path(path)?;

        let loaded = match read_data_file(&path) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load data file");
                return Err(e);
            }
        };

        self.notes = loaded.notes;
        self.categories = loaded.categories;
        let summary = LoadSummary {
            path,
            notes: self.notes.len(),
            categories: self.categories.len(),
            skipped_records: loaded.skipped_records,
        };
        info!(
            path = %summary.path.display(),
            notes = summary.notes,
            categories = summary.categories,
            skipped = summary.skipped_records,
            "Loaded data file"
        );

        self.set_dirty(false);
        self.emit(StoreEvent::DataLoaded);
        self.emit(StoreEvent::NotesChanged);
        self.emit(StoreEvent::CategoriesChanged);
        Ok(summary)
    }
}

impl Default for NoteManager {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl fmt::Debug for NoteManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteManager")
            .field("notes", &self.notes.len())
            .field("categories", &self.categories.len())
            .field("dirty", &self.dirty)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::MockTimeProvider;
    use chrono::Duration;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(manager: &mut NoteManager) -> Rc<RefCell<Vec<StoreEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        manager.subscribe(move |event, _| sink.borrow_mut().push(event.clone()));
        events
    }

    fn kinds(events: &Rc<RefCell<Vec<StoreEvent>>>) -> Vec<EventKind> {
        events.borrow().iter().map(StoreEvent::kind).collect()
    }

    #[test]
    fn test_create_note_defaults_and_events() {
        let mut manager = NoteManager::default();
        let events = recorded(&mut manager);

        let note = manager.create_note(None).clone();

        assert_eq!(note.title(), "New Note");
        assert!(note.is_uncategorized());
        assert!(manager.is_dirty());
        assert_eq!(
            kinds(&events),
            [
                EventKind::DirtyChanged,
                EventKind::NoteCreated,
                EventKind::NotesChanged
            ]
        );
    }

    #[test]
    fn test_empty_title_uses_configured_default() {
        let config = StoreConfig {
            default_note_title: "Untitled".to_string(),
            ..StoreConfig::default()
        };
        let mut manager = NoteManager::new(config);
        assert_eq!(manager.create_note(Some("")).title(), "Untitled");
        assert_eq!(manager.create_category(None).name(), "New Category");
    }

    #[test]
    fn test_setter_event_order() {
        let clock = Arc::new(MockTimeProvider::new());
        let mut manager =
            NoteManager::with_time_provider(StoreConfig::default(), clock.clone());
        let id = manager.create_note(Some("a")).id().to_string();
        manager.set_dirty(false);
        clock.advance(Duration::seconds(1));
        let events = recorded(&mut manager);

        assert_eq!(manager.set_note_title(&id, "b"), UpdateOutcome::Changed);

        assert_eq!(
            kinds(&events),
            [
                EventKind::NoteUpdatedAtChanged,
                EventKind::NoteTitleChanged,
                EventKind::DirtyChanged,
                EventKind::NoteModified
            ]
        );
        assert_eq!(manager.get_note(&id).unwrap().updated_at(), clock.now());
    }

    #[test]
    fn test_unchanged_setter_is_silent() {
        let mut manager = NoteManager::default();
        let id = manager.create_note(Some("same")).id().to_string();
        manager.set_dirty(false);
        let before = manager.get_note(&id).unwrap().updated_at();
        let events = recorded(&mut manager);

        assert_eq!(manager.set_note_title(&id, "same"), UpdateOutcome::Unchanged);
        assert_eq!(manager.set_note_pinned(&id, false), UpdateOutcome::Unchanged);

        assert!(events.borrow().is_empty());
        assert!(!manager.is_dirty());
        assert_eq!(manager.get_note(&id).unwrap().updated_at(), before);
    }

    #[test]
    fn test_update_note_emits_single_modified() {
        let mut manager = NoteManager::default();
        let id = manager.create_note(Some("t")).id().to_string();
        let events = recorded(&mut manager);

        let outcome = manager.update_note(
            &id,
            NoteUpdate::new()
                .with_title("t")
                .with_content("<p>body</p>")
                .with_pinned(true),
        );

        assert!(outcome.is_changed());
        let kinds = kinds(&events);
        assert!(!kinds.contains(&EventKind::NoteTitleChanged));
        assert!(kinds.contains(&EventKind::NoteContentChanged));
        assert!(kinds.contains(&EventKind::NotePinnedChanged));
        assert_eq!(kinds.last(), Some(&EventKind::NoteModified));
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == EventKind::NoteModified)
                .count(),
            1
        );
    }

    #[test]
    fn test_unknown_ids() {
        let mut manager = NoteManager::default();
        let events = recorded(&mut manager);

        assert!(!manager.delete_note("missing"));
        assert!(!manager.delete_category("missing"));
        assert_eq!(manager.set_note_title("missing", "x"), UpdateOutcome::NotFound);
        assert_eq!(
            manager.set_category_color("missing", Color::rgb(1, 2, 3)),
            UpdateOutcome::NotFound
        );
        assert!(manager.get_note("missing").is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_category_setters() {
        let mut manager = NoteManager::default();
        let parent = manager.create_category(Some("Parent")).id().to_string();
        let child = manager.create_category(Some("Child")).id().to_string();
        let events = recorded(&mut manager);

        assert!(manager.set_category_parent(&child, &parent).is_changed());
        assert_eq!(
            kinds(&events),
            [EventKind::CategoryParentChanged, EventKind::CategoryModified]
        );

        let roots: Vec<_> = manager.get_root_categories().iter().map(|c| c.id()).collect();
        assert_eq!(roots, [parent.as_str()]);
        let children: Vec<_> = manager
            .get_child_categories(&parent)
            .iter()
            .map(|c| c.id())
            .collect();
        assert_eq!(children, [child.as_str()]);
    }

    #[test]
    fn test_delete_category_keeps_references() {
        let mut manager = NoteManager::default();
        let category = manager.create_category(Some("Work")).id().to_string();
        let note = manager.create_note(Some("Standup")).id().to_string();
        manager.set_note_category(&note, &category);

        assert!(manager.delete_category(&category));
        assert_eq!(manager.get_note(&note).unwrap().category_id(), category);
        assert_eq!(manager.get_notes_by_category(&category).len(), 1);
    }

    #[test]
    fn test_subscribe_to_kind_and_unsubscribe() {
        let mut manager = NoteManager::default();
        let created = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&created);
        let id = manager.subscribe_to(EventKind::NoteCreated, move |_, _| {
            *counter.borrow_mut() += 1;
        });

        manager.create_note(None);
        manager.create_category(None);
        assert_eq!(*created.borrow(), 1);

        assert!(manager.unsubscribe(id));
        assert!(!manager.unsubscribe(id));
        manager.create_note(None);
        assert_eq!(*created.borrow(), 1);
        assert_eq!(manager.subscriber_count(), 0);
    }

    #[test]
    fn test_callbacks_can_query_manager() {
        let mut manager = NoteManager::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        manager.subscribe_to(EventKind::NotesChanged, move |_, manager| {
            sink.borrow_mut().push(manager.note_count());
        });

        let id = manager.create_note(None).id().to_string();
        manager.create_note(None);
        manager.delete_note(&id);

        assert_eq!(*seen.borrow(), [1, 2, 1]);
    }

    #[test]
    fn test_search_case_policy() {
        let mut manager = NoteManager::default();
        let id = manager.create_note(Some("Roadmap")).id().to_string();
        manager.set_note_content(&id, "<b>Quarterly</b> goals");
        manager.create_note(Some("Groceries"));

        assert_eq!(manager.search_notes("quarterly").len(), 1);
        assert!(manager
            .search_notes_with("quarterly", CaseSensitivity::Sensitive)
            .is_empty());
        assert_eq!(manager.search_notes("").len(), 2);
    }

    #[test]
    fn test_note_preview_uses_config_length() {
        let config = StoreConfig {
            preview_length: 5,
            ..StoreConfig::default()
        };
        let mut manager = NoteManager::new(config);
        let id = manager.create_note(None).id().to_string();
        manager.set_note_content(&id, "<p>Hello world</p>");

        assert_eq!(manager.note_preview(&id).as_deref(), Some("Hello..."));
        assert!(manager.note_preview("missing").is_none());
    }

    #[test]
    fn test_save_if_dirty_when_clean() {
        let mut manager = NoteManager::default();
        let events = recorded(&mut manager);
        assert!(!manager.save_if_dirty(Some(Path::new("/nonexistent/x.json"))).unwrap());
        assert!(events.borrow().is_empty());
    }
}
