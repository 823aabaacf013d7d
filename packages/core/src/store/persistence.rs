//! JSON data file
//!
//! The whole store is one document:
//!
//! ```json
//! { "notes": [ {...}, ... ], "categories": [ {...}, ... ] }
//! ```
//!
//! Writes go to a sibling temp file that is then renamed over the target,
//! so readers never observe a half-written document. Reads are all or
//! nothing at the document level and lenient at the record level.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::StoreError;
use crate::models::{Category, Note};

/// File name of the default data file
pub const DATA_FILE_NAME: &str = "notepad_data.json";

const NOTES_KEY: &str = "notes";
const CATEGORIES_KEY: &str = "categories";

#[derive(Serialize)]
struct DataFileRef<'a> {
    notes: Vec<&'a Note>,
    categories: Vec<&'a Category>,
}

/// Outcome of a successful load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub path: PathBuf,
    pub notes: usize,
    pub categories: usize,
    /// Array entries that were not JSON objects and were dropped
    pub skipped_records: usize,
}

pub(crate) struct LoadedData {
    pub(crate) notes: HashMap<String, Note>,
    pub(crate) categories: HashMap<String, Category>,
    pub(crate) skipped_records: usize,
}

/// Serialize and atomically write the store to `path`.
///
/// Missing parent directories are created. Records are sorted by id so
/// repeated saves of the same data produce identical files.
pub(crate) fn write_data_file<'a>(
    path: &Path,
    notes: impl Iterator<Item = &'a Note>,
    categories: impl Iterator<Item = &'a Category>,
) -> Result<(), StoreError> {
    let mut notes: Vec<&Note> = notes.collect();
    notes.sort_by(|a, b| a.id().cmp(b.id()));
    let mut categories: Vec<&Category> = categories.collect();
    categories.sort_by(|a, b| a.id().cmp(b.id()));

    let document = DataFileRef { notes, categories };
    let serialized = serde_json::to_vec_pretty(&document)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidPath {
            path: path.to_path_buf(),
        })?
        .to_string_lossy()
        .into_owned();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let temp_path = path.with_file_name(format!("{}.tmp", file_name));
    let write_temp = || -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(&serialized)?;
        file.sync_all()
    };
    if let Err(e) = write_temp() {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::io(&temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StoreError::io(path, e)
    })?;

    debug!(path = %path.display(), bytes = serialized.len(), "Wrote data file");
    Ok(())
}

/// Read and decode the data file at `path`.
///
/// Fails without side effects if the file is missing, unreadable, not JSON,
/// or not an object whose `notes`/`categories` (when present) are arrays.
/// Inside the arrays, each object decodes with per-field defaults; other
/// values are skipped. Records without an id get a fresh one, and a
/// duplicated id keeps the last record.
pub(crate) fn read_data_file(path: &Path) -> Result<LoadedData, StoreError> {
    let bytes = fs::read(path).map_err(|e| StoreError::from_read(path, e))?;
    let root: Value = serde_json::from_slice(&bytes).map_err(|e| StoreError::parse(path, e))?;

    let Value::Object(root) = root else {
        return Err(StoreError::invalid_document(path, "root is not a JSON object"));
    };

    let note_values = records(path, &root, NOTES_KEY)?;
    let category_values = records(path, &root, CATEGORIES_KEY)?;
    let mut skipped_records = 0;

    let mut notes = HashMap::with_capacity(note_values.len());
    for (index, value) in note_values.iter().enumerate() {
        match Note::from_json(value) {
            Ok(mut note) => {
                if note.id().is_empty() {
                    let id = Uuid::new_v4().to_string();
                    warn!(index, new_id = %id, "Note record has no id, assigning a new one");
                    note.assign_id(id);
                }
                if let Some(previous) = notes.insert(note.id().to_string(), note) {
                    warn!(note_id = %previous.id(), "Duplicate note id in data file, keeping the last record");
                }
            }
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable note record");
                skipped_records += 1;
            }
        }
    }

    let mut categories = HashMap::with_capacity(category_values.len());
    for (index, value) in category_values.iter().enumerate() {
        match Category::from_json(value) {
            Ok(mut category) => {
                if category.id().is_empty() {
                    let id = Uuid::new_v4().to_string();
                    warn!(index, new_id = %id, "Category record has no id, assigning a new one");
                    category.assign_id(id);
                }
                if let Some(previous) = categories.insert(category.id().to_string(), category) {
                    warn!(category_id = %previous.id(), "Duplicate category id in data file, keeping the last record");
                }
            }
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable category record");
                skipped_records += 1;
            }
        }
    }

    Ok(LoadedData {
        notes,
        categories,
        skipped_records,
    })
}

/// A missing key is an empty collection; a present non-array is rejected.
fn records<'a>(
    path: &Path,
    root: &'a serde_json::Map<String, Value>,
    key: &str,
) -> Result<&'a [Value], StoreError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(values)) => Ok(values.as_slice()),
        Some(_) => Err(StoreError::invalid_document(
            path,
            format!("\"{}\" is not an array", key),
        )),
    }
}
