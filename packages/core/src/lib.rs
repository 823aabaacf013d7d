//! NotepadPro Core
//!
//! In-memory repository for the notes and categories of a desktop
//! note-taking application, persisted as a single JSON document.
//!
//! # Architecture
//!
//! - **Plain entities**: `Note` and `Category` are records with guarded
//!   setters; they never notify anyone themselves
//! - **Single owner**: `NoteManager` owns every entity and is the only
//!   source of change events
//! - **Synchronous fan-out**: subscribers are called in registration order
//!   before a mutation returns; a broadcast channel mirrors the stream for
//!   async consumers
//! - **Lenient load, atomic save**: malformed records fall back to
//!   defaults, and the data file is replaced by rename
//!
//! # Modules
//!
//! - [`models`] - `Note`, `Category`, `Color`, clock abstraction
//! - [`services`] - `NoteManager`, `AutoSaver`
//! - [`store`] - events, subscriptions, data file, errors
//! - [`config`] - `StoreConfig` and data path resolution
//! - [`utils`] - markup stripping, previews, text statistics

pub mod config;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use config::{default_data_path, AutoSaveConfig, StoreConfig};
pub use models::*;
pub use services::*;
pub use store::{EventKind, LoadSummary, StoreError, StoreEvent, SubscriptionId, DATA_FILE_NAME};
