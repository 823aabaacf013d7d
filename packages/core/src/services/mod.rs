//! Services
//!
//! - `NoteManager` - the note/category repository: CRUD, queries,
//!   persistence and change notification
//! - `AutoSaver` - periodic save decision driven by the host's timer

mod autosave;
mod note_manager;

pub use autosave::AutoSaver;
pub use note_manager::{NoteManager, UpdateOutcome};
