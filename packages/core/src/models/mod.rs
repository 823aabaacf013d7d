//! Data Models
//!
//! - `Note` - a titled rich-text note, optionally filed under a category
//! - `Category` - a named, coloured node in the category forest
//! - `Color` - RGB value serialized as `#rrggbb`
//! - `time` - clock abstraction used for all timestamps
//!
//! Entities are plain records with guarded setters. They do not emit
//! events themselves; see [`crate::store::events`].

mod category;
mod color;
mod lenient;
mod note;
pub mod time;

pub use category::Category;
pub use color::{Color, ColorParseError};
pub use note::{CaseSensitivity, Note, NoteUpdate};
