//! Utility functions for the note store

mod markup;

pub use markup::{preview, strip_markup, text_stats, TextStats, ELLIPSIS};
