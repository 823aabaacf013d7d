//! Store Layer
//!
//! Change events, subscriber dispatch, the JSON data file and the errors
//! that saving or loading it can produce.

mod error;
pub mod events;
mod persistence;
mod subscribers;

pub use error::StoreError;
pub use events::{EventKind, StoreEvent};
pub use persistence::{LoadSummary, DATA_FILE_NAME};
pub use subscribers::{Callback, SubscriptionId};

pub(crate) use persistence::{read_data_file, write_data_file};
pub(crate) use subscribers::Subscribers;
