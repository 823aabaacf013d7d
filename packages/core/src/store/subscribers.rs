//! Ordered subscriber list
//!
//! Callbacks run synchronously, in registration order, on the thread that
//! performed the mutation. They receive the event and a shared reference to
//! the manager so they can re-query current state while reacting.

use std::fmt;

use super::events::{EventKind, StoreEvent};
use crate::services::NoteManager;

/// Subscriber callback
pub type Callback = Box<dyn FnMut(&StoreEvent, &NoteManager)>;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    filter: Option<EventKind>,
    callback: Callback,
}

#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<Subscriber>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, filter: Option<EventKind>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push(Subscriber {
            id,
            filter,
            callback,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|subscriber| subscriber.id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn dispatch(&mut self, event: &StoreEvent, manager: &NoteManager) {
        let kind = event.kind();
        for subscriber in &mut self.entries {
            if subscriber.filter.map_or(true, |filter| filter == kind) {
                (subscriber.callback)(event, manager);
            }
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
