//! # The connectivity capability trait and listener bookkeeping.
//!
//! [`ConnectivityHost`] is the complete surface the status component needs
//! from its environment. Registration is infallible and listener callbacks
//! carry no payload: a woken listener re-reads the host flag itself, so the
//! channel a callback fires on is advisory.
//!
//! [`ListenerTable`] is the registration bookkeeping shared by the host
//! implementations in this crate; custom hosts are free to use it too.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::SystemTime;

use crate::events::ConnectivityEvent;

/// Identifier returned by [`ConnectivityHost::add_listener`], used to remove
/// exactly that registration later.
pub type ListenerId = u64;

/// Callback registered on a connectivity channel. No payload; re-read the
/// host flag for the current state.
pub type ConnectivityListener = Rc<dyn Fn()>;

/// Capabilities the status component needs from its environment.
///
/// Single-threaded like everything else in this crate: implementations live on
/// the thread that owns the reactive loop.
pub trait ConnectivityHost {
    /// Returns the environment's current connectivity flag.
    fn is_online(&self) -> bool;

    /// Returns the environment's wall clock.
    ///
    /// On the trait (rather than read ambiently) so tests control the
    /// timestamps the component stamps.
    fn now(&self) -> SystemTime;

    /// Registers `listener` on the given channel and returns its id.
    fn add_listener(&self, event: ConnectivityEvent, listener: ConnectivityListener)
        -> ListenerId;

    /// Removes the registration with `id`, if it exists.
    fn remove_listener(&self, id: ListenerId);
}

struct ListenerEntry {
    id: ListenerId,
    event: ConnectivityEvent,
    callback: ConnectivityListener,
}

/// Per-channel listener registry with stable ids.
///
/// Dispatch snapshots the matching callbacks before invoking them, so a
/// callback that adds or removes registrations mid-dispatch cannot invalidate
/// the iteration.
pub struct ListenerTable {
    next_id: Cell<ListenerId>,
    entries: RefCell<Vec<ListenerEntry>>,
}

impl ListenerTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Registers a callback on a channel and returns its id.
    pub fn insert(&self, event: ConnectivityEvent, callback: ConnectivityListener) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push(ListenerEntry {
            id,
            event,
            callback,
        });
        id
    }

    /// Removes the registration with `id`, if present.
    pub fn remove(&self, id: ListenerId) {
        self.entries.borrow_mut().retain(|e| e.id != id);
    }

    /// Returns how many callbacks are registered on `event`.
    pub fn count(&self, event: ConnectivityEvent) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.event == event)
            .count()
    }

    /// Returns the total registration count across both channels.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Invokes every callback registered on `event`; returns how many ran.
    ///
    /// Callbacks fire in registration order.
    pub fn dispatch(&self, event: ConnectivityEvent) -> usize {
        let snapshot: Vec<ConnectivityListener> = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.event == event)
            .map(|e| Rc::clone(&e.callback))
            .collect();
        for callback in &snapshot {
            callback();
        }
        snapshot.len()
    }
}

impl Default for ListenerTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_and_counts() {
        let table = ListenerTable::new();
        let noop: ConnectivityListener = Rc::new(|| {});

        let a = table.insert(ConnectivityEvent::Online, Rc::clone(&noop));
        let _b = table.insert(ConnectivityEvent::Offline, Rc::clone(&noop));
        assert_eq!(table.count(ConnectivityEvent::Online), 1);
        assert_eq!(table.count(ConnectivityEvent::Offline), 1);
        assert_eq!(table.len(), 2);

        table.remove(a);
        assert_eq!(table.count(ConnectivityEvent::Online), 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_dispatch_hits_only_matching_channel() {
        let table = ListenerTable::new();
        let hits = Rc::new(Cell::new(0u32));

        let cb: ConnectivityListener = {
            let hits = hits.clone();
            Rc::new(move || hits.set(hits.get() + 1))
        };
        table.insert(ConnectivityEvent::Online, Rc::clone(&cb));
        table.insert(ConnectivityEvent::Online, Rc::clone(&cb));
        table.insert(ConnectivityEvent::Offline, cb);

        assert_eq!(table.dispatch(ConnectivityEvent::Online), 2);
        assert_eq!(hits.get(), 2);
        assert_eq!(table.dispatch(ConnectivityEvent::Offline), 1);
        assert_eq!(hits.get(), 3);
    }
}
