//! # Channel-fed connectivity host.
//!
//! [`QueueHost`] is the embedding-side host implementation: platform glue on
//! any thread (a netlink watcher, a reachability probe, an OS notification
//! callback) pushes [`ConnectivityEvent`]s through a bounded
//! [`ConnectivitySender`], and the thread that owns the reactive loop drains
//! them with [`QueueHost::poll`].
//!
//! ## Architecture
//! ```text
//! watcher thread ──push()──► EventQueue ──poll()──► flag update
//!                            (bounded)                 └─► listener dispatch
//! ```
//!
//! ## Rules
//! - `poll()` applies events in arrival order: flag first, then listener
//!   dispatch, one event at a time.
//! - An event dropped on overflow is recovered by the next event in the same
//!   direction; the component re-reads the flag rather than counting edges.
//! - `poll()` is the only place listeners fire; the host never reaches into
//!   the reactive layer on its own.

use std::cell::Cell;
use std::time::SystemTime;

use crate::events::{ConnectivityEvent, ConnectivitySender, EventQueue};
use crate::host::connectivity::{
    ConnectivityHost, ConnectivityListener, ListenerId, ListenerTable,
};

/// Configuration for a [`QueueHost`].
///
/// ## Field semantics
/// - `capacity`: bounded queue size (min 1; clamped)
/// - `initial_online`: flag reported before the first event arrives
#[derive(Clone, Copy, Debug)]
pub struct QueueConfig {
    /// Capacity of the event queue. Producers that outrun `poll()` by more
    /// than this get [`QueueError::Full`](crate::QueueError::Full).
    pub capacity: usize,

    /// Connectivity flag assumed until the first event is applied.
    pub initial_online: bool,
}

impl Default for QueueConfig {
    /// Defaults:
    /// - `capacity = 64` (connectivity transitions are rare; this is generous)
    /// - `initial_online = true` (most processes start connected)
    fn default() -> Self {
        Self {
            capacity: 64,
            initial_online: true,
        }
    }
}

/// A connectivity host fed by a bounded event queue.
///
/// Lives on the loop thread; only the [`ConnectivitySender`] half crosses
/// threads.
pub struct QueueHost {
    online: Cell<bool>,
    queue: EventQueue,
    listeners: ListenerTable,
}

impl QueueHost {
    /// Creates the host and the producer handle feeding it.
    pub fn new(config: QueueConfig) -> (QueueHost, ConnectivitySender) {
        let (sender, queue) = EventQueue::bounded(config.capacity);
        let host = QueueHost {
            online: Cell::new(config.initial_online),
            queue,
            listeners: ListenerTable::new(),
        };
        (host, sender)
    }

    /// Drains queued events, applying each to the flag and dispatching its
    /// channel's listeners. Returns how many events were applied.
    ///
    /// Call this from the loop that owns the reactive graph.
    pub fn poll(&self) -> usize {
        let mut applied = 0usize;
        while let Some(event) = self.queue.try_next() {
            self.online.set(event.is_online());
            let delivered = self.listeners.dispatch(event);
            applied += 1;
            tracing::debug!(
                event = event.as_label(),
                delivered,
                "connectivity event applied"
            );
        }
        applied
    }
}

impl ConnectivityHost for QueueHost {
    fn is_online(&self) -> bool {
        self.online.get()
    }

    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn add_listener(
        &self,
        event: ConnectivityEvent,
        listener: ConnectivityListener,
    ) -> ListenerId {
        self.listeners.insert(event, listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_poll_applies_flag_and_dispatches_in_order() {
        let (host, sender) = QueueHost::new(QueueConfig::default());
        assert!(host.is_online(), "default config starts online");

        let offline_hits = Rc::new(Cell::new(0u32));
        let cb: ConnectivityListener = {
            let hits = offline_hits.clone();
            Rc::new(move || hits.set(hits.get() + 1))
        };
        host.add_listener(ConnectivityEvent::Offline, cb);

        sender.push(ConnectivityEvent::Offline).expect("push");
        sender.push(ConnectivityEvent::Online).expect("push");
        sender.push(ConnectivityEvent::Offline).expect("push");

        assert_eq!(host.poll(), 3);
        assert!(!host.is_online(), "flag ends at the last applied event");
        assert_eq!(offline_hits.get(), 2, "offline channel fired twice");
    }

    #[test]
    fn test_poll_on_empty_queue_is_a_noop() {
        let (host, _sender) = QueueHost::new(QueueConfig {
            capacity: 2,
            initial_online: false,
        });
        assert_eq!(host.poll(), 0);
        assert!(!host.is_online());
    }
}
