//! # In-memory connectivity host for tests and demos.
//!
//! [`SimulatedHost`] owns a connectivity flag, a manual clock, and a listener
//! table. Tests drive it directly: [`SimulatedHost::go_offline`] flips the
//! flag and fires the `offline` channel exactly the way a real environment
//! would, and [`SimulatedHost::advance`] moves the clock so transition
//! timestamps are assertable.
//!
//! Enabled via the `simulated` feature (on by default). Reference-grade, like
//! any fake: not meant to ship inside a production host.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, SystemTime};

use crate::events::ConnectivityEvent;
use crate::host::connectivity::{
    ConnectivityHost, ConnectivityListener, ListenerId, ListenerTable,
};

struct SimulatedInner {
    online: Cell<bool>,
    clock: Cell<SystemTime>,
    listeners: ListenerTable,
}

/// A scripted connectivity host.
///
/// Cheap to clone; all clones share the same flag, clock, and listener table,
/// which is how a test keeps a driving handle after giving one to
/// [`NetworkStatus::create`](crate::NetworkStatus::create).
#[derive(Clone)]
pub struct SimulatedHost {
    inner: Rc<SimulatedInner>,
}

impl SimulatedHost {
    /// Creates a host reporting `online`, with the clock at the current time.
    pub fn new(online: bool) -> Self {
        Self {
            inner: Rc::new(SimulatedInner {
                online: Cell::new(online),
                clock: Cell::new(SystemTime::now()),
                listeners: ListenerTable::new(),
            }),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.inner.clock.set(self.inner.clock.get() + by);
    }

    /// Returns the current (manual) clock reading.
    pub fn clock(&self) -> SystemTime {
        self.inner.clock.get()
    }

    /// Sets the flag online and fires the `online` channel.
    ///
    /// With no listeners registered this only moves the flag — exactly the
    /// "event fires while nobody is subscribed" case.
    pub fn go_online(&self) {
        self.transition(ConnectivityEvent::Online);
    }

    /// Sets the flag offline and fires the `offline` channel.
    pub fn go_offline(&self) {
        self.transition(ConnectivityEvent::Offline);
    }

    /// Returns how many listeners are registered on `event`.
    pub fn listener_count(&self, event: ConnectivityEvent) -> usize {
        self.inner.listeners.count(event)
    }

    /// Returns the total listener count across both channels.
    pub fn total_listeners(&self) -> usize {
        self.inner.listeners.len()
    }

    fn transition(&self, event: ConnectivityEvent) {
        self.inner.online.set(event.is_online());
        let delivered = self.inner.listeners.dispatch(event);
        tracing::trace!(
            event = event.as_label(),
            delivered,
            "simulated connectivity transition"
        );
    }
}

impl ConnectivityHost for SimulatedHost {
    fn is_online(&self) -> bool {
        self.inner.online.get()
    }

    fn now(&self) -> SystemTime {
        self.inner.clock.get()
    }

    fn add_listener(
        &self,
        event: ConnectivityEvent,
        listener: ConnectivityListener,
    ) -> ListenerId {
        self.inner.listeners.insert(event, listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.inner.listeners.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_flip_flag_and_fire_matching_channel() {
        let host = SimulatedHost::new(true);
        let offline_hits = Rc::new(Cell::new(0u32));

        let cb: ConnectivityListener = {
            let hits = offline_hits.clone();
            Rc::new(move || hits.set(hits.get() + 1))
        };
        host.add_listener(ConnectivityEvent::Offline, cb);

        host.go_offline();
        assert!(!host.is_online());
        assert_eq!(offline_hits.get(), 1);

        host.go_online(); // no online listener registered
        assert!(host.is_online());
        assert_eq!(offline_hits.get(), 1);
    }

    #[test]
    fn test_advance_moves_the_clock_exactly() {
        let host = SimulatedHost::new(true);
        let t0 = host.clock();
        host.advance(Duration::from_secs(90));
        assert_eq!(host.now(), t0 + Duration::from_secs(90));
    }
}
