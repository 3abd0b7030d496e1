//! # Observation-gated network status.
//!
//! [`NetworkStatus`] mirrors a host's connectivity flag into the reactive
//! graph. While at least one observer is attached to the derived `online`
//! value, the component listens to the host's `online`/`offline` channels and
//! keeps the flag authoritative. With no observers it unsubscribes entirely —
//! the flag may then go stale, which is the intended trade-off: an unobserved
//! status costs nothing, not even event handling.
//!
//! ## Lifecycle
//! ```text
//!                 first observer attaches to `online`
//!    Inactive ──────────────────────────────────────► Active
//!    (no listeners,      ◄──────────────────────────  (one listener per
//!     flag may be stale)   last observer detaches      channel, flag live)
//! ```
//!
//! ## Update routine
//! On either channel firing, one action re-reads `host.is_online()` into the
//! raw flag and stamps `host.now()` into the transition timestamp. Observers
//! never see one of the pair without the other.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::SystemTime;

use crate::events::ConnectivityEvent;
use crate::host::{ConnectivityHost, ConnectivityListener, ListenerId};
use crate::reactive::{ActivationHooks, Computed, Runtime, Var};

/// Observable online/offline state, subscribed to the host only while
/// observed.
///
/// Cheap to clone; all clones are handles to the same state.
///
/// ## Example
/// ```
/// use std::rc::Rc;
/// use netsignal::{NetworkStatus, Reaction, Runtime, SimulatedHost};
///
/// let runtime = Runtime::new();
/// let host = SimulatedHost::new(true);
/// let status = NetworkStatus::create(&runtime, Rc::new(host.clone()));
///
/// let watcher = {
///     let status = status.clone();
///     Reaction::new(&runtime, "status-line", move || {
///         let line = if status.is_online() { "Online" } else { "Offline" };
///         println!("Network Status: {line}");
///     })
/// };
///
/// host.go_offline();
/// assert!(!status.is_online());
/// drop(watcher); // last observer gone: listeners are removed
/// ```
#[derive(Clone)]
pub struct NetworkStatus {
    raw_online: Var<bool>,
    last_changed_at: Var<SystemTime>,
    online: Computed<bool>,
    host: Rc<dyn ConnectivityHost>,
}

impl NetworkStatus {
    /// Creates an instance snapshotting the host's current flag and clock.
    ///
    /// No listeners are installed here; subscription starts with the first
    /// observer of [`NetworkStatus::is_online`].
    pub fn create(runtime: &Runtime, host: Rc<dyn ConnectivityHost>) -> Self {
        let raw_online = Var::new(runtime, "raw_online", host.is_online());
        let last_changed_at = Var::new(runtime, "last_changed_at", host.now());

        // Single callback shared by both channels. It re-reads the host flag
        // rather than trusting the channel it fired on, and holds the host
        // weakly so a registered listener cannot keep the host alive.
        let update: ConnectivityListener = {
            let runtime = runtime.clone();
            let raw_online = raw_online.clone();
            let last_changed_at = last_changed_at.clone();
            let host = Rc::downgrade(&host);
            Rc::new(move || {
                let Some(host) = host.upgrade() else {
                    return;
                };
                tracing::trace!("connectivity update");
                runtime.action(|| {
                    raw_online.set(host.is_online());
                    last_changed_at.set(host.now());
                });
            })
        };

        let listeners: Rc<RefCell<Option<(ListenerId, ListenerId)>>> =
            Rc::new(RefCell::new(None));
        let hooks = {
            let attach = {
                let host = Rc::clone(&host);
                let listeners = Rc::clone(&listeners);
                let update = Rc::clone(&update);
                move || {
                    let online_id =
                        host.add_listener(ConnectivityEvent::Online, Rc::clone(&update));
                    let offline_id =
                        host.add_listener(ConnectivityEvent::Offline, Rc::clone(&update));
                    *listeners.borrow_mut() = Some((online_id, offline_id));
                    tracing::debug!("network status listeners attached");
                }
            };
            let detach = {
                let host = Rc::clone(&host);
                let listeners = Rc::clone(&listeners);
                move || {
                    if let Some((online_id, offline_id)) = listeners.borrow_mut().take() {
                        host.remove_listener(online_id);
                        host.remove_listener(offline_id);
                        tracing::debug!("network status listeners detached");
                    }
                }
            };
            ActivationHooks::new().on_activate(attach).on_deactivate(detach)
        };

        let online = {
            let raw_online = raw_online.clone();
            Computed::with_hooks(runtime, "online", move || raw_online.get(), hooks)
        };

        Self {
            raw_online,
            last_changed_at,
            online,
            host,
        }
    }

    /// Returns true if the host is online, false otherwise.
    ///
    /// Memoized. Reading this inside a [`Reaction`](crate::Reaction) attaches
    /// the reaction as an observer — the first such observer starts the host
    /// subscription, the last one leaving stops it. While unobserved the
    /// value may be stale.
    pub fn is_online(&self) -> bool {
        self.online.get()
    }

    /// Returns the last time the online status changed.
    ///
    /// Defaults to the creation time, and is re-stamped on every observed
    /// transition. Tracked like any observable read.
    pub fn last_changed_at(&self) -> SystemTime {
        self.last_changed_at.get()
    }

    /// Returns the host this instance mirrors.
    pub fn host(&self) -> &Rc<dyn ConnectivityHost> {
        &self.host
    }

    /// Returns how many observers are currently attached to the derived
    /// online value. Zero means no host subscription exists.
    pub fn observer_count(&self) -> usize {
        self.online.observer_count()
    }

    #[cfg(all(test, feature = "simulated"))]
    pub(crate) fn raw_online_for_tests(&self) -> &Var<bool> {
        &self.raw_online
    }
}
