//! Connectivity hosts: the injected capability boundary.
//!
//! The status component never touches ambient globals. Everything it needs
//! from the environment — the current online flag, a clock, and listener
//! registration on the `online`/`offline` channels — comes through the
//! [`ConnectivityHost`] trait, so any event source can back it and tests can
//! substitute a fake.
//!
//! ## Implementations
//! - [`QueueHost`] — fed by a bounded queue; platform glue on any thread
//!   pushes [`ConnectivityEvent`](crate::ConnectivityEvent)s, the owning loop
//!   drains them with [`QueueHost::poll`].
//! - [`SimulatedHost`] *(feature `simulated`)* — in-memory host with a manual
//!   clock, for tests and demos.

mod connectivity;
mod queue;
#[cfg(feature = "simulated")]
mod simulated;

pub use connectivity::{ConnectivityHost, ConnectivityListener, ListenerId, ListenerTable};
pub use queue::{QueueConfig, QueueHost};
#[cfg(feature = "simulated")]
pub use simulated::SimulatedHost;
