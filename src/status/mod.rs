//! The network status component.
//!
//! [`NetworkStatus`] wires the reactive core to a [`ConnectivityHost`](crate::ConnectivityHost):
//! an observable raw flag and transition timestamp, a memoized `online`
//! projection, and a host event subscription that exists exactly while the
//! projection is observed.

mod network;

pub use network::NetworkStatus;
