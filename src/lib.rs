//! # netsignal
//!
//! **netsignal** is a lazily-subscribed network connectivity signal: an
//! observable online/offline flag plus a last-transition timestamp, mirrored
//! from a host environment **only while something is watching**. With no
//! observers attached, the component holds no event listeners and does no
//! work — the flag may go stale, and that is the intended trade-off, not a
//! bug.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   watcher thread (optional)            loop thread
//!   ┌──────────────────┐      ┌─────────────────────────────────────────┐
//!   │ platform glue    │      │  ConnectivityHost (QueueHost/Simulated) │
//!   │ push(Online/     ├─────►│    flag ─ clock ─ listener table        │
//!   │      Offline)    │      └───────┬─────────────────────▲───────────┘
//!   └──────────────────┘              │ events              │ add/remove
//!                                     ▼                     │ listener
//!                           ┌──────────────────┐    0↔1 dependent
//!                           │  NetworkStatus   │    transitions
//!                           │  raw_online: Var │◄───────────┐
//!                           │  last_changed_at │            │
//!                           │  online: Computed├────────────┘
//!                           └───────┬──────────┘
//!                                   │ tracked reads
//!                                   ▼
//!                           ┌──────────────────┐
//!                           │ Reaction(s)      │  re-run on change
//!                           └──────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! NetworkStatus::create()      no listeners, flag snapshotted
//!        │
//!        ├─ first Reaction reads is_online()
//!        │     └─► Computed activates (0→1) ─► add_listener × 2
//!        │
//!        ├─ host fires online/offline
//!        │     └─► one action: raw_online + last_changed_at together
//!        │            └─► affected reactions re-run once
//!        │
//!        └─ last Reaction disposed
//!              └─► Computed deactivates (1→0) ─► remove_listener × 2
//!                    (flag may now go stale; nothing polls)
//! ```
//!
//! ## Features
//! | Area            | Description                                              | Key types                           |
//! |-----------------|----------------------------------------------------------|-------------------------------------|
//! | **Status**      | Observation-gated online/offline mirror.                 | [`NetworkStatus`]                   |
//! | **Reactive**    | Explicit observables, memos, reactions, action batching. | [`Var`], [`Computed`], [`Reaction`], [`Runtime`] |
//! | **Hosts**       | Injected connectivity capability + implementations.      | [`ConnectivityHost`], [`QueueHost`] |
//! | **Events**      | Channel kinds and the bounded producer queue.            | [`ConnectivityEvent`], [`ConnectivitySender`] |
//! | **Errors**      | Typed queue-overflow errors.                             | [`QueueError`]                      |
//!
//! ## Optional features
//! - `simulated` *(default)*: exports [`SimulatedHost`], an in-memory host
//!   with a manual clock for tests and demos.
//!
//! ## Example
//! ```rust
//! use std::rc::Rc;
//! use netsignal::{NetworkStatus, Reaction, Runtime, SimulatedHost};
//!
//! let runtime = Runtime::new();
//! let host = SimulatedHost::new(true);
//! let status = NetworkStatus::create(&runtime, Rc::new(host.clone()));
//!
//! // Attaching the first observer installs the host listeners.
//! let watcher = {
//!     let status = status.clone();
//!     Reaction::new(&runtime, "status-line", move || {
//!         if status.is_online() {
//!             println!("Network Status: Online");
//!         } else {
//!             println!("Network Status: Offline since {:?}", status.last_changed_at());
//!         }
//!     })
//! };
//!
//! host.go_offline();
//! assert!(!status.is_online());
//!
//! // Disposing the last observer removes them again.
//! watcher.dispose();
//! host.go_online();
//! assert!(!status.is_online()); // stale by design while unobserved
//! ```

mod error;
mod events;
mod host;
mod reactive;
mod status;

// ---- Public re-exports ----

pub use error::QueueError;
pub use events::{ConnectivityEvent, ConnectivitySender, EventQueue};
pub use host::{ConnectivityHost, ConnectivityListener, ListenerId, ListenerTable, QueueConfig, QueueHost};
pub use reactive::{ActivationHooks, Computed, Reaction, Runtime, RuntimeConfig, Var};
pub use status::NetworkStatus;

// Optional: expose the scripted host for tests and demos.
// Enable with: `--features simulated` (on by default).
#[cfg(feature = "simulated")]
pub use host::SimulatedHost;
