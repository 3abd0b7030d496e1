//! Connectivity events: channel kinds and the bounded feed queue.
//!
//! This module groups the event **data model** and the **queue** used to carry
//! host connectivity transitions from producer threads to the single-threaded
//! reactive loop.
//!
//! ## Contents
//! - [`ConnectivityEvent`] the two host event channels (`online` / `offline`)
//! - [`EventQueue`] / [`ConnectivitySender`] bounded, non-blocking hand-off
//!
//! ## Quick reference
//! - **Producers**: platform glue on any thread (a netlink watcher, a reachability
//!   probe, a UI callback) pushing through [`ConnectivitySender`].
//! - **Consumer**: [`QueueHost::poll`](crate::QueueHost::poll) on the owning
//!   thread, which applies each event to the host flag and dispatches listeners.

mod event;
mod queue;

pub use event::ConnectivityEvent;
pub use queue::{ConnectivitySender, EventQueue};
