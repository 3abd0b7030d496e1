//! # Bounded hand-off queue for connectivity events.
//!
//! [`EventQueue`] is a thin wrapper around [`std::sync::mpsc::sync_channel`]
//! that provides non-blocking event publishing from producer threads to the
//! single thread that owns the reactive loop.
//!
//! ## Architecture
//! ```text
//! Producers (any thread):              Consumer (loop thread):
//!   netlink watcher ──┐
//!   probe thread    ──┼──► EventQueue ───► QueueHost::poll() ──► listeners
//!   UI callback     ──┘   (bounded chan)
//! ```
//!
//! ## Rules
//! - **Non-blocking push**: [`ConnectivitySender::push`] never blocks; a full
//!   queue drops the event and reports [`QueueError::Full`].
//! - **Bounded capacity**: fixed at construction, clamped to a minimum of 1.
//! - **No persistence**: once the consumer is dropped, producers get
//!   [`QueueError::Closed`] and the event is lost.
//!
//! Connectivity transitions are idempotent from the consumer's point of view
//! (the component re-reads the host flag), so a dropped event is recovered by
//! the next one in the same direction.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use crate::error::QueueError;
use crate::events::ConnectivityEvent;

/// Producer handle for a bounded connectivity queue.
///
/// Cheap to clone; safe to hand to other threads. All clones feed the same
/// queue.
#[derive(Clone, Debug)]
pub struct ConnectivitySender {
    tx: SyncSender<ConnectivityEvent>,
}

impl ConnectivitySender {
    /// Pushes an event without blocking.
    ///
    /// ### Errors
    /// - [`QueueError::Full`] — queue at capacity, event dropped
    /// - [`QueueError::Closed`] — consumer dropped, event dropped
    pub fn push(&self, event: ConnectivityEvent) -> Result<(), QueueError> {
        self.tx.try_send(event).map_err(|e| {
            let err = match e {
                TrySendError::Full(_) => QueueError::Full,
                TrySendError::Disconnected(_) => QueueError::Closed,
            };
            tracing::debug!(
                event = event.as_label(),
                reason = err.as_label(),
                "connectivity event dropped"
            );
            err
        })
    }
}

/// Consuming side of a bounded connectivity queue.
///
/// Lives on the thread that owns the reactive loop; drained with
/// [`EventQueue::try_next`].
#[derive(Debug)]
pub struct EventQueue {
    rx: Receiver<ConnectivityEvent>,
}

impl EventQueue {
    /// Creates a bounded queue with the given capacity (clamped to ≥ 1).
    pub fn bounded(capacity: usize) -> (ConnectivitySender, EventQueue) {
        let (tx, rx) = mpsc::sync_channel(capacity.max(1));
        (ConnectivitySender { tx }, EventQueue { rx })
    }

    /// Removes and returns the oldest queued event, if any.
    ///
    /// Never blocks. Returns `None` both when the queue is momentarily empty
    /// and when every sender has been dropped.
    pub fn try_next(&self) -> Option<ConnectivityEvent> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_drain_is_fifo() {
        let (tx, queue) = EventQueue::bounded(4);
        tx.push(ConnectivityEvent::Offline).expect("push offline");
        tx.push(ConnectivityEvent::Online).expect("push online");

        assert_eq!(queue.try_next(), Some(ConnectivityEvent::Offline));
        assert_eq!(queue.try_next(), Some(ConnectivityEvent::Online));
        assert_eq!(queue.try_next(), None);
    }

    #[test]
    fn test_full_queue_reports_full() {
        let (tx, _queue) = EventQueue::bounded(1);
        tx.push(ConnectivityEvent::Online).expect("first push fits");
        assert_eq!(
            tx.push(ConnectivityEvent::Offline),
            Err(QueueError::Full),
            "second push must overflow a capacity-1 queue"
        );
    }

    #[test]
    fn test_dropped_consumer_reports_closed() {
        let (tx, queue) = EventQueue::bounded(4);
        drop(queue);
        assert_eq!(tx.push(ConnectivityEvent::Online), Err(QueueError::Closed));
    }

    #[test]
    fn test_zero_capacity_is_clamped_to_one() {
        let (tx, queue) = EventQueue::bounded(0);
        tx.push(ConnectivityEvent::Online)
            .expect("clamped queue holds one event");
        assert_eq!(queue.try_next(), Some(ConnectivityEvent::Online));
    }
}
