//! Error types for the connectivity event queue.
//!
//! The reactive layer and the [`NetworkStatus`](crate::NetworkStatus) component
//! have no failure modes of their own: listener attach/detach correctness is
//! guaranteed by the zero↔one dependent-count transitions, not handled after the
//! fact. The only fallible surface is the non-blocking producer side of the
//! bounded connectivity queue, which can find the queue full or its consumer
//! gone.

use thiserror::Error;

/// Errors produced when pushing a connectivity event into a bounded queue.
///
/// Returned by [`ConnectivitySender::push`](crate::ConnectivitySender::push).
/// Both variants are non-fatal for the producer: the event is simply dropped.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The queue is at capacity; the event was dropped.
    #[error("connectivity queue is full; event dropped")]
    Full,

    /// The consuming side was dropped; no event will ever be delivered again.
    #[error("connectivity queue is closed; consumer dropped")]
    Closed,
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use netsignal::QueueError;
    ///
    /// assert_eq!(QueueError::Full.as_label(), "queue_full");
    /// assert_eq!(QueueError::Closed.as_label(), "queue_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::Full => "queue_full",
            QueueError::Closed => "queue_closed",
        }
    }
}
