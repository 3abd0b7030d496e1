//! # Connectivity event channels.
//!
//! A host exposes exactly two event channels, `online` and `offline`. The
//! events themselves carry no payload: a listener that cares about the current
//! state re-reads the host flag instead of trusting the channel it was woken
//! on, so a late or coalesced delivery can never install a wrong value.

/// One of the two connectivity channels exposed by a host.
///
/// Doubles as the event value delivered through [`EventQueue`](super::EventQueue):
/// the channel name is the entire payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectivityEvent {
    /// The host gained network connectivity.
    Online,
    /// The host lost network connectivity.
    Offline,
}

impl ConnectivityEvent {
    /// Returns true for [`ConnectivityEvent::Online`].
    #[inline]
    pub fn is_online(&self) -> bool {
        matches!(self, ConnectivityEvent::Online)
    }

    /// Returns the host channel name (`"online"` / `"offline"`).
    ///
    /// Stable, snake_case, suitable for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConnectivityEvent::Online => "online",
            ConnectivityEvent::Offline => "offline",
        }
    }

    /// Maps a raw connectivity flag to the matching channel.
    ///
    /// Convenience for producers that sample a boolean source.
    pub fn from_online_flag(online: bool) -> Self {
        if online {
            ConnectivityEvent::Online
        } else {
            ConnectivityEvent::Offline
        }
    }
}
