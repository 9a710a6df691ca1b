//! Guard against late responses overwriting newer state.
//!
//! A view that fires a request per interaction (changing a filter, paging,
//! switching hotels) can receive responses out of order. Each request takes a
//! [`Ticket`] before it is sent; when the response arrives it is only applied
//! if no newer ticket has been issued in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every outstanding ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Hand back `value` only if `ticket` is still the latest.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            None
        }
    }

    /// Discard every outstanding request, e.g. when a form is reset.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}
