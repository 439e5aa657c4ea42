//! Request generations
//!
//! Overlapping requests (two quick searches, say) may resolve out of order.
//! Each request takes a [`Ticket`] when it starts; when its response arrives
//! it is only applied if no newer ticket has been issued in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic generation counter
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: AtomicU64,
}

/// Proof that a request was started at a given generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    /// Generation number carried by this ticket
    pub fn generation(self) -> u64 {
        self.0
    }
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` belongs to the most recent request
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Keep `value` only if `ticket` is still current
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }

    /// Invalidate every outstanding ticket without starting a request
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }
}
