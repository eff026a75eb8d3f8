// Deadline handling
//
// One Deadline is established per endpoint-test cycle and shared by every
// invocation attempt (cold and warm) in that cycle. The remaining budget is
// recomputed at the start of each attempt and handed to the transport, so an
// attempt in flight when the deadline expires is cancelled at the connection
// level rather than awaited to completion.

use std::time::{Duration, Instant};

/// An absolute point in time bounding all attempts of one endpoint test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline at the given instant
    pub fn at(instant: Instant) -> Self {
        Self { at: instant }
    }

    /// Deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// Time left until the deadline, or None once it has passed
    pub fn remaining(&self) -> Option<Duration> {
        self.at.checked_duration_since(Instant::now())
    }

    /// Whether the deadline has already passed
    pub fn is_expired(&self) -> bool {
        self.remaining().is_none()
    }
}
