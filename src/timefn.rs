// timefn - monotonic deadlines for the measurement loops
//
// std::time::Instant is monotonic on every supported platform, so a deadline
// is just a start instant plus a window. The loops that consult it poll
// `expired()` between iterations; nothing here preempts running work.

use std::time::{Duration, Instant};

/// Nanosecond count, as printed by the `window-bench` child.
pub type DurationNs = u64;

/// A wall-clock measurement window anchored at its creation time.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    end: Instant,
}

impl Deadline {
    /// Start a window of `window` length now.
    pub fn after(window: Duration) -> Self {
        let start = Instant::now();
        // Saturate absurd windows (e.g. `-s 1e30`) instead of overflowing.
        let end = start.checked_add(window).unwrap_or(start + Duration::from_secs(u32::MAX as u64));
        Deadline { start, end }
    }

    /// `true` once the current time is at or past the end of the window.
    #[inline]
    pub fn expired(&self) -> bool {
        Instant::now() >= self.end
    }

    /// Time since the window was opened.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Nanoseconds since the window was opened.
    pub fn elapsed_ns(&self) -> DurationNs {
        self.elapsed().as_nanos() as DurationNs
    }
}
