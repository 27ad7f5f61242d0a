//! Monotonic time source for span measurement.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Per-log clock: a monotonic origin plus a wall-clock anchor.
///
/// All span and message timestamps are nanoseconds relative to the origin,
/// so they stay comparable under clock adjustments. The wall anchor is
/// carried once per emitted batch so the collector can absolutize.
#[derive(Debug, Clone)]
pub struct Clock {
    origin: Instant,
    wall_start: SystemTime,
}

impl Clock {
    /// Capture a new origin at the current instant.
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
            wall_start: SystemTime::now(),
        }
    }

    /// Nanoseconds elapsed since the origin.
    pub fn elapsed_nanos(&self) -> u64 {
        // u64 nanos covers ~584 years of request lifetime.
        self.origin.elapsed().as_nanos() as u64
    }

    /// Wall-clock anchor as Unix-epoch milliseconds.
    pub fn wall_start_millis(&self) -> u64 {
        self.wall_start
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::start()
    }
}
