/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Time sources for the harness.
//!
//! On x86_64 the harness reads the time-stamp counter, so results are in
//! cycles. Everywhere else it falls back to [`std::time::Instant`] and results
//! are in nanoseconds, which is coarser and includes the cost of a
//! `clock_gettime`-style call.

use std::time::Instant;

/// A monotonic tick counter.
pub trait Clock {
    /// The current tick count. Only differences between two readings are meaningful.
    fn now(&self) -> u64;
}

/// Reads the CPU time-stamp counter.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleCounter;

#[cfg(target_arch = "x86_64")]
impl Clock for CycleCounter {
    #[inline(always)]
    fn now(&self) -> u64 {
        // Safety: `rdtsc` is available on every x86_64 CPU and has no
        // preconditions.
        unsafe { core::arch::x86_64::_rdtsc() }
    }
}

/// Nanoseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now(&self) -> u64 {
        // Wraps after ~584 years.
        self.origin.elapsed().as_nanos() as u64
    }
}

/// The finest-grained clock available on the target.
#[cfg(target_arch = "x86_64")]
pub type PlatformClock = CycleCounter;

/// The finest-grained clock available on the target.
#[cfg(not(target_arch = "x86_64"))]
pub type PlatformClock = MonotonicClock;

/// The unit [`PlatformClock`] ticks in, for report headers and logs.
pub const PLATFORM_UNIT: &str = if cfg!(target_arch = "x86_64") {
    "cycles"
} else {
    "ns"
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_clock_is_monotonic() {
        let clock = PlatformClock::default();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let start = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(1));
        assert!(clock.now() - start >= 1_000_000);
    }
}
