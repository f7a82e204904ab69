//! Virtual time model.
//!
//! # Design
//!
//! Virtual time is a monotonically increasing count of milliseconds since the
//! start of a run, held in `SimTime`.  Durations are plain `u64`
//! milliseconds.  Workload preparation times and sampled courier delays are
//! expressed in (fractional) seconds and converted once, at the edge, with
//! [`secs_to_millis`].
//!
//! Using an integer canonical unit keeps event ordering exact: two processes
//! that wake "at the same time" compare equal, and repeated idle polls of
//! 100 ms never drift.

use std::fmt;

/// Milliseconds per second.
pub const MILLIS_PER_SEC: u64 = 1_000;

/// Convert a duration in seconds to whole milliseconds.
///
/// Rounds to the nearest millisecond.  Negative and NaN inputs clamp to zero;
/// values past `u64::MAX` ms saturate.
#[inline]
pub fn secs_to_millis(secs: f64) -> u64 {
    if secs.is_nan() || secs <= 0.0 {
        return 0;
    }
    let ms = (secs * MILLIS_PER_SEC as f64).round();
    if ms >= u64::MAX as f64 { u64::MAX } else { ms as u64 }
}

/// Convert whole milliseconds to seconds.
#[inline]
pub fn millis_to_secs(ms: u64) -> f64 {
    ms as f64 / MILLIS_PER_SEC as f64
}

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute instant on the virtual clock, in milliseconds since run start.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// The instant `ms` milliseconds after `self` (saturating).
    #[inline]
    pub fn offset(self, ms: u64) -> SimTime {
        SimTime(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0 - earlier.0
    }

    /// Seconds elapsed from `earlier` to `self`.
    #[inline]
    pub fn secs_since(self, earlier: SimTime) -> f64 {
        millis_to_secs(self.since(earlier))
    }

    /// This instant expressed in seconds since run start.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        millis_to_secs(self.0)
    }

    /// Break the instant into (hours, minutes, seconds) for log lines.
    pub fn hms(self) -> (u64, u32, u32) {
        let total = self.0 / MILLIS_PER_SEC;
        let hours = total / 3_600;
        let minutes = ((total % 3_600) / 60) as u32;
        let seconds = (total % 60) as u32;
        (hours, minutes, seconds)
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        self.offset(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{:02}:{:02}:{:02}.{:03}", h, m, s, self.0 % MILLIS_PER_SEC)
    }
}
