//! Real-time pacing of virtual time.
//!
//! With pacing enabled the scheduler sleeps before each clock advance so that
//! virtual instant `t` is reached no earlier than `start + t × factor` on the
//! wall clock.  A factor of 1.0 makes a 5 s delay take 5 s.  Ordering and
//! results are unaffected.

use std::time::{Duration, Instant};

use ks_core::SimTime;

/// Lag beyond which a warning is logged, in wall-clock milliseconds.
const LAG_WARN_MS: u128 = 1_000;

#[derive(Debug)]
pub struct Pacing {
    factor: f64,
    start:  Option<Instant>,
    lagged: bool,
}

impl Pacing {
    /// Wall-clock seconds per virtual second.  Non-positive factors are
    /// rejected upstream by `SimConfig::validate`.
    pub fn new(factor: f64) -> Self {
        Self { factor, start: None, lagged: false }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Block until the wall clock has caught up with `target`.
    pub fn wait_until(&mut self, target: SimTime) {
        let start = *self.start.get_or_insert_with(Instant::now);
        let due = start + Duration::from_secs_f64(target.as_secs_f64() * self.factor);
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        } else if !self.lagged && (now - due).as_millis() > LAG_WARN_MS {
            self.lagged = true;
            log::warn!("real-time pacing is {:?} behind at {target}", now - due);
        }
    }
}
