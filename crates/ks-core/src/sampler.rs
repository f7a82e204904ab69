//! Pluggable courier transit-delay sampling.
//!
//! The delivery component never draws random numbers itself: it asks a
//! [`DelaySampler`] for a delay in `[min, max]` seconds.  The configuration
//! names the distribution ([`DelayDistribution`][crate::DelayDistribution])
//! and [`DelayDistribution::sampler`][crate::DelayDistribution::sampler]
//! builds the matching sampler.  Tests plug in closures for exact delays.

use rand_distr::{Distribution, Triangular, Uniform};

use crate::SimRng;

/// Draws a transit delay, in seconds, for one courier.
///
/// Any `FnMut(f64, f64) -> f64` is a sampler, which keeps test fixtures short:
///
/// ```rust,ignore
/// let fixed = |_min: f64, _max: f64| 1.0;
/// ```
pub trait DelaySampler {
    /// Sample a delay in seconds.  Implementations should stay within
    /// `[min, max]`; callers clamp negative results to zero.
    fn sample(&mut self, min: f64, max: f64) -> f64;
}

impl<F> DelaySampler for F
where
    F: FnMut(f64, f64) -> f64,
{
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        self(min, max)
    }
}

// ── Uniform ───────────────────────────────────────────────────────────────────

/// Uniform delay over `[min, max]`.
pub struct UniformDelay {
    rng: SimRng,
}

impl UniformDelay {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }
}

impl DelaySampler for UniformDelay {
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        Uniform::new_inclusive(min, max).sample(self.rng.inner())
    }
}

// ── Triangular ────────────────────────────────────────────────────────────────

/// Triangular delay over `[min, max]` peaking at the midpoint.
///
/// Same support as [`UniformDelay`] with fewer extreme arrivals.
pub struct TriangularDelay {
    rng: SimRng,
}

impl TriangularDelay {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }
}

impl DelaySampler for TriangularDelay {
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        let mode = min + (max - min) / 2.0;
        match Triangular::new(min, max, mode) {
            Ok(dist) => dist.sample(self.rng.inner()),
            // Only reachable with non-finite bounds.
            Err(_) => min,
        }
    }
}
