//! Run configuration.

use std::fmt;
use std::str::FromStr;

use crate::sampler::{DelaySampler, TriangularDelay, UniformDelay};
use crate::{CoreError, CoreResult, SimRng};

// ── Strategy ──────────────────────────────────────────────────────────────────

/// Courier-to-order matching policy.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Any arrived courier takes the oldest ready order.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "fifo"))]
    Pooled,
    /// Each courier is bound at dispatch to the order it was sent for.
    #[cfg_attr(feature = "serde", serde(alias = "matched"))]
    PreBound,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Pooled, Strategy::PreBound];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Pooled => "pooled",
            Strategy::PreBound => "pre-bound",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pooled" | "fifo" => Ok(Strategy::Pooled),
            "pre-bound" | "prebound" | "matched" => Ok(Strategy::PreBound),
            other => Err(CoreError::Parse(format!(
                "unknown strategy {other:?}: expected \"pooled\" or \"pre-bound\""
            ))),
        }
    }
}

// ── DelayDistribution ─────────────────────────────────────────────────────────

/// Named distribution for courier transit delays.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DelayDistribution {
    #[default]
    Uniform,
    Triangular,
}

impl DelayDistribution {
    /// Build a sampler for this distribution drawing from `rng`.
    pub fn sampler(self, rng: SimRng) -> Box<dyn DelaySampler> {
        match self {
            DelayDistribution::Uniform => Box::new(UniformDelay::new(rng)),
            DelayDistribution::Triangular => Box::new(TriangularDelay::new(rng)),
        }
    }
}

impl FromStr for DelayDistribution {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(DelayDistribution::Uniform),
            "triangular" => Ok(DelayDistribution::Triangular),
            other => Err(CoreError::Parse(format!(
                "unknown distribution {other:?}: expected \"uniform\" or \"triangular\""
            ))),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Default idle-poll interval: 0.1 virtual seconds.
pub const DEFAULT_IDLE_POLL_MS: u64 = 100;

/// Top-level configuration for one simulation run.
///
/// Built by the CLI from flags, or loaded from a JSON file with the `serde`
/// feature, then checked with [`validate`][Self::validate] before the run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Orders submitted per virtual second of intake.
    pub orders_per_second: u32,

    /// Cook-pool capacity: orders prepared concurrently.
    pub cooks_in_kitchen: u32,

    pub strategy: Strategy,

    /// Lower bound of courier transit delay, seconds.
    pub transit_delay_min: f64,

    /// Upper bound of courier transit delay, seconds.
    pub transit_delay_max: f64,

    pub transit_distribution: DelayDistribution,

    /// Master RNG seed.  The same seed reproduces identical runs.
    pub seed: u64,

    /// Re-poll interval for loops with no work, virtual milliseconds.
    pub idle_poll_ms: u64,

    /// Real-time pacing: wall-clock seconds per virtual second.  `None`
    /// runs as fast as possible.
    pub realtime_factor: Option<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            orders_per_second:    2,
            cooks_in_kitchen:     5,
            strategy:             Strategy::Pooled,
            transit_delay_min:    3.0,
            transit_delay_max:    15.0,
            transit_distribution: DelayDistribution::Uniform,
            seed:                 42,
            idle_poll_ms:         DEFAULT_IDLE_POLL_MS,
            realtime_factor:      None,
        }
    }
}

impl SimConfig {
    /// Same configuration with a different strategy.
    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self { strategy, ..self.clone() }
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> CoreResult<()> {
        if self.orders_per_second == 0 {
            return Err(CoreError::Config("orders_per_second must be > 0".into()));
        }
        if self.cooks_in_kitchen == 0 {
            return Err(CoreError::Config("cooks_in_kitchen must be > 0".into()));
        }
        if !self.transit_delay_min.is_finite() || self.transit_delay_min < 0.0 {
            return Err(CoreError::Config(format!(
                "transit_delay_min must be a finite number >= 0, got {}",
                self.transit_delay_min
            )));
        }
        if !self.transit_delay_max.is_finite() || self.transit_delay_max < self.transit_delay_min {
            return Err(CoreError::Config(format!(
                "transit_delay_max ({}) must be finite and >= transit_delay_min ({})",
                self.transit_delay_max, self.transit_delay_min
            )));
        }
        if self.idle_poll_ms == 0 {
            return Err(CoreError::Config("idle_poll_ms must be > 0".into()));
        }
        if let Some(factor) = self.realtime_factor {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(CoreError::Config(format!(
                    "realtime_factor must be a finite number > 0, got {factor}"
                )));
            }
        }
        Ok(())
    }
}
