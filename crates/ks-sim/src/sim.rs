//! `Simulation`, its builder, and the run entry point.

use ks_core::{DelaySampler, EventSink, SimConfig, SimRng};
use ks_engine::{Pacing, RunStats, Scheduler};
use ks_model::{Delivery, Kitchen, OrderSpec};

use crate::floor::{Floor, Intake, KitchenLoop, MatchingLoop};
use crate::{RunReport, SimResult};

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`Simulation`].
///
/// | Method        | Default                                                 |
/// |---------------|---------------------------------------------------------|
/// | `.sampler(f)` | `config.transit_distribution` seeded from `config.seed` |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(SimConfig::default())
///     .sampler(|| Box::new(|_min: f64, _max: f64| 3.0))
///     .build()?;
/// let outcome = sim.run(&orders, &mut LogSink)?;
/// println!("{}", outcome.report);
/// ```
pub struct SimBuilder {
    config:  SimConfig,
    sampler: Option<SamplerFactory>,
}

/// Builds the transit-delay sampler for one run.
type SamplerFactory = Box<dyn Fn() -> Box<dyn DelaySampler>>;

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, sampler: None }
    }

    /// Draw courier transit delays from a sampler built by `factory` instead
    /// of the configured distribution.  The factory is called once per run.
    pub fn sampler<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn DelaySampler> + 'static,
    {
        self.sampler = Some(Box::new(factory));
        self
    }

    /// Validate the configuration and return a ready-to-run [`Simulation`].
    pub fn build(self) -> SimResult<Simulation> {
        self.config.validate()?;
        Ok(Simulation { config: self.config, sampler: self.sampler })
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Everything a finished run leaves behind.
pub struct RunOutcome {
    pub report:   RunReport,
    /// Final kitchen state: every order, with all of its timestamps.
    pub kitchen:  Kitchen,
    /// Final delivery state: every courier and completed handoff.
    pub delivery: Delivery,
    pub stats:    RunStats,
}

/// One configured kitchen, runnable against any workload.
///
/// Each [`run`][Self::run] starts from an empty kitchen at virtual time zero
/// with a fresh sampler; without a custom one it draws from an RNG seeded
/// with `config.seed`, so repeated runs are identical.
pub struct Simulation {
    config:  SimConfig,
    sampler: Option<SamplerFactory>,
}

impl Simulation {
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Feed `orders` through the kitchen and wait until every one has been
    /// picked up.
    ///
    /// Lifecycle events go to `sink`; `sink.finish()` is called once the run
    /// has drained.
    pub fn run<S: EventSink>(&self, orders: &[OrderSpec], sink: &mut S) -> SimResult<RunOutcome> {
        let (kitchen, delivery, stats) = self.drive(orders, sink)?;
        sink.finish();

        let report = RunReport::collect(
            self.config.strategy,
            self.config.seed,
            orders.len(),
            &kitchen,
            &delivery,
            stats.final_time,
        );
        log::info!("{report}");
        Ok(RunOutcome { report, kitchen, delivery, stats })
    }

    fn drive(
        &self,
        orders: &[OrderSpec],
        sink:   &mut dyn EventSink,
    ) -> SimResult<(Kitchen, Delivery, RunStats)> {
        let config = &self.config;
        config.validate()?;

        let mut scheduler: Scheduler<Floor<'_>> = Scheduler::new();
        if let Some(factor) = config.realtime_factor {
            scheduler = scheduler.with_pacing(Pacing::new(factor));
        }
        let cooks = scheduler.add_pool(config.cooks_in_kitchen as usize)?;

        let sampler = match &self.sampler {
            Some(make) => make(),
            None => config.transit_distribution.sampler(SimRng::new(config.seed)),
        };
        let mut floor = Floor {
            kitchen: Kitchen::new(config.cooks_in_kitchen as usize),
            delivery: Delivery::new(
                config.strategy,
                config.transit_delay_min,
                config.transit_delay_max,
                sampler,
            ),
            cooks,
            idle_poll_ms: config.idle_poll_ms,
            sink,
        };

        scheduler.spawn(KitchenLoop::default())?;
        scheduler.spawn(MatchingLoop)?;
        scheduler.spawn(Intake::new(orders.to_vec(), config.orders_per_second))?;

        log::debug!(
            "run start: {} orders, {} cooks, strategy {}",
            orders.len(),
            config.cooks_in_kitchen,
            config.strategy
        );
        let stats = scheduler.run_until_idle(&mut floor)?;
        Ok((floor.kitchen, floor.delivery, stats))
    }
}
