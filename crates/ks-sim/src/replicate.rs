//! Independent replications of one configuration.
//!
//! Each replication is a separate [`Simulation`] with its own seed and no
//! shared state, so with the `parallel` feature they run on Rayon's pool.

use ks_core::{NoopSink, SimConfig, SimRng};
use ks_model::OrderSpec;

use crate::{RunReport, SimBuilder, SimResult};

/// `count` seeds derived from `base_seed`.
pub fn replication_seeds(base_seed: u64, count: usize) -> Vec<u64> {
    (0..count as u64).map(|i| SimRng::replication_seed(base_seed, i)).collect()
}

/// Run `orders` once per seed and return the reports in seed order.
///
/// Replications never pace against the wall clock and record no events.
pub fn run_replications(
    config: &SimConfig,
    orders: &[OrderSpec],
    seeds:  &[u64],
) -> SimResult<Vec<RunReport>> {
    config.validate()?;

    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| run_one(config, orders, seed)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        seeds.par_iter().map(|&seed| run_one(config, orders, seed)).collect()
    }
}

fn run_one(config: &SimConfig, orders: &[OrderSpec], seed: u64) -> SimResult<RunReport> {
    let config = SimConfig { seed, realtime_factor: None, ..config.clone() };
    let sim = SimBuilder::new(config).build()?;
    Ok(sim.run(orders, &mut NoopSink)?.report)
}
