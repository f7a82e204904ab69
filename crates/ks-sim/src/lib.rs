//! `ks-sim`: orchestrator for the kitchen_sim workspace.
//!
//! # One run
//!
//! ```text
//! Simulation::run(orders, sink):
//!   ① Build    : Kitchen, Delivery (strategy + sampler), cook pool of
//!                 `cooks_in_kitchen` units, Scheduler (paced if configured)
//!   ② Spawn    : KitchenLoop, MatchingLoop, Intake
//!   ③ Run      : scheduler.run_until_idle(&mut floor):
//!                   Intake        submit + dispatch, `orders_per_second` per
//!                                 virtual second, then spawns DrainWatcher
//!                   KitchenLoop   acquire a cook → start_next → PrepareOrder
//!                   PrepareOrder  hold the cook for prep time → ready shelf
//!                   CourierTrip   transit delay → arrive
//!                   MatchingLoop  run_matching until no progress, then poll
//!                   DrainWatcher  drained → stop both loops
//!   ④ Report   : RunReport from the final Kitchen and Delivery
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                            |
//! |------------|---------------------------------------------------|
//! | `parallel` | [`run_replications`] runs on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ks_core::{LogSink, SimConfig};
//! use ks_sim::{SimBuilder, load_workload_json};
//!
//! let orders = load_workload_json("orders.json")?;
//! let sim = SimBuilder::new(SimConfig::default()).build()?;
//! let outcome = sim.run(&orders, &mut LogSink)?;
//! println!("{}", outcome.report);
//! ```

pub mod error;
pub mod floor;
pub mod replicate;
pub mod report;
pub mod sim;
pub mod workload;

#[cfg(test)]
mod tests;

pub use error::{SimError, SimResult};
pub use floor::Floor;
pub use replicate::{replication_seeds, run_replications};
pub use report::{ReplicationSummary, RunReport, fmt_wait};
pub use sim::{RunOutcome, SimBuilder, Simulation};
pub use workload::{load_workload_json, load_workload_reader};
