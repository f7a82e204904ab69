//! `ks-core`: foundational types for the `kitchen_sim` workspace.
//!
//! This crate is a dependency of every other `ks-*` crate.  It has no `ks-*`
//! dependencies and a small external footprint (`rand`, `rand_distr`,
//! `thiserror`, `log`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `OrderId`, `CourierId`, `ProcessId`, `PoolId`              |
//! | [`time`]        | `SimTime` (virtual milliseconds), second/ms conversions    |
//! | [`rng`]         | `SimRng` (seeded, per run)                                 |
//! | [`sampler`]     | `DelaySampler` trait, `UniformDelay`, `TriangularDelay`    |
//! | [`config`]      | `SimConfig`, `Strategy`, `DelayDistribution`               |
//! | [`event`]       | `Event`, `EventKind`, `EventSink` and the stock sinks      |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, time and config.    |

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod rng;
pub mod sampler;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DelayDistribution, SimConfig, Strategy};
pub use error::{CoreError, CoreResult};
pub use event::{Event, EventKind, EventLog, EventSink, LogSink, NoopSink};
pub use ids::{CourierId, OrderId, PoolId, ProcessId};
pub use rng::SimRng;
pub use sampler::{DelaySampler, TriangularDelay, UniformDelay};
pub use time::SimTime;
