//! `ks-engine`: cooperative virtual-time process scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`process`]   | `Process<W>` trait, `Yield`, `Context<W>`                   |
//! | [`calendar`]  | `Calendar` (`BTreeMap<SimTime, VecDeque<ProcessId>>`)       |
//! | [`pool`]      | `ResourcePool`, `ResourceToken`: FIFO, capacity-bounded     |
//! | [`pacing`]    | `Pacing`: optional wall-clock pacing of virtual time        |
//! | [`scheduler`] | `Scheduler<W>`, `RunStats`                                  |
//! | [`error`]     | `EngineError`, `EngineResult<T>`                            |
//!
//! # Execution model
//!
//! ```text
//! while let Some((t, pid)) = calendar.pop_next():
//!   ① Advance  : now = t (sleeping first when paced)
//!   ② Resume   : process.resume(world, cx) until it suspends:
//!                   Delay(ms)     → calendar.push(now + ms, pid)
//!                   Acquire(pool) → grant now and resume again, or queue
//!                                   behind the pool's FIFO waiters
//!                   Done          → drop the process
//!   ③ Apply    : spawns and releases the process asked for through `cx`:
//!                   spawn         → calendar.push(now, child)
//!                   release       → slot goes to the oldest waiter, which is
//!                                   pushed at `now`
//! ```
//!
//! Exactly one process runs at a time and holds `&mut W` for the duration of
//! its step, so every step is atomic with respect to every other process.

pub mod calendar;
pub mod error;
pub mod pacing;
pub mod pool;
pub mod process;
pub mod scheduler;


pub use calendar::Calendar;
pub use error::{EngineError, EngineResult};
pub use pacing::Pacing;
pub use pool::{ResourcePool, ResourceToken};
pub use process::{Context, Process, Yield};
pub use scheduler::{RunStats, Scheduler};
