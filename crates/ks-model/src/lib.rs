//! `ks-model`: kitchen and delivery state for the kitchen_sim workspace.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`order`]    | `OrderSpec` (workload row), `Order`, `OrderStatus`               |
//! | [`courier`]  | `Courier`, `CourierState`                                        |
//! | [`kitchen`]  | `Kitchen`: pending / in-preparation / ready / delivered queues   |
//! | [`strategy`] | `MatchStrategy` trait, `Pooled`, `PreBound`, `CourierPools`      |
//! | [`delivery`] | `Delivery`: dispatch, arrival, pickup, matching                  |
//! | [`error`]    | `ModelError`, `ModelResult<T>`                                   |
//!
//! # Ownership
//!
//! The `Kitchen` is the only code that moves orders between its queues.  The
//! `Delivery` owns every courier and performs the pickup, taking ready orders
//! through the kitchen's hand-off methods ([`Kitchen::take_next_ready`],
//! [`Kitchen::take_specific_ready`]).  [`Delivery::run_matching`] holds
//! `&mut Kitchen` for the whole match-and-pickup pass, so an order can never be
//! handed to two couriers nor a courier to two orders.
//!
//! Nothing here knows about the scheduler: every operation takes the current
//! virtual time and the run's event sink as arguments.

pub mod courier;
pub mod delivery;
pub mod error;
pub mod kitchen;
pub mod order;
pub mod strategy;


pub use courier::{Courier, CourierState};
pub use delivery::{CompletedDelivery, Delivery};
pub use error::{ModelError, ModelResult};
pub use kitchen::{Kitchen, QueueCounts};
pub use order::{Order, OrderSpec, OrderStatus};
pub use strategy::{CourierPools, Match, MatchStrategy, Pooled, PreBound};
