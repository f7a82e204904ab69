//! Courier-to-order matching strategies.
//!
//! A [`MatchStrategy`] looks at the kitchen's ready shelf and the arrived
//! couriers and decides which pairs are picked up right now.  It is the only
//! part of a run that differs between the pooled and pre-bound policies.

use std::collections::{HashMap, VecDeque};

use ks_core::{CourierId, OrderId, SimTime, Strategy};

use crate::{Kitchen, ModelResult, Order};

/// Couriers waiting for a pickup, published to both views on arrival.
///
/// The pools hold ids into the delivery's courier arena, so a courier listed
/// in both is still one courier.  The active strategy consumes its own view;
/// a pickup retires the courier from the other, so both list only couriers
/// still waiting.
#[derive(Default, Debug)]
pub struct CourierPools {
    /// Arrived couriers in arrival order.
    pub arrived: VecDeque<CourierId>,
    /// Arrived couriers keyed by the order they were dispatched for.
    pub bound:   HashMap<OrderId, CourierId>,
}

impl CourierPools {
    pub(crate) fn publish(&mut self, courier: CourierId, order: OrderId) {
        self.arrived.push_back(courier);
        self.bound.insert(order, courier);
    }

    /// Drop a picked-up courier from whichever view still lists it.
    pub(crate) fn retire(&mut self, courier: CourierId, order: OrderId) {
        self.arrived.retain(|&c| c != courier);
        if self.bound.get(&order) == Some(&courier) {
            self.bound.remove(&order);
        }
    }
}

/// A courier paired with the ready order it collects.
#[derive(Debug)]
pub struct Match {
    pub courier: CourierId,
    pub order:   Order,
}

/// Decides which ready orders are collected by which arrived couriers.
///
/// Implementations take orders from the kitchen through its hand-off methods
/// and remove the chosen couriers from `pools`.  Every returned `Match` must
/// be completed by [`Delivery::pickup`][crate::Delivery::pickup].
pub trait MatchStrategy {
    fn kind(&self) -> Strategy;

    fn match_ready(
        &mut self,
        kitchen: &mut Kitchen,
        pools:   &mut CourierPools,
        now:     SimTime,
    ) -> ModelResult<Vec<Match>>;
}

/// Build the strategy object for `kind`.
pub fn for_kind(kind: Strategy) -> Box<dyn MatchStrategy> {
    match kind {
        Strategy::Pooled => Box::new(Pooled),
        Strategy::PreBound => Box::new(PreBound),
    }
}

// ── Pooled ────────────────────────────────────────────────────────────────────

/// Oldest arrived courier takes the oldest ready order, repeated greedily.
///
/// Pairing follows readiness order; any courier may serve any order.
pub struct Pooled;

impl MatchStrategy for Pooled {
    fn kind(&self) -> Strategy {
        Strategy::Pooled
    }

    fn match_ready(
        &mut self,
        kitchen: &mut Kitchen,
        pools:   &mut CourierPools,
        now:     SimTime,
    ) -> ModelResult<Vec<Match>> {
        let mut matches = Vec::new();
        while kitchen.has_ready_orders() {
            let Some(courier) = pools.arrived.pop_front() else {
                break;
            };
            let order = kitchen.take_next_ready(now)?;
            matches.push(Match { courier, order });
        }
        Ok(matches)
    }
}

// ── PreBound ──────────────────────────────────────────────────────────────────

/// Each ready order waits for the courier dispatched for it.
///
/// Orders whose courier has not arrived stay on the shelf for a later pass.
pub struct PreBound;

impl MatchStrategy for PreBound {
    fn kind(&self) -> Strategy {
        Strategy::PreBound
    }

    fn match_ready(
        &mut self,
        kitchen: &mut Kitchen,
        pools:   &mut CourierPools,
        now:     SimTime,
    ) -> ModelResult<Vec<Match>> {
        let claimable: Vec<OrderId> = kitchen
            .ready_order_ids()
            .filter(|id| pools.bound.contains_key(id))
            .collect();

        let mut matches = Vec::with_capacity(claimable.len());
        for id in claimable {
            if let (Some(order), Some(courier)) = (kitchen.take_specific_ready(id, now), pools.bound.remove(&id)) {
                matches.push(Match { courier, order });
            }
        }
        Ok(matches)
    }
}
