//! Couriers and their lifecycle.

use ks_core::{CourierId, OrderId, SimTime};

/// `Dispatched → Arrived → Done`, each transition exactly once.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CourierState {
    Dispatched,
    Arrived,
    Done,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Courier {
    pub id:             CourierId,
    /// The order whose submission triggered this dispatch.
    pub dispatched_for: OrderId,
    /// Set only under the pre-bound strategy; immutable once dispatched.
    pub bound_order:    Option<OrderId>,
    /// Sampled transit delay in virtual milliseconds.
    pub transit_ms:     u64,
    pub dispatched_at:  SimTime,
    arrival:            Option<SimTime>,
    delivery:           Option<SimTime>,
}

impl Courier {
    pub(crate) fn new(
        id:             CourierId,
        dispatched_for: OrderId,
        bound_order:    Option<OrderId>,
        transit_ms:     u64,
        now:            SimTime,
    ) -> Self {
        Self {
            id,
            dispatched_for,
            bound_order,
            transit_ms,
            dispatched_at: now,
            arrival:       None,
            delivery:      None,
        }
    }

    pub fn state(&self) -> CourierState {
        match (self.arrival, self.delivery) {
            (None, _) => CourierState::Dispatched,
            (Some(_), None) => CourierState::Arrived,
            (Some(_), Some(_)) => CourierState::Done,
        }
    }

    pub fn arrival(&self) -> Option<SimTime> {
        self.arrival
    }

    pub fn delivery(&self) -> Option<SimTime> {
        self.delivery
    }

    /// Seconds between arrival and pickup; `None` until done.
    pub fn courier_wait(&self) -> Option<f64> {
        Some(self.delivery?.secs_since(self.arrival?))
    }

    pub(crate) fn mark_arrived(&mut self, now: SimTime) {
        debug_assert_eq!(self.state(), CourierState::Dispatched);
        self.arrival = Some(now);
    }

    pub(crate) fn mark_done(&mut self, now: SimTime) {
        debug_assert_eq!(self.state(), CourierState::Arrived);
        self.delivery = Some(now);
    }
}
