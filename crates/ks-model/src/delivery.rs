//! The `Delivery`: courier dispatch, arrival, matching and pickup.

use ks_core::time::{millis_to_secs, secs_to_millis};
use ks_core::{CourierId, DelaySampler, Event, EventKind, EventSink, OrderId, SimTime, Strategy};

use crate::strategy::{self, CourierPools, MatchStrategy};
use crate::{Courier, CourierState, Kitchen, ModelError, ModelResult, Order};

/// A finished handoff.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedDelivery {
    pub courier: Courier,
    pub order:   Order,
}

/// Owns every courier dispatched during a run.
pub struct Delivery {
    strategy:          Box<dyn MatchStrategy>,
    transit_delay_min: f64,
    transit_delay_max: f64,
    sampler:           Box<dyn DelaySampler>,
    /// Courier arena indexed by `CourierId`.
    couriers:          Vec<Courier>,
    pools:             CourierPools,
    completed:         Vec<CompletedDelivery>,
    stop_requested:    bool,
}

impl Delivery {
    /// Create a delivery component.
    ///
    /// Transit delays are drawn from `sampler` over
    /// `[transit_delay_min, transit_delay_max]` seconds.
    pub fn new(
        strategy:          Strategy,
        transit_delay_min: f64,
        transit_delay_max: f64,
        sampler:           Box<dyn DelaySampler>,
    ) -> Self {
        Self::with_matcher(strategy::for_kind(strategy), transit_delay_min, transit_delay_max, sampler)
    }

    /// Like [`new`][Self::new] with a caller-supplied matching strategy.
    pub fn with_matcher(
        matcher:           Box<dyn MatchStrategy>,
        transit_delay_min: f64,
        transit_delay_max: f64,
        sampler:           Box<dyn DelaySampler>,
    ) -> Self {
        Self {
            strategy: matcher,
            transit_delay_min,
            transit_delay_max,
            sampler,
            couriers: Vec::new(),
            pools: CourierPools::default(),
            completed: Vec::new(),
            stop_requested: false,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy.kind()
    }

    // ── Courier lifecycle ─────────────────────────────────────────────────

    /// Send a courier for `order`.
    ///
    /// Returns the new courier and its transit delay in milliseconds; the
    /// caller schedules the arrival.  Under the pre-bound strategy the courier
    /// is bound to `order` for its whole life.
    pub fn dispatch(
        &mut self,
        order: OrderId,
        now:   SimTime,
        sink:  &mut dyn EventSink,
    ) -> ModelResult<(CourierId, u64)> {
        let id = CourierId::try_from(self.couriers.len()).map_err(|_| ModelError::IdsExhausted("courier"))?;
        let delay_secs = self.sampler.sample(self.transit_delay_min, self.transit_delay_max);
        let transit_ms = secs_to_millis(delay_secs);
        let bound_order = (self.strategy() == Strategy::PreBound).then_some(order);

        self.couriers.push(Courier::new(id, order, bound_order, transit_ms, now));
        sink.record(&Event {
            at:   now,
            kind: EventKind::CourierDispatched {
                courier:    id,
                order,
                delay_secs: millis_to_secs(transit_ms),
                bound:      bound_order.is_some(),
            },
        });
        Ok((id, transit_ms))
    }

    /// Record the courier's arrival and make it available for matching.
    pub fn arrive(&mut self, id: CourierId, now: SimTime, sink: &mut dyn EventSink) -> ModelResult<()> {
        let courier = self.couriers.get_mut(id.index()).ok_or(ModelError::UnknownCourier(id))?;
        if courier.state() != CourierState::Dispatched {
            return Err(ModelError::CourierUnavailable { courier: id, state: courier.state() });
        }
        courier.mark_arrived(now);
        let order = courier.dispatched_for;
        let bound = courier.bound_order.is_some();

        self.pools.publish(id, order);
        sink.record(&Event { at: now, kind: EventKind::CourierArrived { courier: id, order, bound } });
        Ok(())
    }

    /// Complete a handoff: the courier collects `order`, which the kitchen has
    /// already released from its ready shelf.
    pub fn pickup(
        &mut self,
        id:    CourierId,
        order: Order,
        now:   SimTime,
        sink:  &mut dyn EventSink,
    ) -> ModelResult<()> {
        let courier = self.couriers.get_mut(id.index()).ok_or(ModelError::UnknownCourier(id))?;
        if courier.state() != CourierState::Arrived {
            return Err(ModelError::CourierUnavailable { courier: id, state: courier.state() });
        }
        courier.mark_done(now);
        self.pools.retire(id, courier.dispatched_for);

        let order_wait = order.order_wait().unwrap_or_default();
        let courier_wait = courier.courier_wait().unwrap_or_default();
        sink.record(&Event {
            at:   now,
            kind: EventKind::OrderPickedUp {
                order:             order.id,
                courier:           id,
                order_wait_secs:   order_wait,
                courier_wait_secs: courier_wait,
            },
        });
        log::info!("{} order wait {order_wait:.3}s, {id} wait {courier_wait:.3}s", order.id);

        self.completed.push(CompletedDelivery { courier: *courier, order });
        Ok(())
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// Pair ready orders with arrived couriers and pick them all up.
    ///
    /// Returns the number of pickups made.
    pub fn run_matching(
        &mut self,
        kitchen: &mut Kitchen,
        now:     SimTime,
        sink:    &mut dyn EventSink,
    ) -> ModelResult<usize> {
        let matches = self.strategy.match_ready(kitchen, &mut self.pools, now)?;
        let made = matches.len();
        for m in matches {
            self.pickup(m.courier, m.order, now, sink)?;
        }
        Ok(made)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn courier(&self, id: CourierId) -> Option<&Courier> {
        self.couriers.get(id.index())
    }

    pub fn couriers(&self) -> &[Courier] {
        &self.couriers
    }

    pub fn pools(&self) -> &CourierPools {
        &self.pools
    }

    /// Finished handoffs in pickup order.
    pub fn completed(&self) -> &[CompletedDelivery] {
        &self.completed
    }

    /// Mean seconds couriers waited between arrival and pickup.
    ///
    /// # Errors
    ///
    /// `NoData` when no handoff has completed.
    pub fn average_courier_wait(&self) -> ModelResult<f64> {
        let waits: Vec<f64> = self.completed.iter().filter_map(|c| c.courier.courier_wait()).collect();
        if waits.is_empty() {
            return Err(ModelError::NoData("completed deliveries"));
        }
        Ok(waits.iter().sum::<f64>() / waits.len() as f64)
    }

    // ── Termination ───────────────────────────────────────────────────────

    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }
}
