//! The shared world every process of a run operates on, and the processes.
//!
//! ```text
//! Intake ──submit──▶ Kitchen.pending ◀──poll── KitchenLoop ──acquire cook──▶ PrepareOrder
//!    │                                                                          │
//!    └──dispatch──▶ CourierTrip ──arrive──▶ pools       Kitchen.ready ◀─────────┘
//!                                            │               │
//!                                            └─MatchingLoop──┘──pickup──▶ delivered
//! Intake (after last order) ──▶ DrainWatcher ──drained──▶ stop flags
//! ```

use ks_core::{CourierId, EventSink, OrderId, PoolId};
use ks_engine::{Context, EngineError, EngineResult, Process, ResourceToken, Yield};
use ks_model::{Delivery, Kitchen, OrderSpec};

/// Everything a process may touch during its step.
pub struct Floor<'a> {
    pub kitchen:      Kitchen,
    pub delivery:     Delivery,
    /// The cook pool; one unit per order in preparation.
    pub cooks:        PoolId,
    /// Re-poll interval for loops with nothing to do, virtual milliseconds.
    pub idle_poll_ms: u64,
    pub sink:         &'a mut dyn EventSink,
}

// ── KitchenLoop ───────────────────────────────────────────────────────────────

/// Starts pending orders in submission order, one cook slot each.
#[derive(Default)]
pub struct KitchenLoop {
    awaiting_cook: bool,
}

impl<'a> Process<Floor<'a>> for KitchenLoop {
    fn name(&self) -> &'static str {
        "kitchen-loop"
    }

    fn resume(&mut self, floor: &mut Floor<'a>, cx: &mut Context<Floor<'a>>) -> EngineResult<Yield> {
        if std::mem::take(&mut self.awaiting_cook) {
            let token = cx.take_grant().ok_or(EngineError::MissingGrant(cx.pid()))?;
            match floor.kitchen.start_next(cx.now(), &mut *floor.sink) {
                Some((order, prep_ms)) => cx.spawn(PrepareOrder::new(order, prep_ms, token)),
                None => cx.release(token),
            }
        }

        if floor.kitchen.has_pending_orders() {
            self.awaiting_cook = true;
            return Ok(Yield::Acquire(floor.cooks));
        }
        if floor.kitchen.stop_requested() {
            return Ok(Yield::Done);
        }
        Ok(Yield::Delay(floor.idle_poll_ms))
    }
}

// ── PrepareOrder ──────────────────────────────────────────────────────────────

/// Holds one cook slot for exactly the order's preparation time.
pub struct PrepareOrder {
    order:   OrderId,
    prep_ms: u64,
    token:   Option<ResourceToken>,
    cooking: bool,
}

impl PrepareOrder {
    pub fn new(order: OrderId, prep_ms: u64, token: ResourceToken) -> Self {
        Self { order, prep_ms, token: Some(token), cooking: false }
    }
}

impl<'a> Process<Floor<'a>> for PrepareOrder {
    fn name(&self) -> &'static str {
        "prepare-order"
    }

    fn resume(&mut self, floor: &mut Floor<'a>, cx: &mut Context<Floor<'a>>) -> EngineResult<Yield> {
        if !self.cooking {
            self.cooking = true;
            return Ok(Yield::Delay(self.prep_ms));
        }
        floor
            .kitchen
            .finish_preparation(self.order, cx.now(), &mut *floor.sink)
            .map_err(|e| EngineError::process(self.name(), e))?;
        if let Some(token) = self.token.take() {
            cx.release(token);
        }
        Ok(Yield::Done)
    }
}

// ── CourierTrip ───────────────────────────────────────────────────────────────

/// One courier's journey to the kitchen.
pub struct CourierTrip {
    courier:    CourierId,
    transit_ms: u64,
    en_route:   bool,
}

impl CourierTrip {
    pub fn new(courier: CourierId, transit_ms: u64) -> Self {
        Self { courier, transit_ms, en_route: false }
    }
}

impl<'a> Process<Floor<'a>> for CourierTrip {
    fn name(&self) -> &'static str {
        "courier-trip"
    }

    fn resume(&mut self, floor: &mut Floor<'a>, cx: &mut Context<Floor<'a>>) -> EngineResult<Yield> {
        if !self.en_route {
            self.en_route = true;
            return Ok(Yield::Delay(self.transit_ms));
        }
        floor
            .delivery
            .arrive(self.courier, cx.now(), &mut *floor.sink)
            .map_err(|e| EngineError::process(self.name(), e))?;
        Ok(Yield::Done)
    }
}

// ── MatchingLoop ──────────────────────────────────────────────────────────────

/// Hands ready orders to arrived couriers under the delivery's strategy.
pub struct MatchingLoop;

impl<'a> Process<Floor<'a>> for MatchingLoop {
    fn name(&self) -> &'static str {
        "matching-loop"
    }

    fn resume(&mut self, floor: &mut Floor<'a>, cx: &mut Context<Floor<'a>>) -> EngineResult<Yield> {
        loop {
            let made = floor
                .delivery
                .run_matching(&mut floor.kitchen, cx.now(), &mut *floor.sink)
                .map_err(|e| EngineError::process(self.name(), e))?;
            if made == 0 {
                break;
            }
        }
        if floor.delivery.stop_requested() {
            return Ok(Yield::Done);
        }
        Ok(Yield::Delay(floor.idle_poll_ms))
    }
}

// ── Intake ────────────────────────────────────────────────────────────────────

/// Feeds the workload in at `rate` orders per virtual second.
///
/// Every submission is paired with a courier dispatch.  Once the last order
/// is in, the intake hands over to a [`DrainWatcher`].
pub struct Intake {
    orders: Vec<OrderSpec>,
    next:   usize,
    rate:   usize,
}

impl Intake {
    pub fn new(orders: Vec<OrderSpec>, rate: u32) -> Self {
        Self { orders, next: 0, rate: rate.max(1) as usize }
    }
}

impl<'a> Process<Floor<'a>> for Intake {
    fn name(&self) -> &'static str {
        "intake"
    }

    fn resume(&mut self, floor: &mut Floor<'a>, cx: &mut Context<Floor<'a>>) -> EngineResult<Yield> {
        while let Some(spec) = self.orders.get(self.next) {
            self.next += 1;
            let now = cx.now();
            let order = floor.kitchen.submit(spec, now, &mut *floor.sink);
            let (courier, transit_ms) = floor
                .delivery
                .dispatch(order, now, &mut *floor.sink)
                .map_err(|e| EngineError::process(self.name(), e))?;
            cx.spawn(CourierTrip::new(courier, transit_ms));

            if self.next % self.rate == 0 {
                return Ok(Yield::Delay(1_000));
            }
        }
        log::debug!("{} intake done after {} orders", cx.now(), self.next);
        cx.spawn(DrainWatcher);
        Ok(Yield::Done)
    }
}

// ── DrainWatcher ──────────────────────────────────────────────────────────────

/// Stops both loops once no order is pending, cooking or waiting.
pub struct DrainWatcher;

impl<'a> Process<Floor<'a>> for DrainWatcher {
    fn name(&self) -> &'static str {
        "drain-watcher"
    }

    fn resume(&mut self, floor: &mut Floor<'a>, cx: &mut Context<Floor<'a>>) -> EngineResult<Yield> {
        if !floor.kitchen.is_drained() {
            return Ok(Yield::Delay(floor.idle_poll_ms));
        }
        log::debug!("{} floor drained, stopping loops", cx.now());
        floor.kitchen.request_stop();
        floor.delivery.request_stop();
        Ok(Yield::Done)
    }
}
