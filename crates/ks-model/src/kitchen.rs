//! The `Kitchen`: order intake, preparation bookkeeping and the ready shelf.

use std::collections::{BTreeMap, VecDeque};

use ks_core::{Event, EventKind, EventSink, OrderId, SimTime};

use crate::{ModelError, ModelResult, Order, OrderSpec};

/// Queue sizes at one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueCounts {
    pub pending:        usize,
    pub in_preparation: usize,
    pub ready:          usize,
    pub delivered:      usize,
}

impl QueueCounts {
    pub fn total(&self) -> usize {
        self.pending + self.in_preparation + self.ready + self.delivered
    }
}

/// Owns every order and its position in the pipeline:
///
/// ```text
/// submit ─▶ pending ─(cook slot)─▶ in_preparation ─(prep time)─▶ ready ─(pickup)─▶ delivered
/// ```
///
/// Cook slots are enforced by the scheduler's pool; the kitchen records the
/// resulting occupancy and checks it against `capacity` in debug builds.
pub struct Kitchen {
    capacity:            usize,
    pending:             VecDeque<Order>,
    in_preparation:      BTreeMap<OrderId, Order>,
    ready:               VecDeque<Order>,
    delivered:           Vec<Order>,
    next_id:             OrderId,
    peak_in_preparation: usize,
    stop_requested:      bool,
}

impl Kitchen {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            pending:             VecDeque::new(),
            in_preparation:      BTreeMap::new(),
            ready:               VecDeque::new(),
            delivered:           Vec::new(),
            next_id:             OrderId(0),
            peak_in_preparation: 0,
            stop_requested:      false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // ── Intake ────────────────────────────────────────────────────────────

    /// Accept an order.  Intake is unbounded.
    pub fn submit(&mut self, spec: &OrderSpec, now: SimTime, sink: &mut dyn EventSink) -> OrderId {
        let id = self.next_id;
        self.next_id = id.next();
        let order = Order::new(id, spec, now);
        sink.record(&Event {
            at:   now,
            kind: EventKind::OrderReceived {
                order:       id,
                external_id: order.external_id.clone(),
                name:        order.name.clone(),
            },
        });
        self.pending.push_back(order);
        id
    }

    pub fn has_pending_orders(&self) -> bool {
        !self.pending.is_empty()
    }

    // ── Preparation ───────────────────────────────────────────────────────

    /// Move the oldest pending order into preparation.
    ///
    /// The caller must already hold a cook slot.  Returns the order id and
    /// its preparation time in milliseconds, or `None` if nothing is pending.
    pub fn start_next(&mut self, now: SimTime, sink: &mut dyn EventSink) -> Option<(OrderId, u64)> {
        let mut order = self.pending.pop_front()?;
        order.mark_started(now);
        let started = (order.id, order.prep_ms);
        self.in_preparation.insert(order.id, order);
        debug_assert!(
            self.in_preparation.len() <= self.capacity,
            "{} orders in preparation with {} cooks",
            self.in_preparation.len(),
            self.capacity
        );
        self.peak_in_preparation = self.peak_in_preparation.max(self.in_preparation.len());
        sink.record(&Event { at: now, kind: EventKind::OrderStarted { order: started.0 } });
        Some(started)
    }

    /// Mark an order prepared and put it on the ready shelf.
    pub fn finish_preparation(
        &mut self,
        id:   OrderId,
        now:  SimTime,
        sink: &mut dyn EventSink,
    ) -> ModelResult<()> {
        let mut order = self.in_preparation.remove(&id).ok_or(ModelError::UnknownOrder(id))?;
        order.mark_finished(now);
        sink.record(&Event {
            at:   now,
            kind: EventKind::OrderPrepared { order: id, name: order.name.clone() },
        });
        self.ready.push_back(order);
        Ok(())
    }

    // ── Ready shelf hand-off ──────────────────────────────────────────────

    pub fn has_ready_orders(&self) -> bool {
        !self.ready.is_empty()
    }

    /// Ids on the ready shelf, oldest first.
    pub fn ready_order_ids(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.ready.iter().map(|o| o.id)
    }

    /// Hand the oldest ready order to a courier.
    ///
    /// # Errors
    ///
    /// `EmptyQueue` when nothing is ready; check
    /// [`has_ready_orders`][Self::has_ready_orders] first.
    pub fn take_next_ready(&mut self, now: SimTime) -> ModelResult<Order> {
        let order = self.ready.pop_front().ok_or(ModelError::EmptyQueue("ready_for_pickup"))?;
        Ok(self.deliver(order, now))
    }

    /// Hand a specific ready order to a courier, if it is on the shelf.
    pub fn take_specific_ready(&mut self, id: OrderId, now: SimTime) -> Option<Order> {
        let idx = self.ready.iter().position(|o| o.id == id)?;
        let order = self.ready.remove(idx)?;
        Some(self.deliver(order, now))
    }

    fn deliver(&mut self, mut order: Order, now: SimTime) -> Order {
        order.mark_delivered(now);
        self.delivered.push(order.clone());
        order
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn pending(&self) -> impl Iterator<Item = &Order> {
        self.pending.iter()
    }

    pub fn in_preparation(&self) -> impl Iterator<Item = &Order> {
        self.in_preparation.values()
    }

    pub fn ready(&self) -> impl Iterator<Item = &Order> {
        self.ready.iter()
    }

    /// Delivered orders in pickup order.
    pub fn delivered(&self) -> &[Order] {
        &self.delivered
    }

    pub fn counts(&self) -> QueueCounts {
        QueueCounts {
            pending:        self.pending.len(),
            in_preparation: self.in_preparation.len(),
            ready:          self.ready.len(),
            delivered:      self.delivered.len(),
        }
    }

    /// Highest number of orders prepared concurrently so far.
    pub fn peak_in_preparation(&self) -> usize {
        self.peak_in_preparation
    }

    /// `true` once no order is pending, cooking or waiting for a courier.
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.in_preparation.is_empty() && self.ready.is_empty()
    }

    /// Mean seconds delivered orders sat on the ready shelf.
    ///
    /// # Errors
    ///
    /// `NoData` when no order has been delivered.
    pub fn average_order_wait(&self) -> ModelResult<f64> {
        let waits: Vec<f64> = self.delivered.iter().filter_map(Order::order_wait).collect();
        if waits.is_empty() {
            return Err(ModelError::NoData("delivered orders"));
        }
        Ok(waits.iter().sum::<f64>() / waits.len() as f64)
    }

    // ── Termination ───────────────────────────────────────────────────────

    /// Let the kitchen loop exit once nothing is pending.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }
}
