//! Orders: the workload descriptor and the tracked order.

use serde::{Deserialize, Serialize};

use ks_core::time::secs_to_millis;
use ks_core::{OrderId, SimTime};

/// One row of the workload file.
///
/// ```json
/// { "id": "a8cfcb76-7f24-4420-a5ba-d46dd77bdffd", "name": "Banana Bread", "prepTime": 4 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub id:   String,
    pub name: String,
    /// Preparation time in seconds.
    #[serde(rename = "prepTime")]
    pub prep_time: f64,
}

impl OrderSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>, prep_time: f64) -> Self {
        Self { id: id.into(), name: name.into(), prep_time }
    }
}

/// Where an order currently sits, derived from its timestamps.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum OrderStatus {
    Pending,
    InPreparation,
    ReadyForPickup,
    Delivered,
}

/// An order tracked by the kitchen.
///
/// Timestamps are stamped by the kitchen only, each at most once and in the
/// order `added ≤ started ≤ finished ≤ delivered`.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id:          OrderId,
    /// The workload's identifier, kept for reporting.
    pub external_id: String,
    pub name:        String,
    /// Preparation time in virtual milliseconds.
    pub prep_ms:     u64,
    added:           SimTime,
    started:         Option<SimTime>,
    finished:        Option<SimTime>,
    delivered:       Option<SimTime>,
}

impl Order {
    pub(crate) fn new(id: OrderId, spec: &OrderSpec, now: SimTime) -> Self {
        Self {
            id,
            external_id: spec.id.clone(),
            name:        spec.name.clone(),
            prep_ms:     secs_to_millis(spec.prep_time),
            added:       now,
            started:     None,
            finished:    None,
            delivered:   None,
        }
    }

    pub fn added(&self) -> SimTime {
        self.added
    }

    pub fn started(&self) -> Option<SimTime> {
        self.started
    }

    pub fn finished(&self) -> Option<SimTime> {
        self.finished
    }

    pub fn delivered(&self) -> Option<SimTime> {
        self.delivered
    }

    pub fn status(&self) -> OrderStatus {
        match (self.started, self.finished, self.delivered) {
            (None, _, _) => OrderStatus::Pending,
            (Some(_), None, _) => OrderStatus::InPreparation,
            (Some(_), Some(_), None) => OrderStatus::ReadyForPickup,
            (Some(_), Some(_), Some(_)) => OrderStatus::Delivered,
        }
    }

    /// Seconds the order sat ready before pickup; `None` until delivered.
    pub fn order_wait(&self) -> Option<f64> {
        Some(self.delivered?.secs_since(self.finished?))
    }

    pub(crate) fn mark_started(&mut self, now: SimTime) {
        debug_assert!(self.started.is_none(), "{} started twice", self.id);
        debug_assert!(now >= self.added);
        self.started = Some(now);
    }

    pub(crate) fn mark_finished(&mut self, now: SimTime) {
        debug_assert!(self.finished.is_none(), "{} finished twice", self.id);
        self.finished = Some(now);
    }

    pub(crate) fn mark_delivered(&mut self, now: SimTime) {
        debug_assert!(self.delivered.is_none(), "{} delivered twice", self.id);
        self.delivered = Some(now);
    }
}
