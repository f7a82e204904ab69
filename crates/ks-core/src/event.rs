//! Lifecycle events and the sinks that consume them.
//!
//! Every state transition the kitchen and the delivery component perform is
//! reported as an [`Event`] to the [`EventSink`] handed to the run.  The sink
//! is owned by the caller and lives for exactly one run; there is no global
//! logger state.

use std::fmt;

use crate::{CourierId, OrderId, SimTime};

/// A timestamped lifecycle transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub at:   SimTime,
    pub kind: EventKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    OrderReceived {
        order:       OrderId,
        external_id: String,
        name:        String,
    },
    OrderStarted {
        order: OrderId,
    },
    OrderPrepared {
        order: OrderId,
        name:  String,
    },
    OrderPickedUp {
        order:             OrderId,
        courier:           CourierId,
        order_wait_secs:   f64,
        courier_wait_secs: f64,
    },
    CourierDispatched {
        courier:    CourierId,
        order:      OrderId,
        delay_secs: f64,
        bound:      bool,
    },
    CourierArrived {
        courier: CourierId,
        order:   OrderId,
        bound:   bool,
    },
}

impl EventKind {
    /// Upper-case label used in log lines and the event file.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::OrderReceived { .. } => "ORDER RECEIVED",
            EventKind::OrderStarted { .. } => "ORDER STARTED",
            EventKind::OrderPrepared { .. } => "ORDER PREPARED",
            EventKind::OrderPickedUp { .. } => "ORDER PICKED UP",
            EventKind::CourierDispatched { .. } => "COURIER DISPATCHED",
            EventKind::CourierArrived { .. } => "COURIER ARRIVED",
        }
    }

    /// The order this event concerns.
    pub fn order(&self) -> OrderId {
        match self {
            EventKind::OrderReceived { order, .. }
            | EventKind::OrderStarted { order }
            | EventKind::OrderPrepared { order, .. }
            | EventKind::OrderPickedUp { order, .. }
            | EventKind::CourierDispatched { order, .. }
            | EventKind::CourierArrived { order, .. } => *order,
        }
    }

    /// The courier this event concerns, if any.
    pub fn courier(&self) -> Option<CourierId> {
        match self {
            EventKind::OrderPickedUp { courier, .. }
            | EventKind::CourierDispatched { courier, .. }
            | EventKind::CourierArrived { courier, .. } => Some(*courier),
            _ => None,
        }
    }

    /// Free-form trailing detail for line-oriented output.
    pub fn detail(&self) -> String {
        match self {
            EventKind::OrderReceived { external_id, name, .. } => format!("{external_id} {name}"),
            EventKind::OrderStarted { .. } => String::new(),
            EventKind::OrderPrepared { name, .. } => name.clone(),
            EventKind::OrderPickedUp { order_wait_secs, courier_wait_secs, .. } => format!(
                "order_wait={order_wait_secs:.3}s courier_wait={courier_wait_secs:.3}s"
            ),
            EventKind::CourierDispatched { delay_secs, bound, .. } => {
                if *bound {
                    format!("delay={delay_secs:.3}s bound")
                } else {
                    format!("delay={delay_secs:.3}s")
                }
            }
            EventKind::CourierArrived { bound, .. } => {
                if *bound { "bound".to_owned() } else { String::new() }
            }
        }
    }

    /// The entity the event is about: the courier for courier movements,
    /// otherwise the order.
    pub fn subject(&self) -> String {
        match self {
            EventKind::CourierDispatched { courier, .. } | EventKind::CourierArrived { courier, .. } => {
                courier.to_string()
            }
            other => other.order().to_string(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<13} {:<20} {:<14} {}",
            self.at.to_string(),
            self.kind.label(),
            self.kind.subject(),
            self.kind.detail()
        )
    }
}

// ── Sinks ─────────────────────────────────────────────────────────────────────

/// Consumer of lifecycle events.
///
/// `record` is infallible from the simulation's point of view; sinks that do
/// I/O keep their first error and expose it after the run (see
/// `ks_output::CsvEventWriter::take_error`).
pub trait EventSink {
    fn record(&mut self, event: &Event);

    /// Called once when the run has drained.  Default: nothing.
    fn finish(&mut self) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: &Event) {
        (**self).record(event);
    }

    fn finish(&mut self) {
        (**self).finish();
    }
}

/// Fan out to two sinks, e.g. the console and an event file.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn record(&mut self, event: &Event) {
        self.0.record(event);
        self.1.record(event);
    }

    fn finish(&mut self) {
        self.0.finish();
        self.1.finish();
    }
}

/// A sink that discards everything.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&mut self, _event: &Event) {}
}

/// In-memory event record, mostly for tests and post-run inspection.
#[derive(Default, Debug)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events with the given label, in record order.
    pub fn with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.kind.label() == label)
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}

/// Writes each event as one `info!` line through the `log` facade.
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: &Event) {
        log::info!(target: "kitchen_sim::events", "{event}");
    }
}
