//! Flat row types written by the output backends.

use serde::Serialize;

use ks_core::{Event, SimTime};

/// One lifecycle event as a CSV row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventRow {
    /// Virtual seconds since run start, millisecond precision.
    pub time_secs: f64,
    pub event:     &'static str,
    pub subject:   String,
    /// Kitchen-assigned order number, absent for run notes.
    pub order:     Option<u32>,
    /// Courier number, absent for kitchen-only events.
    pub courier:   Option<u32>,
    pub detail:    String,
}

impl EventRow {
    /// Column names, in field order.
    pub const HEADER: [&'static str; 6] = ["time_secs", "event", "subject", "order", "courier", "detail"];

    /// A run-level row with no order or courier.
    pub fn note(at: SimTime, event: &'static str, detail: String) -> Self {
        Self {
            time_secs: at.as_secs_f64(),
            event,
            subject: "run".to_owned(),
            order: None,
            courier: None,
            detail,
        }
    }
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        Self {
            time_secs: e.at.as_secs_f64(),
            event:     e.kind.label(),
            subject:   e.kind.subject(),
            order:     Some(e.kind.order().0),
            courier:   e.kind.courier().map(|c| c.0),
            detail:    e.kind.detail(),
        }
    }
}
