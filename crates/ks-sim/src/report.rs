//! Run summaries.

use std::fmt;

use serde::Serialize;

use ks_core::{SimTime, Strategy};
use ks_model::{Delivery, Kitchen};

/// Outcome of one simulation run.
///
/// An average is `None` when there was nothing to average (no order was
/// delivered), which is different from an average of zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub strategy:             Strategy,
    pub seed:                 u64,
    /// Orders submitted.
    pub orders:               usize,
    pub delivered:            usize,
    pub cooks:                usize,
    pub peak_in_preparation:  usize,
    /// Mean seconds an order sat ready before pickup.
    pub average_order_wait:   Option<f64>,
    /// Mean seconds a courier waited between arrival and pickup.
    pub average_courier_wait: Option<f64>,
    /// Virtual time at which the last process finished.
    pub finished_at:          SimTime,
}

impl RunReport {
    pub(crate) fn collect(
        strategy:    Strategy,
        seed:        u64,
        orders:      usize,
        kitchen:     &Kitchen,
        delivery:    &Delivery,
        finished_at: SimTime,
    ) -> Self {
        Self {
            strategy,
            seed,
            orders,
            delivered: kitchen.delivered().len(),
            cooks: kitchen.capacity(),
            peak_in_preparation: kitchen.peak_in_preparation(),
            average_order_wait: kitchen.average_order_wait().ok(),
            average_courier_wait: delivery.average_courier_wait().ok(),
            finished_at,
        }
    }
}

/// `1.2345s`, or `n/a` when absent.
pub fn fmt_wait(wait: Option<f64>) -> String {
    match wait {
        Some(secs) => format!("{secs:.4}s"),
        None => "n/a".to_owned(),
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} delivered by {} | avg order wait {} | avg courier wait {}",
            self.strategy,
            self.delivered,
            self.orders,
            self.finished_at,
            fmt_wait(self.average_order_wait),
            fmt_wait(self.average_courier_wait),
        )
    }
}

// ── Replications ──────────────────────────────────────────────────────────────

/// Mean of per-run averages over several replications of one strategy.
///
/// Runs whose average is `None` are left out of that mean.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplicationSummary {
    pub strategy:          Strategy,
    pub runs:              usize,
    pub mean_order_wait:   Option<f64>,
    pub mean_courier_wait: Option<f64>,
    /// Latest finishing time across the runs.
    pub max_finished_at:   SimTime,
}

impl ReplicationSummary {
    /// Summarise `reports`, which must all share one strategy.  Returns
    /// `None` for an empty slice.
    pub fn from_reports(reports: &[RunReport]) -> Option<Self> {
        let first = reports.first()?;
        debug_assert!(reports.iter().all(|r| r.strategy == first.strategy));
        Some(Self {
            strategy:          first.strategy,
            runs:              reports.len(),
            mean_order_wait:   mean(reports.iter().filter_map(|r| r.average_order_wait)),
            mean_courier_wait: mean(reports.iter().filter_map(|r| r.average_courier_wait)),
            max_finished_at:   reports.iter().map(|r| r.finished_at).max().unwrap_or_default(),
        })
    }
}

impl fmt::Display for ReplicationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} over {} runs | mean order wait {} | mean courier wait {}",
            self.strategy,
            self.runs,
            fmt_wait(self.mean_order_wait),
            fmt_wait(self.mean_courier_wait),
        )
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
