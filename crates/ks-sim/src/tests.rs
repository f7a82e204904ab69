//! Integration tests for ks-sim.

use ks_core::{CourierId, DelaySampler, EventLog, NoopSink, OrderId, SimConfig, SimTime, Strategy};
use ks_model::{CourierState, OrderSpec, OrderStatus};

use crate::{RunOutcome, SimBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(strategy: Strategy, cooks: u32, rate: u32) -> SimConfig {
    SimConfig {
        orders_per_second: rate,
        cooks_in_kitchen: cooks,
        strategy,
        transit_delay_min: 3.0,
        transit_delay_max: 15.0,
        seed: 42,
        ..SimConfig::default()
    }
}

fn order(id: &str, prep: f64) -> OrderSpec {
    OrderSpec::new(id, format!("dish {id}"), prep)
}

/// Couriers take `delays[i]` seconds, in dispatch order; `0.0` once exhausted.
fn scripted(delays: &'static [f64]) -> impl Fn() -> Box<dyn DelaySampler> {
    move || {
        let mut next = 0;
        let sampler: Box<dyn DelaySampler> = Box::new(move |_min: f64, _max: f64| {
            let d = delays.get(next).copied().unwrap_or(0.0);
            next += 1;
            d
        });
        sampler
    }
}

fn run_scripted(config: SimConfig, orders: &[OrderSpec], delays: &'static [f64]) -> RunOutcome {
    SimBuilder::new(config)
        .sampler(scripted(delays))
        .build()
        .unwrap()
        .run(orders, &mut NoopSink)
        .unwrap()
}

fn workload(n: usize) -> Vec<OrderSpec> {
    (0..n).map(|i| order(&format!("o{i}"), (i % 7) as f64 + 0.5)).collect()
}

/// Invariants every drained run must satisfy.
fn assert_drained(out: &RunOutcome, orders: usize) {
    let counts = out.kitchen.counts();
    assert_eq!(counts.delivered, orders, "conservation");
    assert_eq!(counts.total(), orders);
    assert!(out.kitchen.is_drained());
    assert_eq!(out.kitchen.pending().count(), 0);
    assert_eq!(out.kitchen.in_preparation().count(), 0);
    assert_eq!(out.kitchen.ready().count(), 0);
    assert!(out.kitchen.peak_in_preparation() <= out.kitchen.capacity(), "capacity");
    assert_eq!(out.stats.blocked, 0);
    assert_eq!(out.delivery.completed().len(), orders);
    assert!(out.delivery.couriers().iter().all(|c| c.state() == CourierState::Done));
    assert!(out.delivery.pools().arrived.is_empty() && out.delivery.pools().bound.is_empty());

    for o in out.kitchen.delivered() {
        assert_eq!(o.status(), OrderStatus::Delivered);
        let started = o.started().unwrap();
        let finished = o.finished().unwrap();
        let delivered = o.delivered().unwrap();
        assert!(o.added() <= started && started <= finished && finished <= delivered, "{o:?}");
        assert!(o.order_wait().unwrap() >= 0.0);
    }
    for done in out.delivery.completed() {
        assert!(done.courier.courier_wait().unwrap() >= 0.0);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn zero_cooks_rejected() {
        let result = SimBuilder::new(test_config(Strategy::Pooled, 0, 2)).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn inverted_transit_range_rejected() {
        let config = SimConfig { transit_delay_min: 5.0, transit_delay_max: 1.0, ..SimConfig::default() };
        assert!(SimBuilder::new(config).build().is_err());
    }

    #[test]
    fn defaults_build() {
        let sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        assert_eq!(sim.config().cooks_in_kitchen, 5);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn single_cook_prepares_one_order_at_a_time() {
        let orders = [order("first", 1.0), order("second", 2.0)];
        let out = run_scripted(test_config(Strategy::Pooled, 1, 2), &orders, &[3.0, 3.0]);
        assert_drained(&out, 2);

        let by_ext = |ext: &str| out.kitchen.delivered().iter().find(|o| o.external_id == ext).unwrap().clone();
        let first = by_ext("first");
        let second = by_ext("second");
        assert!(second.started().unwrap() >= first.finished().unwrap());
        assert_eq!(out.kitchen.peak_in_preparation(), 1);
    }

    #[test]
    fn pooled_courier_waits_for_first_ready_order() {
        let orders = [order("slow", 2.0)];
        let out = run_scripted(test_config(Strategy::Pooled, 1, 1), &orders, &[0.0]);
        assert_drained(&out, 1);

        let courier = out.delivery.courier(CourierId(0)).unwrap();
        assert_eq!(courier.arrival(), Some(SimTime::ZERO));
        let done = &out.delivery.completed()[0];
        assert!(done.courier.delivery() >= done.order.finished());
        assert!(done.courier.courier_wait().unwrap() >= 2.0);
    }

    #[test]
    fn pre_bound_courier_delivers_its_own_order() {
        // Order 0's courier is slow; order 1's courier arrives at once.
        let orders = [order("a", 1.0), order("b", 10.0)];
        let out = run_scripted(test_config(Strategy::PreBound, 2, 2), &orders, &[5.0, 0.0]);
        assert_drained(&out, 2);

        for done in out.delivery.completed() {
            assert_eq!(done.courier.bound_order, Some(done.order.id));
        }
        let a = out.delivery.completed().iter().find(|d| d.order.id == OrderId(0)).unwrap();
        assert_eq!(a.courier.id, CourierId(0));
        assert!(a.order.order_wait().unwrap() >= 3.9);
    }

    #[test]
    fn pooled_hands_first_ready_order_to_first_arrival() {
        let orders = [order("a", 1.0), order("b", 10.0)];
        let out = run_scripted(test_config(Strategy::Pooled, 2, 2), &orders, &[5.0, 0.0]);
        assert_drained(&out, 2);

        let first = &out.delivery.completed()[0];
        assert_eq!((first.courier.id, first.order.id), (CourierId(1), OrderId(0)));
        assert_eq!(first.courier.bound_order, None);
    }

    #[test]
    fn empty_workload_reports_no_data() {
        let out = run_scripted(test_config(Strategy::Pooled, 2, 2), &[], &[]);
        assert_eq!(out.report.orders, 0);
        assert_eq!(out.report.delivered, 0);
        assert_eq!(out.report.average_order_wait, None);
        assert_eq!(out.report.average_courier_wait, None);
        assert_eq!(out.report.finished_at, SimTime(100));
        assert!(out.report.to_string().contains("n/a"));
    }

    #[test]
    fn zero_prep_time_orders_drain() {
        let orders = [order("x", 0.0), order("y", 0.0), order("z", 0.0)];
        for strategy in Strategy::ALL {
            let out = run_scripted(test_config(strategy, 1, 3), &orders, &[0.0, 0.0, 0.0]);
            assert_drained(&out, 3);
        }
    }
}

// ── Properties over larger runs ───────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use ks_core::EventSink;

    #[test]
    fn both_strategies_conserve_orders() {
        let orders = workload(40);
        for strategy in Strategy::ALL {
            let sim = SimBuilder::new(test_config(strategy, 3, 4)).build().unwrap();
            let out = sim.run(&orders, &mut NoopSink).unwrap();
            assert_drained(&out, 40);
            assert_eq!(out.report.strategy, strategy);
            assert_eq!(out.report.peak_in_preparation, 3);
        }
    }

    #[test]
    fn averages_are_idempotent() {
        let orders = workload(10);
        for strategy in Strategy::ALL {
            let out = SimBuilder::new(test_config(strategy, 2, 2)).build().unwrap().run(&orders, &mut NoopSink).unwrap();

            let order_wait = out.kitchen.average_order_wait().unwrap();
            let again = out.kitchen.average_order_wait().unwrap();
            assert_eq!(order_wait.to_bits(), again.to_bits(), "{strategy}");

            let courier_wait = out.delivery.average_courier_wait().unwrap();
            let again = out.delivery.average_courier_wait().unwrap();
            assert_eq!(courier_wait.to_bits(), again.to_bits(), "{strategy}");

            assert_eq!(out.report.average_order_wait.map(f64::to_bits), Some(order_wait.to_bits()));
            assert_eq!(out.report.average_courier_wait.map(f64::to_bits), Some(courier_wait.to_bits()));
        }
    }

    #[test]
    fn pre_bound_never_crosses_couriers() {
        let orders = workload(30);
        let sim = SimBuilder::new(test_config(Strategy::PreBound, 4, 5)).build().unwrap();
        let out = sim.run(&orders, &mut NoopSink).unwrap();
        for done in out.delivery.completed() {
            assert_eq!(done.courier.bound_order, Some(done.order.id));
            assert_eq!(done.courier.dispatched_for, done.order.id);
        }
    }

    #[test]
    fn same_seed_same_report() {
        let orders = workload(25);
        let sim = SimBuilder::new(test_config(Strategy::Pooled, 2, 3)).build().unwrap();
        let a = sim.run(&orders, &mut NoopSink).unwrap().report;
        let b = sim.run(&orders, &mut NoopSink).unwrap().report;
        assert_eq!(a, b);
    }

    #[test]
    fn intake_paces_submissions_per_second() {
        let orders = workload(5);
        let mut log = EventLog::new();
        let sim = SimBuilder::new(test_config(Strategy::Pooled, 5, 2)).build().unwrap();
        sim.run(&orders, &mut log).unwrap();

        let received: Vec<u64> = log.with_label("ORDER RECEIVED").map(|e| e.at.0).collect();
        assert_eq!(received, vec![0, 0, 1_000, 1_000, 2_000]);
        assert_eq!(log.len(), 6 * 5);
    }

    #[test]
    fn event_times_never_go_backwards() {
        let mut log = EventLog::new();
        let sim = SimBuilder::new(test_config(Strategy::PreBound, 2, 2)).build().unwrap();
        sim.run(&workload(12), &mut log).unwrap();
        assert!(log.events().windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn sink_finished_once() {
        #[derive(Default)]
        struct Counting {
            events:   usize,
            finished: usize,
        }
        impl EventSink for Counting {
            fn record(&mut self, _e: &ks_core::Event) {
                self.events += 1;
            }
            fn finish(&mut self) {
                self.finished += 1;
            }
        }

        let mut sink = Counting::default();
        let sim = SimBuilder::new(test_config(Strategy::Pooled, 2, 2)).build().unwrap();
        sim.run(&workload(3), &mut sink).unwrap();
        assert_eq!(sink.events, 18);
        assert_eq!(sink.finished, 1);
    }

    #[test]
    fn paced_run_matches_unpaced_run() {
        let orders = [order("a", 1.0), order("b", 0.5)];
        let fast = run_scripted(test_config(Strategy::Pooled, 1, 2), &orders, &[1.0, 1.0]);
        let paced_config = SimConfig {
            realtime_factor: Some(0.000_1),
            ..test_config(Strategy::Pooled, 1, 2)
        };
        let paced = run_scripted(paced_config, &orders, &[1.0, 1.0]);
        assert_eq!(fast.report, paced.report);
    }
}

// ── Workload loading ──────────────────────────────────────────────────────────

#[cfg(test)]
mod workload_tests {
    use std::io::Write;

    use crate::{SimError, load_workload_json, load_workload_reader};

    #[test]
    fn parses_order_descriptors() {
        let json = r#"[
            {"id": "a8cfcb76", "name": "Banana Bread", "prepTime": 4},
            {"id": "58e9b5fe", "name": "McFlury", "prepTime": 14.5}
        ]"#;
        let orders = load_workload_reader(json.as_bytes()).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].name, "Banana Bread");
        assert_eq!(orders[1].prep_time, 14.5);
    }

    #[test]
    fn negative_prep_time_rejected() {
        let json = r#"[{"id": "x", "name": "Bad", "prepTime": -1}]"#;
        assert!(matches!(load_workload_reader(json.as_bytes()), Err(SimError::Workload(_))));
    }

    #[test]
    fn malformed_json_rejected() {
        let json = r#"[{"id": "x", "name": "Missing prep"}]"#;
        assert!(matches!(load_workload_reader(json.as_bytes()), Err(SimError::Json(_))));
        assert!(matches!(load_workload_reader(&b"not json"[..]), Err(SimError::Json(_))));
    }

    #[test]
    fn duplicate_ids_accepted() {
        let json = r#"[
            {"id": "same", "name": "One", "prepTime": 1},
            {"id": "same", "name": "Two", "prepTime": 2}
        ]"#;
        assert_eq!(load_workload_reader(json.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "f", "name": "File", "prepTime": 2}}]"#).unwrap();
        let orders = load_workload_json(file.path()).unwrap();
        assert_eq!(orders[0].id, "f");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_workload_json(dir.path().join("absent.json"));
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}

// ── Replications ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod replication_tests {
    use super::*;
    use crate::{ReplicationSummary, replication_seeds, run_replications};

    #[test]
    fn reports_follow_seed_order() {
        let seeds = replication_seeds(7, 4);
        let config = test_config(Strategy::Pooled, 3, 2);
        let reports = run_replications(&config, &workload(10), &seeds).unwrap();
        assert_eq!(reports.len(), 4);
        for (report, seed) in reports.iter().zip(&seeds) {
            assert_eq!(report.seed, *seed);
            assert_eq!(report.delivered, 10);
        }
    }

    #[test]
    fn seeds_are_distinct() {
        let seeds = replication_seeds(1, 16);
        let mut unique = seeds.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn summary_averages_present_means() {
        let config = test_config(Strategy::PreBound, 2, 2);
        let reports = run_replications(&config, &workload(6), &[1, 2]).unwrap();
        let summary = ReplicationSummary::from_reports(&reports).unwrap();
        let expected = (reports[0].average_courier_wait.unwrap() + reports[1].average_courier_wait.unwrap()) / 2.0;
        assert_eq!(summary.runs, 2);
        assert!((summary.mean_courier_wait.unwrap() - expected).abs() < 1e-9);
        assert!(ReplicationSummary::from_reports(&[]).is_none());
    }

    #[test]
    fn empty_workload_summary_has_no_means() {
        let reports = run_replications(&SimConfig::default(), &[], &[3]).unwrap();
        let summary = ReplicationSummary::from_reports(&reports).unwrap();
        assert_eq!(summary.mean_order_wait, None);
        assert!(summary.to_string().contains("n/a"));
    }
}
