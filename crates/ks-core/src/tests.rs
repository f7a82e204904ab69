//! Unit tests for ks-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CourierId, OrderId, PoolId};

    #[test]
    fn index_roundtrip() {
        let id = OrderId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(OrderId::try_from(42usize).unwrap(), id);
        assert_eq!(id.next(), OrderId(43));
    }

    #[test]
    fn display() {
        assert_eq!(OrderId(7).to_string(), "order#7");
        assert_eq!(CourierId(0).to_string(), "courier#0");
        assert_eq!(PoolId(1).to_string(), "pool#1");
    }

    #[test]
    fn pool_id_rejects_overflow() {
        assert!(PoolId::try_from(70_000usize).is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;
    use crate::time::{millis_to_secs, secs_to_millis};

    #[test]
    fn seconds_convert_to_rounded_millis() {
        assert_eq!(secs_to_millis(1.0), 1_000);
        assert_eq!(secs_to_millis(0.1), 100);
        assert_eq!(secs_to_millis(2.0004), 2_000);
        assert_eq!(secs_to_millis(2.0006), 2_001);
    }

    #[test]
    fn negative_and_nan_clamp_to_zero() {
        assert_eq!(secs_to_millis(-3.0), 0);
        assert_eq!(secs_to_millis(f64::NAN), 0);
        assert_eq!(secs_to_millis(f64::INFINITY), u64::MAX);
    }

    #[test]
    fn time_arithmetic() {
        let t = SimTime(1_500);
        assert_eq!(t + 500, SimTime(2_000));
        assert_eq!(SimTime(2_000) - t, 500);
        assert_eq!(SimTime(2_000).secs_since(t), 0.5);
        assert_eq!(millis_to_secs(250), 0.25);
        assert_eq!(SimTime(u64::MAX).offset(1), SimTime(u64::MAX));
    }

    #[test]
    fn display_is_clock_like() {
        assert_eq!(SimTime(3_723_045).to_string(), "01:02:03.045");
        assert_eq!(SimTime::ZERO.to_string(), "00:00:00.000");
    }
}

#[cfg(test)]
mod rng {
    use crate::{DelaySampler, SimRng, TriangularDelay, UniformDelay};

    #[test]
    fn same_seed_same_stream() {
        let mut a = UniformDelay::new(SimRng::new(7));
        let mut b = UniformDelay::new(SimRng::new(7));
        for _ in 0..32 {
            assert_eq!(a.sample(2.0, 6.0), b.sample(2.0, 6.0));
        }
    }

    #[test]
    fn uniform_stays_in_bounds() {
        let mut s = UniformDelay::new(SimRng::new(1));
        for _ in 0..1_000 {
            let d = s.sample(2.0, 6.0);
            assert!((2.0..=6.0).contains(&d), "got {d}");
        }
    }

    #[test]
    fn triangular_stays_in_bounds() {
        let mut s = TriangularDelay::new(SimRng::new(1));
        for _ in 0..1_000 {
            let d = s.sample(3.0, 15.0);
            assert!((3.0..=15.0).contains(&d), "got {d}");
        }
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut u = UniformDelay::new(SimRng::new(1));
        let mut t = TriangularDelay::new(SimRng::new(1));
        assert_eq!(u.sample(4.0, 4.0), 4.0);
        assert_eq!(t.sample(4.0, 4.0), 4.0);
    }

    #[test]
    fn closures_are_samplers() {
        let mut fixed = |_min: f64, _max: f64| 1.0;
        assert_eq!(fixed.sample(0.0, 10.0), 1.0);
    }

    #[test]
    fn replication_seeds_differ() {
        let a = SimRng::replication_seed(42, 0);
        let b = SimRng::replication_seed(42, 1);
        assert_ne!(a, b);
        assert_eq!(a, SimRng::replication_seed(42, 0));
    }
}

#[cfg(test)]
mod config {
    use crate::{DelayDistribution, SimConfig, Strategy};

    #[test]
    fn default_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_rate_rejected() {
        let c = SimConfig { orders_per_second: 0, ..SimConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_cooks_rejected() {
        let c = SimConfig { cooks_in_kitchen: 0, ..SimConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn inverted_transit_range_rejected() {
        let c = SimConfig { transit_delay_min: 5.0, transit_delay_max: 4.0, ..SimConfig::default() };
        assert!(c.validate().is_err());
        let c = SimConfig { transit_delay_min: -1.0, ..SimConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn bad_realtime_factor_rejected() {
        let c = SimConfig { realtime_factor: Some(0.0), ..SimConfig::default() };
        assert!(c.validate().is_err());
        let c = SimConfig { realtime_factor: Some(0.5), ..SimConfig::default() };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn strategy_parses_with_legacy_names() {
        assert_eq!("pooled".parse::<Strategy>().unwrap(), Strategy::Pooled);
        assert_eq!("FIFO".parse::<Strategy>().unwrap(), Strategy::Pooled);
        assert_eq!("pre-bound".parse::<Strategy>().unwrap(), Strategy::PreBound);
        assert_eq!("matched".parse::<Strategy>().unwrap(), Strategy::PreBound);
        assert!("random".parse::<Strategy>().is_err());
        assert_eq!(Strategy::PreBound.to_string(), "pre-bound");
    }

    #[test]
    fn distribution_parses() {
        assert_eq!("triangular".parse::<DelayDistribution>().unwrap(), DelayDistribution::Triangular);
        assert!("normal".parse::<DelayDistribution>().is_err());
    }

    #[test]
    fn with_strategy_keeps_other_fields() {
        let base = SimConfig { seed: 9, ..SimConfig::default() };
        let other = base.with_strategy(Strategy::PreBound);
        assert_eq!(other.strategy, Strategy::PreBound);
        assert_eq!(other.seed, 9);
    }
}

#[cfg(test)]
mod event {
    use crate::{CourierId, Event, EventKind, EventLog, EventSink, NoopSink, OrderId, SimTime};

    fn dispatched(at: u64) -> Event {
        Event {
            at:   SimTime(at),
            kind: EventKind::CourierDispatched {
                courier:    CourierId(3),
                order:      OrderId(1),
                delay_secs: 2.5,
                bound:      true,
            },
        }
    }

    #[test]
    fn labels_and_accessors() {
        let e = dispatched(0);
        assert_eq!(e.kind.label(), "COURIER DISPATCHED");
        assert_eq!(e.kind.order(), OrderId(1));
        assert_eq!(e.kind.courier(), Some(CourierId(3)));
        assert_eq!(e.kind.detail(), "delay=2.500s bound");
    }

    #[test]
    fn display_is_one_line() {
        let line = dispatched(1_000).to_string();
        assert!(line.starts_with("00:00:01.000"));
        assert!(line.contains("courier#3"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn tuple_sink_fans_out() {
        let mut pair = (EventLog::new(), EventLog::new());
        pair.record(&dispatched(0));
        assert_eq!(pair.0.len(), 1);
        assert_eq!(pair.1.len(), 1);
        NoopSink.record(&dispatched(0));
    }

    #[test]
    fn log_filters_by_label() {
        let mut log = EventLog::new();
        log.record(&dispatched(0));
        log.record(&Event { at: SimTime(5), kind: EventKind::OrderStarted { order: OrderId(1) } });
        assert_eq!(log.with_label("ORDER STARTED").count(), 1);
        assert_eq!(log.with_label("COURIER DISPATCHED").count(), 1);
    }
}
