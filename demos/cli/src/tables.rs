//! Console tables for one run.

use ks_core::SimConfig;
use ks_core::time::millis_to_secs;
use ks_sim::{ReplicationSummary, RunOutcome, RunReport, fmt_wait};

const WIDTH: usize = 120;

fn banner(title: &str) {
    println!("{}", "=".repeat(WIDTH));
    let head = format!("=== {title} ");
    println!("{head}{}", "=".repeat(WIDTH.saturating_sub(head.len())));
}

/// Configuration header plus the delivered-order and courier tables.
pub fn print_simulation_info(config: &SimConfig, outcome: &RunOutcome) {
    banner("SIMULATION");
    println!("- STRATEGY: {}", config.strategy.as_str().to_uppercase());
    println!("- ORDERS PER SECOND: {}", config.orders_per_second);
    println!("- COOKS IN KITCHEN: {}", config.cooks_in_kitchen);
    println!("- COURIER TRANSIT MIN TIME: {}s", config.transit_delay_min);
    println!("- COURIER TRANSIT MAX TIME: {}s", config.transit_delay_max);
    println!("- TRANSIT DISTRIBUTION: {:?}", config.transit_distribution);
    println!("- SEED: {}", config.seed);

    println!("{}", "-".repeat(WIDTH));
    println!("- ORDERS");
    println!(
        "{:>38}{:>20}{:>7}{:>14}{:>14}{:>14}{:>14}{:>10}",
        "ID", "Name", "Time", "Added", "Started", "Finished", "Delivered", "Wait"
    );
    for o in outcome.kitchen.delivered() {
        println!(
            "{:>38}{:>20}{:>7}{:>14}{:>14}{:>14}{:>14}{:>10}",
            o.external_id,
            o.name,
            format!("{}s", millis_to_secs(o.prep_ms)),
            o.added().to_string(),
            o.started().map(|t| t.to_string()).unwrap_or_default(),
            o.finished().map(|t| t.to_string()).unwrap_or_default(),
            o.delivered().map(|t| t.to_string()).unwrap_or_default(),
            fmt_wait(o.order_wait()),
        );
    }

    println!("{}", "-".repeat(WIDTH));
    println!("- COURIERS");
    println!(
        "{:>14}{:>38}{:>14}{:>14}{:>14}{:>10}",
        "ID", "Order ID", "Dispatched", "Arrival", "Delivery", "Wait"
    );
    for done in outcome.delivery.completed() {
        let c = &done.courier;
        println!(
            "{:>14}{:>38}{:>14}{:>14}{:>14}{:>10}",
            c.id.to_string(),
            done.order.external_id,
            c.dispatched_at.to_string(),
            c.arrival().map(|t| t.to_string()).unwrap_or_default(),
            c.delivery().map(|t| t.to_string()).unwrap_or_default(),
            fmt_wait(c.courier_wait()),
        );
    }
}

pub fn print_results(report: &RunReport) {
    banner(&format!("RESULTS: {}", report.strategy.as_str().to_uppercase()));
    println!("ORDERS DELIVERED: {}/{}", report.delivered, report.orders);
    println!("PEAK ORDERS IN PREPARATION: {}/{}", report.peak_in_preparation, report.cooks);
    println!("FINISHED AT: {}", report.finished_at);
    println!("AVG ORDER WAIT TIME: {}", fmt_wait(report.average_order_wait));
    println!("AVG COURIER WAIT TIME: {}", fmt_wait(report.average_courier_wait));
    println!("{}", "=".repeat(WIDTH));
}

pub fn print_replications(summary: &ReplicationSummary, reports: &[RunReport]) {
    banner(&format!("REPLICATIONS: {}", summary.strategy.as_str().to_uppercase()));
    println!("{:>22}{:>16}{:>16}{:>16}", "Seed", "Order wait", "Courier wait", "Finished");
    for r in reports {
        println!(
            "{:>22}{:>16}{:>16}{:>16}",
            r.seed,
            fmt_wait(r.average_order_wait),
            fmt_wait(r.average_courier_wait),
            r.finished_at.to_string(),
        );
    }
    println!("{}", "-".repeat(WIDTH));
    println!("{summary}");
    println!("{}", "=".repeat(WIDTH));
}
