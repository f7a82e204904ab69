//! kitchen-sim: run a delivery-kitchen workload under both courier strategies.
//!
//! ```text
//! kitchen-sim data/orders.json                       # pooled, then pre-bound
//! kitchen-sim data/orders.json -o 4 -c 3 --print-info
//! kitchen-sim data/orders.json --strategy pre-bound --realtime
//! kitchen-sim data/orders.json --replications 32     # summary over 32 seeds
//! ```
//!
//! Each single run appends its configuration, events and final averages to
//! `<output-dir>/<strategy>.events.csv` and writes
//! `<output-dir>/<strategy>.report.json`.

mod tables;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use ks_core::{DelayDistribution, LogSink, SimConfig, SimTime, Strategy};
use ks_output::{CsvEventWriter, write_report_json};
use ks_sim::{ReplicationSummary, SimBuilder, fmt_wait, load_workload_json, replication_seeds, run_replications};

/// Simulate the fulfillment of delivery orders for a kitchen.
///
/// By default runs the workload twice: once with pooled couriers (any arrived
/// courier takes the oldest ready order) and once with pre-bound couriers
/// (each courier may only take the order it was dispatched for).
#[derive(Parser)]
#[command(name = "kitchen-sim", version)]
struct Cli {
    /// JSON workload: an array of {"id", "name", "prepTime"}.
    file: PathBuf,

    /// Orders submitted per second [default: 2].
    #[arg(short = 'o', long, alias = "orders_per_second")]
    orders_per_second: Option<u32>,

    /// Orders that can be prepared in parallel [default: 5].
    #[arg(short = 'c', long, alias = "cooks_in_kitchen")]
    cooks_in_kitchen: Option<u32>,

    /// Minimum courier transit time, seconds [default: 3].
    #[arg(long, aliases = ["transit_min", "courier_arrival_time_min"])]
    transit_min: Option<f64>,

    /// Maximum courier transit time, seconds [default: 15].
    #[arg(long, aliases = ["transit_max", "courier_arrival_time_max"])]
    transit_max: Option<f64>,

    /// Courier matching strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Both)]
    strategy: StrategyArg,

    /// Transit delay distribution: uniform or triangular [default: uniform].
    #[arg(long)]
    distribution: Option<DelayDistribution>,

    /// RNG seed [default: 42].
    #[arg(long)]
    seed: Option<u64>,

    /// Pace virtual time against the wall clock; FACTOR wall seconds per
    /// virtual second.
    #[arg(long, value_name = "FACTOR", num_args = 0..=1, default_missing_value = "1.0")]
    realtime: Option<f64>,

    /// Print order and courier tables for each run.
    #[arg(long, alias = "print_info")]
    print_info: bool,

    /// Directory for event logs and reports.
    #[arg(long, default_value = "logs")]
    output_dir: PathBuf,

    /// Base configuration as JSON; flags override its fields.
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Run N seeds per strategy and print a summary instead of one run.
    #[arg(long, value_name = "N")]
    replications: Option<usize>,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Pooled,
    PreBound,
    Both,
}

impl StrategyArg {
    fn strategies(self) -> &'static [Strategy] {
        match self {
            StrategyArg::Pooled => &[Strategy::Pooled],
            StrategyArg::PreBound => &[Strategy::PreBound],
            StrategyArg::Both => &Strategy::ALL,
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<SimConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {}", path.display()))
}

fn build_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(v) = cli.orders_per_second {
        config.orders_per_second = v;
    }
    if let Some(v) = cli.cooks_in_kitchen {
        config.cooks_in_kitchen = v;
    }
    if let Some(v) = cli.transit_min {
        config.transit_delay_min = v;
    }
    if let Some(v) = cli.transit_max {
        config.transit_delay_max = v;
    }
    if let Some(v) = cli.distribution {
        config.transit_distribution = v;
    }
    if let Some(v) = cli.seed {
        config.seed = v;
    }
    if cli.realtime.is_some() {
        config.realtime_factor = cli.realtime;
    }
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = build_config(&cli)?;
    let orders = load_workload_json(&cli.file)
        .with_context(|| format!("loading workload {}", cli.file.display()))?;

    if let Some(n) = cli.replications {
        if n == 0 {
            bail!("--replications must be at least 1");
        }
        return replicate(&cli, &config, &orders, n);
    }

    for &strategy in cli.strategy.strategies() {
        let config = config.with_strategy(strategy);
        let mut events = CsvEventWriter::new(&cli.output_dir, strategy.as_str())?;
        events.write_note(SimTime::ZERO, "RUN CONFIG", serde_json::to_string(&config)?)?;

        let t0 = Instant::now();
        let sim = SimBuilder::new(config.clone()).build()?;
        let outcome = sim.run(&orders, &mut (LogSink, &mut events))?;
        log::info!("{strategy} run took {:.3} s wall-clock", t0.elapsed().as_secs_f64());

        if let Some(e) = events.take_error() {
            return Err(e).with_context(|| format!("writing {}", events.path().display()));
        }
        let report = &outcome.report;
        events.write_note(
            report.finished_at,
            "RUN RESULTS",
            format!(
                "delivered={}/{} avg_order_wait={} avg_courier_wait={}",
                report.delivered,
                report.orders,
                fmt_wait(report.average_order_wait),
                fmt_wait(report.average_courier_wait),
            ),
        )?;

        if cli.print_info {
            tables::print_simulation_info(&config, &outcome);
        }
        tables::print_results(&outcome.report);

        let report_path = cli.output_dir.join(format!("{}.report.json", strategy.as_str()));
        write_report_json(&report_path, &outcome.report)?;
        log::info!("{} rows in {}, report in {}", events.rows(), events.path().display(), report_path.display());
    }
    Ok(())
}

fn replicate(cli: &Cli, config: &SimConfig, orders: &[ks_model::OrderSpec], n: usize) -> Result<()> {
    let seeds = replication_seeds(config.seed, n);
    for &strategy in cli.strategy.strategies() {
        let t0 = Instant::now();
        let reports = run_replications(&config.with_strategy(strategy), orders, &seeds)?;
        log::info!("{n} {strategy} replications took {:.3} s", t0.elapsed().as_secs_f64());

        let Some(summary) = ReplicationSummary::from_reports(&reports) else {
            continue;
        };
        tables::print_replications(&summary, &reports);

        let path = cli.output_dir.join(format!("{}.replications.json", strategy.as_str()));
        write_report_json(&path, &reports)?;
    }
    Ok(())
}
