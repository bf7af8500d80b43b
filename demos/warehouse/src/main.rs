//! warehouse - command-line driver for the warehouse dispatch simulator.
//!
//! ```text
//! warehouse [quick]              four-policy comparison, 30 simulated minutes
//! warehouse sweep [DIR]          A/B, load, and capacity sweeps → DIR/*.csv
//! warehouse orders PATH [POLICY] one default run, per-order log → PATH
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`, `trace`) for progress logging.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::info;

use wh_dispatch::DispatchPolicy;
use wh_kpi::SummaryRecord;
use wh_output::{
    Experiment, OrderCsvWriter, OrderLogObserver, best_by_throughput, best_by_wait, quick_comparison,
    run_experiment,
};
use wh_sim::RunParams;

// ── Constants ─────────────────────────────────────────────────────────────────

const QUICK_SIM_TIME:  f64  = 1_800.0;
const DEFAULT_OUT_DIR: &str = "experiments";

// ── Commands ──────────────────────────────────────────────────────────────────

fn quick() -> Result<()> {
    println!("Warehouse dispatch simulator - quick comparison");
    println!("{}", "=".repeat(50));

    let base = RunParams::default().with_sim_time(QUICK_SIM_TIME);
    let records = quick_comparison(&base, &DispatchPolicy::ALL)?;

    println!();
    print_table(&records);

    if let Some(p) = best_by_wait(&records) {
        println!("\nBest policy for wait time:  {p}");
    }
    if let Some(p) = best_by_throughput(&records) {
        println!("Best policy for throughput: {p}");
    }
    Ok(())
}

fn sweep(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let base = RunParams::default();

    for experiment in Experiment::ALL {
        let started = Instant::now();
        println!("Running {} ...", experiment.name());
        let report = run_experiment(experiment, &base, dir)
            .with_context(|| format!("{} sweep", experiment.name()))?;
        println!(
            "  {} trials in {:.2?} -> {}",
            report.rows.len(),
            started.elapsed(),
            dir.join(experiment.file_name()).display(),
        );
        for f in &report.failures {
            eprintln!("  failed: {}={} run {}: {}", experiment.factor(), f.level, f.run, f.error);
        }
    }
    println!("\nAll experiments completed.");
    Ok(())
}

fn orders(path: &Path, policy: Option<&str>) -> Result<()> {
    let mut params = RunParams::default();
    if let Some(name) = policy {
        params = params.with_policy_name(name)?;
    }
    let writer = OrderCsvWriter::new(path).with_context(|| format!("opening {}", path.display()))?;
    let mut obs = OrderLogObserver::new(writer);
    let record = wh_sim::run_with_observer(&params, &mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing order log");
    }
    info!("wrote {} orders to {}", obs.written(), path.display());
    print_table(&[record]);
    Ok(())
}

fn print_table(records: &[SummaryRecord]) {
    println!(
        "{:<9} {:>9} {:>9} {:>9} {:>9} {:>10} {:>8} {:>9}",
        "policy", "completed", "avg_wait", "p90_wait", "avg_flow", "thru/hr", "wip_peak", "stockout",
    );
    for r in records {
        println!(
            "{:<9} {:>9} {:>9.2} {:>9.2} {:>9.2} {:>10.2} {:>8} {:>9.3}",
            r.policy.as_str(),
            r.completed,
            r.avg_wait,
            r.p90_wait,
            r.avg_flow,
            r.throughput_per_hr,
            r.wip_peak,
            r.stockout_rate,
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("quick") => quick(),
        Some("sweep") => {
            let dir = args.get(1).map_or_else(|| PathBuf::from(DEFAULT_OUT_DIR), PathBuf::from);
            sweep(&dir)
        }
        Some("orders") => {
            let Some(path) = args.get(1) else {
                bail!("usage: warehouse orders PATH [POLICY]");
            };
            orders(Path::new(path), args.get(2).map(String::as_str))
        }
        Some(other) => bail!("unknown command {other:?} (expected quick, sweep, or orders)"),
    }
}
