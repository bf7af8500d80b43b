//! One-call entry points.

use log::info;
use wh_core::WhResult;
use wh_kpi::{KpiReport, SummaryRecord};

use crate::{NoopObserver, RunParams, SimBuilder, SimObserver};

/// Execute one full run and return its rounded summary.
///
/// Identical `params` always produce an identical record.
pub fn run(params: &RunParams) -> WhResult<SummaryRecord> {
    run_with_observer(params, &mut NoopObserver)
}

/// [`run`] with an observer attached.
pub fn run_with_observer<O: SimObserver>(params: &RunParams, observer: &mut O) -> WhResult<SummaryRecord> {
    run_report(params, observer).map(SummaryRecord::from)
}

/// Execute one full run and return the exact, unrounded report.
pub fn run_report<O: SimObserver>(params: &RunParams, observer: &mut O) -> WhResult<KpiReport> {
    info!(
        "run start: {} servers={} lam={} mean_proc={} seed={}+{} horizon={}s",
        params.policy,
        params.num_servers,
        params.lam,
        params.mean_proc,
        params.seed,
        params.seed_offset,
        params.sim_time,
    );
    let mut sim = SimBuilder::new(params.clone()).build()?;
    let report = sim.run(observer)?;
    info!(
        "run end: {} completed={} stockouts={} replenishments={} wip_peak={}",
        report.policy, report.completed, report.stockouts, report.replenishments, report.wip_peak,
    );
    Ok(report)
}
