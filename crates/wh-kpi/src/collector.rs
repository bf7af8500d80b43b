//! `KpiCollector` - the run's append-only performance accumulator.

use wh_core::{SECS_PER_HOUR, SimTime};
use wh_dispatch::DispatchPolicy;

use crate::stats::{mean, percentile};
use crate::KpiReport;

/// Accumulates per-order and per-run counters while the simulation runs.
///
/// Every method is called by the simulation at a specific lifecycle point;
/// the collector never reads simulation state itself.
#[derive(Debug, Default)]
pub struct KpiCollector {
    wait_times:     Vec<f64>,
    flow_times:     Vec<f64>,
    completed:      u64,
    stockouts:      u64,
    replenishments: u64,
    in_system:      u64,
    wip_peak:       u64,
}

impl KpiCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// An order entered the system (admitted or backlogged).  Updates the
    /// in-system count and its peak.
    pub fn record_submission(&mut self) {
        self.in_system += 1;
        self.wip_peak = self.wip_peak.max(self.in_system);
    }

    pub fn record_stockout(&mut self) {
        self.stockouts += 1;
    }

    pub fn record_replenishment(&mut self) {
        self.replenishments += 1;
    }

    /// An order finished service after waiting `wait` and spending `flow`
    /// seconds in the system.
    pub fn record_completion(&mut self, wait: f64, flow: f64) {
        self.wait_times.push(wait);
        self.flow_times.push(flow);
        self.completed += 1;
        self.in_system = self.in_system.saturating_sub(1);
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn stockouts(&self) -> u64 {
        self.stockouts
    }

    pub fn replenishments(&self) -> u64 {
        self.replenishments
    }

    pub fn in_system(&self) -> u64 {
        self.in_system
    }

    pub fn wip_peak(&self) -> u64 {
        self.wip_peak
    }

    /// Produce the exact (unrounded) report for a run of length `horizon`.
    pub fn report(&self, policy: DispatchPolicy, horizon: SimTime) -> KpiReport {
        let denominator = self.completed + self.stockouts;
        let stockout_rate = if denominator > 0 {
            self.stockouts as f64 / denominator as f64
        } else {
            0.0
        };
        KpiReport {
            policy,
            completed: self.completed,
            avg_wait: mean(&self.wait_times),
            p90_wait: percentile(&self.wait_times, 90.0),
            avg_flow: mean(&self.flow_times),
            throughput_per_hr: self.completed as f64 / (horizon.secs() / SECS_PER_HOUR),
            wip_peak: self.wip_peak,
            stockouts: self.stockouts,
            stockout_rate,
            replenishments: self.replenishments,
            in_system_at_end: self.in_system,
        }
    }
}
