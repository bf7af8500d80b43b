//! Run-end reports.

use serde::{Deserialize, Serialize};
use wh_dispatch::DispatchPolicy;

use crate::stats::round_to;

/// Exact KPI values for one run, before boundary rounding.
///
/// Carries two extra counters (`stockouts`, `in_system_at_end`) that the
/// rounded record omits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KpiReport {
    pub policy:            DispatchPolicy,
    pub completed:         u64,
    pub avg_wait:          f64,
    pub p90_wait:          f64,
    pub avg_flow:          f64,
    pub throughput_per_hr: f64,
    pub wip_peak:          u64,
    pub stockouts:         u64,
    pub stockout_rate:     f64,
    pub replenishments:    u64,
    /// Orders admitted or backlogged but not completed by the horizon.
    pub in_system_at_end:  u64,
}

/// The immutable per-run hand-off record.
///
/// Times are rounded to 2 decimals, `stockout_rate` to 3.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub policy:            DispatchPolicy,
    pub completed:         u64,
    pub avg_wait:          f64,
    pub p90_wait:          f64,
    pub avg_flow:          f64,
    pub throughput_per_hr: f64,
    pub wip_peak:          u64,
    pub stockout_rate:     f64,
    pub replenishments:    u64,
}

impl From<&KpiReport> for SummaryRecord {
    fn from(r: &KpiReport) -> Self {
        Self {
            policy:            r.policy,
            completed:         r.completed,
            avg_wait:          round_to(r.avg_wait, 2),
            p90_wait:          round_to(r.p90_wait, 2),
            avg_flow:          round_to(r.avg_flow, 2),
            throughput_per_hr: round_to(r.throughput_per_hr, 2),
            wip_peak:          r.wip_peak,
            stockout_rate:     round_to(r.stockout_rate, 3),
            replenishments:    r.replenishments,
        }
    }
}

impl From<KpiReport> for SummaryRecord {
    fn from(r: KpiReport) -> Self {
        SummaryRecord::from(&r)
    }
}
