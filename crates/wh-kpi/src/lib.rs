//! `wh-kpi` - per-run performance statistics.
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`collector`] | `KpiCollector` - append-only accumulator used during a run |
//! | [`stats`]     | `mean`, `percentile` (linear interpolation), `round_to`  |
//! | [`summary`]   | `KpiReport` (exact) and `SummaryRecord` (rounded)        |
//!
//! `SummaryRecord` is the only type downstream consumers (dashboards, batch
//! drivers) see.  Its field names are fixed:
//!
//! ```text
//! policy, completed, avg_wait, p90_wait, avg_flow,
//! throughput_per_hr, wip_peak, stockout_rate, replenishments
//! ```

pub mod collector;
pub mod stats;
pub mod summary;


pub use collector::KpiCollector;
pub use stats::{mean, percentile, round_to};
pub use summary::{KpiReport, SummaryRecord};
