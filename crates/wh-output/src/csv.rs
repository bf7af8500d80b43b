//! CSV output backends.
//!
//! - [`ExperimentCsvWriter`]: one row per sweep trial, e.g.
//!   `ab_test_results.csv`.
//! - [`OrderCsvWriter`]: one row per completed order.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OrderLogWriter;
use crate::{ExperimentRow, OrderLogRow, OutputResult};

pub const EXPERIMENT_HEADER: [&str; 14] = [
    "experiment",
    "run",
    "factor",
    "level",
    "utilization",
    "policy",
    "completed",
    "avg_wait",
    "p90_wait",
    "avg_flow",
    "throughput_per_hr",
    "wip_peak",
    "stockout_rate",
    "replenishments",
];

pub const ORDER_LOG_HEADER: [&str; 10] = [
    "order_id",
    "item",
    "priority",
    "quantity",
    "arrival",
    "start",
    "end",
    "wait",
    "flow",
    "was_backlogged",
];

// ── ExperimentCsvWriter ───────────────────────────────────────────────────────

/// Writes sweep results to a single CSV file.
pub struct ExperimentCsvWriter {
    out:      Writer<File>,
    rows:     u64,
    finished: bool,
}

impl ExperimentCsvWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut out = Writer::from_path(path)?;
        out.write_record(EXPERIMENT_HEADER)?;
        Ok(Self { out, rows: 0, finished: false })
    }

    pub fn write_rows(&mut self, rows: &[ExperimentRow]) -> OutputResult<()> {
        for row in rows {
            let s = &row.summary;
            self.out.write_record(&[
                row.experiment.to_string(),
                row.run.to_string(),
                row.factor.to_string(),
                row.level.clone(),
                row.utilization.map(|u| u.to_string()).unwrap_or_default(),
                s.policy.to_string(),
                s.completed.to_string(),
                s.avg_wait.to_string(),
                s.p90_wait.to_string(),
                s.avg_flow.to_string(),
                s.throughput_per_hr.to_string(),
                s.wip_peak.to_string(),
                s.stockout_rate.to_string(),
                s.replenishments.to_string(),
            ])?;
            self.rows += 1;
        }
        Ok(())
    }

    /// Data rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}

// ── OrderCsvWriter ────────────────────────────────────────────────────────────

/// Writes completed orders to a single CSV file.
pub struct OrderCsvWriter {
    out:      Writer<File>,
    finished: bool,
}

impl OrderCsvWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut out = Writer::from_path(path)?;
        out.write_record(ORDER_LOG_HEADER)?;
        Ok(Self { out, finished: false })
    }
}

impl OrderLogWriter for OrderCsvWriter {
    fn write_orders(&mut self, rows: &[OrderLogRow]) -> OutputResult<()> {
        for row in rows {
            self.out.write_record(&[
                row.order_id.to_string(),
                row.item.clone(),
                row.priority.to_string(),
                row.quantity.to_string(),
                row.arrival.to_string(),
                row.start.to_string(),
                row.end.to_string(),
                row.wait.to_string(),
                row.flow.to_string(),
                (row.was_backlogged as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
