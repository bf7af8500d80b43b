//! `OrderLogObserver<W>` - bridges `SimObserver` to an `OrderLogWriter`.

use std::collections::BTreeSet;

use wh_core::{Order, OrderId, SimTime};
use wh_kpi::KpiReport;
use wh_sim::SimObserver;

use crate::writer::OrderLogWriter;
use crate::{OrderLogRow, OutputError, OutputResult};

/// A [`SimObserver`] that writes one row per completed order to any
/// [`OrderLogWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct OrderLogObserver<W: OrderLogWriter> {
    writer:     W,
    /// Orders that went through a backlog and have not completed yet.
    backlogged: BTreeSet<OrderId>,
    written:    u64,
    last_error: Option<OutputError>,
}

impl<W: OrderLogWriter> OrderLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            backlogged: BTreeSet::new(),
            written:    0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows handed to the writer.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OrderLogWriter> SimObserver for OrderLogObserver<W> {
    fn on_stockout(&mut self, order: &Order, _now: SimTime) {
        self.backlogged.insert(order.id);
    }

    fn on_order_complete(&mut self, order: &Order) {
        let was_backlogged = self.backlogged.remove(&order.id);
        let Some(row) = OrderLogRow::from_order(order, was_backlogged) else {
            return;
        };
        let result = self.writer.write_orders(&[row]);
        if result.is_ok() {
            self.written += 1;
        }
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _report: &KpiReport, _abandoned: usize) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
