//! Plain data row types written by the CSV backends.

use wh_core::Order;
use wh_kpi::SummaryRecord;

/// One trial of an experiment sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRow {
    /// `ab_test`, `load_sensitivity`, or `capacity_planning`.
    pub experiment:  &'static str,
    /// Replication index; also the trial's seed offset.
    pub run:         u64,
    /// Name of the varied parameter (`policy`, `lam`, `num_servers`).
    pub factor:      &'static str,
    /// The factor's value for this trial, formatted for the CSV.
    pub level:       String,
    /// `mean_proc / lam`; only the load sweep records it.
    pub utilization: Option<f64>,
    pub summary:     SummaryRecord,
}

/// One completed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLogRow {
    pub order_id:       u64,
    /// Catalog label, `item_1` .. `item_10`.
    pub item:           String,
    pub priority:       u8,
    pub quantity:       u32,
    pub arrival:        f64,
    pub start:          f64,
    pub end:            f64,
    pub wait:           f64,
    pub flow:           f64,
    /// The order spent time in an item backlog before admission.
    pub was_backlogged: bool,
}

impl OrderLogRow {
    /// Build the row for a finished order.  `None` if `order` has not
    /// finished service.
    pub fn from_order(order: &Order, was_backlogged: bool) -> Option<Self> {
        let (start, end) = (order.start?, order.end?);
        Some(Self {
            order_id: order.id.0,
            item: order.item.label(),
            priority: order.priority,
            quantity: order.quantity,
            arrival: order.arrival.secs(),
            start: start.secs(),
            end: end.secs(),
            wait: start.since(order.arrival),
            flow: end.since(order.arrival),
            was_backlogged,
        })
    }
}
