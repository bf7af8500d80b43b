//! Run observer trait for logging and data collection.

use wh_core::{ItemId, Order, SimTime};
use wh_kpi::KpiReport;

/// Callbacks invoked by [`Sim`][crate::Sim] at order and stock lifecycle
/// points.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers see state; they cannot change
/// it, so attaching one never alters a run's results.
///
/// # Example: count urgent completions
///
/// ```rust,ignore
/// struct UrgentCounter(u64);
///
/// impl SimObserver for UrgentCounter {
///     fn on_order_complete(&mut self, order: &Order) {
///         if order.is_urgent() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// A new order was generated, before inventory admission.
    fn on_order_created(&mut self, _order: &Order) {}

    /// Stock was reserved and the order joined the dispatch queue.
    fn on_order_admitted(&mut self, _order: &Order, _now: SimTime) {}

    /// The order found too little stock and joined its item's backlog.
    fn on_stockout(&mut self, _order: &Order, _now: SimTime) {}

    /// The dispatcher removed `order` from the queue and started its handler.
    fn on_dispatch(&mut self, _order: &Order, _now: SimTime) {}

    /// Service finished; `start` and `end` are set.
    fn on_order_complete(&mut self, _order: &Order) {}

    fn on_replenishment_started(&mut self, _item: ItemId, _now: SimTime) {}

    /// Stock arrived.  `released` lists the backlogged orders that moved to
    /// the dispatch queue, oldest first.
    fn on_replenishment_finished(&mut self, _item: ItemId, _now: SimTime, _released: &[Order]) {}

    /// Called once at the horizon.  `abandoned` counts processes that were
    /// still suspended and were dropped unfinished.
    fn on_sim_end(&mut self, _report: &KpiReport, _abandoned: usize) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
