//! The `Sim` struct and its event loop.

use std::collections::BTreeSet;

use log::{debug, trace};
use rand::distributions::Uniform;
use wh_core::{InvariantViolation, ItemId, Order, OrderId, SimRng, SimTime, TaskId, WhResult};
use wh_dispatch::{DispatchRule, OrderQueue};
use wh_inventory::{Admission, Catalog, Ledger};
use wh_kernel::{Kernel, Yield};
use wh_kpi::{KpiCollector, KpiReport};

use crate::process::{ArrivalStage, OrderStage, Process, ReplenishStage};
use crate::{DemandModel, RunParams, SimObserver};

/// One warehouse run.
///
/// `Sim` owns every piece of run state: the kernel with its parked processes
/// and server pool, the inventory ledger, the dispatch queue, and the KPI
/// collector.  Processes never touch that state directly; each wake hands one
/// process to [`step`][Self::step], which advances it a single stage.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Parameters the run was built from (already validated).
    pub params: RunParams,

    /// Clock, event queue, and server pool.
    pub kernel: Kernel<Process>,

    /// Per-item stock, replenishment guards, and backlogs.
    pub ledger: Ledger,

    /// Admitted orders waiting for the dispatcher.
    pub queue: OrderQueue,

    pub kpis: KpiCollector,

    pub(crate) rule:         DispatchRule,
    pub(crate) demand:       DemandModel,
    pub(crate) lead_time:    Uniform<f64>,
    pub(crate) rng:          SimRng,
    pub(crate) catalog:      Catalog,
    pub(crate) next_order:   OrderId,
    /// Items with a live replenishment process.
    pub(crate) replenishing: BTreeSet<ItemId>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run to the horizon and return the exact KPI report.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> WhResult<KpiReport> {
        while self.step(observer)? {}
        Ok(self.finish(observer))
    }

    /// Process exactly one wake.  Returns `false` once the horizon is reached.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> WhResult<bool> {
        let Some((id, mut process)) = self.kernel.next_ready()? else {
            return Ok(false);
        };
        let kind = process.kind();
        let y = self.resume(id, &mut process, observer)?;
        trace!("{} {kind} {id} -> {y:?}", self.now());
        self.kernel.suspend(id, process, y)?;
        Ok(true)
    }

    /// Drop every unfinished process and report.  Orders still queued,
    /// backlogged, or in service contribute nothing beyond the `wip_peak`
    /// they already influenced.
    pub fn finish<O: SimObserver>(&mut self, observer: &mut O) -> KpiReport {
        let abandoned = self.kernel.abandon();
        let report = self.kpis.report(self.params.policy, self.kernel.horizon());
        observer.on_sim_end(&report, abandoned);
        report
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.kernel.now()
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    pub fn rule(&self) -> &DispatchRule {
        &self.rule
    }

    /// Orders generated so far.
    pub fn orders_created(&self) -> u64 {
        self.next_order.0 - OrderId::FIRST.0
    }

    pub fn replenishments_in_flight(&self) -> usize {
        self.replenishing.len()
    }

    // ── Process stages ────────────────────────────────────────────────────

    fn resume<O: SimObserver>(
        &mut self,
        id:       TaskId,
        process:  &mut Process,
        observer: &mut O,
    ) -> WhResult<Yield> {
        match process {
            Process::Arrivals(stage) => {
                if *stage == ArrivalStage::Arriving {
                    self.arrive(observer)?;
                }
                *stage = ArrivalStage::Arriving;
                Ok(Yield::Sleep(self.demand.next_gap(&mut self.rng)))
            }

            Process::Dispatcher => {
                self.dispatch(observer);
                Ok(Yield::Sleep(self.params.dispatch_interval))
            }

            Process::Order(task) => match task.stage {
                OrderStage::New => {
                    task.stage = OrderStage::AwaitingSlot;
                    Ok(Yield::Acquire)
                }
                OrderStage::AwaitingSlot => {
                    task.order.mark_started(self.now())?;
                    task.stage = OrderStage::InService;
                    Ok(Yield::Sleep(task.order.service))
                }
                OrderStage::InService => {
                    let order = &mut task.order;
                    order.mark_finished(self.now())?;
                    let (Some(wait), Some(flow)) = (order.wait(), order.flow()) else {
                        return Err(InvariantViolation::OrderTimeline { order: order.id, at: self.now() }.into());
                    };
                    self.kpis.record_completion(wait, flow);
                    observer.on_order_complete(order);
                    // Done hands the slot to the next waiter.
                    debug_assert!(self.kernel.pool().holds(id));
                    Ok(Yield::Done)
                }
            },

            Process::Replenish(task) => match task.stage {
                ReplenishStage::Ordering => {
                    task.stage = ReplenishStage::InTransit;
                    Ok(Yield::Sleep(self.rng.sample(&self.lead_time)))
                }
                ReplenishStage::InTransit => {
                    self.restock(task.item, observer)?;
                    Ok(Yield::Done)
                }
            },
        }
    }

    /// Generate one order at `now` and submit it to the ledger.
    fn arrive<O: SimObserver>(&mut self, observer: &mut O) -> WhResult<()> {
        let now = self.now();
        let id = self.next_order;
        self.next_order = id.next();
        let order = self.demand.make_order(id, now, &mut self.rng);
        observer.on_order_created(&order);

        let item = order.item;
        let outcome = self.ledger.submit(order)?;
        self.kpis.record_submission();
        match outcome.admission {
            Admission::Admitted(order) => {
                observer.on_order_admitted(&order, now);
                self.queue.push(order);
            }
            Admission::Backlogged => {
                self.kpis.record_stockout();
                let backlogged = self.ledger.entry(item).and_then(|e| e.backlog_back());
                if let Some(order) = backlogged {
                    observer.on_stockout(order, now);
                }
            }
        }

        if outcome.start_replenishment {
            if !self.replenishing.insert(item) {
                return Err(InvariantViolation::DuplicateReplenishment(item).into());
            }
            debug!("{now} replenishment of {item} ordered");
            self.kernel.spawn(Process::replenish(item));
            observer.on_replenishment_started(item, now);
        }
        Ok(())
    }

    /// Start the best queued order if a server is free.  At most one order
    /// leaves the queue per poll.
    fn dispatch<O: SimObserver>(&mut self, observer: &mut O) {
        if !self.kernel.pool().has_free_slot() {
            return;
        }
        let now = self.now();
        if let Some(order) = self.queue.pop_next(&self.rule, now) {
            debug!("{now} dispatch {} ({} queued)", order.id, self.queue.len());
            observer.on_dispatch(&order, now);
            self.kernel.spawn(Process::order(order));
        }
    }

    fn restock<O: SimObserver>(&mut self, item: ItemId, observer: &mut O) -> WhResult<()> {
        let now = self.now();
        if !self.replenishing.remove(&item) {
            return Err(InvariantViolation::ReplenishmentNotInFlight(item).into());
        }
        let released: Vec<Order> = self.ledger.complete_replenishment(item)?;
        self.kpis.record_replenishment();
        debug!("{now} replenishment of {item} arrived, {} orders released", released.len());
        observer.on_replenishment_finished(item, now, &released);
        self.queue.extend(released);
        Ok(())
    }
}
