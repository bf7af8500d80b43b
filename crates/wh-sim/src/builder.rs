//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeSet;

use log::debug;
use rand::distributions::Uniform;
use wh_core::{OrderId, SimRng, WhResult};
use wh_dispatch::{DispatchRule, OrderQueue};
use wh_inventory::{Catalog, Ledger};
use wh_kernel::Kernel;
use wh_kpi::KpiCollector;

use crate::process::{ArrivalStage, Process};
use crate::{DemandModel, RunParams, Sim};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                          |
/// |----------------|----------------------------------|
/// | `.catalog(c)`  | `Catalog::standard()` (10 items) |
///
/// # Example
///
/// ```rust,ignore
/// let params = RunParams::default().with_policy(DispatchPolicy::Spt);
/// let mut sim = SimBuilder::new(params).build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    params:  RunParams,
    catalog: Option<Catalog>,
}

impl SimBuilder {
    pub fn new(params: RunParams) -> Self {
        Self { params, catalog: None }
    }

    /// Use a catalog other than the standard 10 items.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Validate the parameters, build every component, and register the
    /// arrival generator and the dispatcher (in that order) at time zero.
    pub fn build(self) -> WhResult<Sim> {
        let params = self.params;
        params.validate()?;
        let catalog = self.catalog.unwrap_or_default();

        let rule = DispatchRule::new(params.policy, params.aging_alpha)?;
        let demand = DemandModel::new(params.lam, params.mean_proc, &params.demand, catalog)?;
        let lt = params.replenish_lead_time;
        let lead_time = Uniform::new_inclusive(lt.min, lt.max);
        let ledger = Ledger::new(&catalog, &params.reorder_policy());

        let mut kernel = Kernel::new(params.horizon(), params.num_servers)?;
        kernel.spawn(Process::Arrivals(ArrivalStage::Idle));
        kernel.spawn(Process::Dispatcher);

        debug!(
            "built run: policy {}, {} servers, {} items, seed {}+{}",
            params.policy,
            params.num_servers,
            catalog.len(),
            params.seed,
            params.seed_offset,
        );

        Ok(Sim {
            rng: SimRng::with_offset(params.seed, params.seed_offset),
            params,
            kernel,
            ledger,
            queue: OrderQueue::new(),
            kpis: KpiCollector::new(),
            rule,
            demand,
            lead_time,
            catalog,
            next_order: OrderId::FIRST,
            replenishing: BTreeSet::new(),
        })
    }
}
