//! Stochastic order generation.
//!
//! | Quantity          | Distribution                                  |
//! |-------------------|-----------------------------------------------|
//! | inter-arrival gap | `Exp(1 / lam)` (mean `lam` seconds)           |
//! | service time      | `max(min_service, N(mean_proc, service_sd))`  |
//! | due offset        | `max(min_due, N(due_mean, due_sd))`           |
//! | urgency           | Bernoulli(`urgent_probability`) → priority 1  |
//! | item              | uniform over the catalog                      |
//! | quantity          | weighted choice over `quantities`             |
//!
//! Per arrival the draws happen in exactly that order, after the gap that
//! preceded it.

use rand::distributions::{Uniform, WeightedIndex};
use rand_distr::{Exp, Normal};
use serde::{Deserialize, Serialize};
use wh_core::{ConfigError, ItemId, Order, OrderId, SimRng, SimTime, WhResult};
use wh_inventory::Catalog;

use crate::config::{non_negative, positive};

// ── DemandProfile ─────────────────────────────────────────────────────────────

/// One entry of the order-quantity distribution.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantityWeight {
    pub quantity: u32,
    pub weight:   f64,
}

/// Shape parameters of the order stream that do not vary between standard
/// experiments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandProfile {
    pub service_sd:         f64,
    pub min_service:        f64,
    pub due_mean:           f64,
    pub due_sd:             f64,
    pub min_due:            f64,
    pub urgent_probability: f64,
    pub quantities:         Vec<QuantityWeight>,
}

impl Default for DemandProfile {
    fn default() -> Self {
        let q = |quantity, weight| QuantityWeight { quantity, weight };
        Self {
            service_sd:         2.0,
            min_service:        1.0,
            due_mean:           30.0,
            due_sd:             5.0,
            min_due:            10.0,
            urgent_probability: 0.2,
            quantities:         vec![q(1, 0.5), q(2, 0.3), q(3, 0.15), q(5, 0.05)],
        }
    }
}

impl DemandProfile {
    pub fn validate(&self) -> WhResult<()> {
        non_negative("demand.service_sd", self.service_sd)?;
        positive("demand.min_service", self.min_service)?;
        non_negative("demand.due_mean", self.due_mean)?;
        non_negative("demand.due_sd", self.due_sd)?;
        non_negative("demand.min_due", self.min_due)?;

        let p = self.urgent_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::OutOfRange {
                field: "demand.urgent_probability",
                value: p,
                min:   0.0,
                max:   1.0,
            }
            .into());
        }

        for qw in &self.quantities {
            if qw.quantity == 0 {
                return Err(ConfigError::NonPositive {
                    field: "demand.quantities.quantity",
                    value: 0.0,
                }
                .into());
            }
            non_negative("demand.quantities.weight", qw.weight)?;
        }
        // Emptiness and all-zero weights are reported by WeightedIndex.
        WeightedIndex::new(self.quantities.iter().map(|qw| qw.weight))
            .map_err(|e| distribution("quantity", e))?;
        Ok(())
    }
}

fn distribution(what: &'static str, e: impl std::fmt::Display) -> ConfigError {
    ConfigError::Distribution { what, reason: e.to_string() }
}

// ── DemandModel ───────────────────────────────────────────────────────────────

/// Ready-to-sample distributions for one run.
#[derive(Debug)]
pub struct DemandModel {
    gap:         Exp<f64>,
    service:     Normal<f64>,
    min_service: f64,
    due:         Normal<f64>,
    min_due:     f64,
    urgent_p:    f64,
    quantity:    WeightedIndex<f64>,
    quantities:  Vec<u32>,
    /// Over the catalog's item indices; the catalog is never empty.
    item:        Uniform<u16>,
}

impl DemandModel {
    /// Build the sampling distributions.  `lam` and `mean_proc` must already
    /// be positive.
    pub fn new(lam: f64, mean_proc: f64, profile: &DemandProfile, catalog: Catalog) -> WhResult<Self> {
        profile.validate()?;
        let Some(last) = catalog.items().last() else {
            return Err(distribution("item", "the catalog has no items").into());
        };
        Ok(Self {
            gap:         Exp::new(1.0 / lam).map_err(|e| distribution("inter-arrival", e))?,
            service:     Normal::new(mean_proc, profile.service_sd)
                .map_err(|e| distribution("service time", e))?,
            min_service: profile.min_service,
            due:         Normal::new(profile.due_mean, profile.due_sd)
                .map_err(|e| distribution("due offset", e))?,
            min_due:     profile.min_due,
            urgent_p:    profile.urgent_probability,
            quantity:    WeightedIndex::new(profile.quantities.iter().map(|qw| qw.weight))
                .map_err(|e| distribution("quantity", e))?,
            quantities:  profile.quantities.iter().map(|qw| qw.quantity).collect(),
            item:        Uniform::new_inclusive(0, last.0),
        })
    }

    /// Seconds until the next arrival.
    pub fn next_gap(&self, rng: &mut SimRng) -> f64 {
        rng.sample(&self.gap)
    }

    /// Draw the attributes of an order arriving at `now`.
    pub fn make_order(&self, id: OrderId, now: SimTime, rng: &mut SimRng) -> Order {
        let service = rng.sample(&self.service).max(self.min_service);
        let due = now.after(rng.sample(&self.due).max(self.min_due));
        let priority = u8::from(rng.gen_bool(self.urgent_p));
        let item = ItemId(rng.sample(&self.item));
        let quantity = self.quantities[rng.sample(&self.quantity)];
        Order::new(id, now, service, Some(due), priority, item, quantity)
    }
}
