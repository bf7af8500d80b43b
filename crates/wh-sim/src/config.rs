//! Run parameters and their validation.

use serde::{Deserialize, Serialize};
use wh_core::{ConfigError, SimTime, WhResult};
use wh_dispatch::{DEFAULT_AGING_ALPHA, DispatchPolicy};
use wh_inventory::ReorderPolicy;

use crate::DemandProfile;

/// Default dispatcher polling interval, in seconds.
pub const DEFAULT_DISPATCH_INTERVAL: f64 = 0.1;

// ── LeadTime ──────────────────────────────────────────────────────────────────

/// Uniform replenishment lead-time range, in seconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeadTime {
    pub min: f64,
    pub max: f64,
}

impl Default for LeadTime {
    fn default() -> Self {
        Self { min: 60.0, max: 300.0 }
    }
}

// ── RunParams ─────────────────────────────────────────────────────────────────

/// Everything one simulation run needs.
///
/// The defaults reproduce the reference scenario: one simulated hour, two
/// servers, FIFO, a mean inter-arrival gap of 10 s, a mean service time of
/// 8 s, and 100 / 20 / 50 units of initial stock / reorder point / reorder
/// quantity for every item.
///
/// Call [`validate`][Self::validate] (the builder does) before use; every
/// [`ConfigError`] is raised there, before any virtual time passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// Horizon in seconds.
    pub sim_time:            f64,
    /// Server pool capacity.
    pub num_servers:         usize,
    pub policy:              DispatchPolicy,
    /// Mean inter-arrival gap in seconds.
    pub lam:                 f64,
    /// Mean service time in seconds.
    pub mean_proc:           f64,
    pub seed:                u64,
    /// Added to `seed` so related runs draw de-correlated streams.
    pub seed_offset:         u64,
    pub initial_inventory:   u32,
    pub reorder_point:       u32,
    pub reorder_quantity:    u32,
    /// Seconds between dispatcher polls.  Bounds dispatch latency.
    pub dispatch_interval:   f64,
    /// PRIORITY aging weight per second of waiting.
    pub aging_alpha:         f64,
    pub replenish_lead_time: LeadTime,
    pub demand:              DemandProfile,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            sim_time:            3_600.0,
            num_servers:         2,
            policy:              DispatchPolicy::Fifo,
            lam:                 10.0,
            mean_proc:           8.0,
            seed:                42,
            seed_offset:         0,
            initial_inventory:   100,
            reorder_point:       20,
            reorder_quantity:    50,
            dispatch_interval:   DEFAULT_DISPATCH_INTERVAL,
            aging_alpha:         DEFAULT_AGING_ALPHA,
            replenish_lead_time: LeadTime::default(),
            demand:              DemandProfile::default(),
        }
    }
}

impl RunParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sim_time(mut self, secs: f64) -> Self {
        self.sim_time = secs;
        self
    }

    pub fn with_servers(mut self, n: usize) -> Self {
        self.num_servers = n;
        self
    }

    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Select the policy by name.  Unknown names fail immediately.
    pub fn with_policy_name(self, name: &str) -> WhResult<Self> {
        Ok(self.with_policy(name.parse()?))
    }

    pub fn with_arrivals(mut self, lam: f64, mean_proc: f64) -> Self {
        self.lam = lam;
        self.mean_proc = mean_proc;
        self
    }

    pub fn with_seed(mut self, seed: u64, seed_offset: u64) -> Self {
        self.seed = seed;
        self.seed_offset = seed_offset;
        self
    }

    pub fn with_inventory(mut self, initial: u32, reorder_point: u32, reorder_quantity: u32) -> Self {
        self.initial_inventory = initial;
        self.reorder_point = reorder_point;
        self.reorder_quantity = reorder_quantity;
        self
    }

    pub fn with_dispatch_interval(mut self, secs: f64) -> Self {
        self.dispatch_interval = secs;
        self
    }

    pub fn with_aging_alpha(mut self, alpha: f64) -> Self {
        self.aging_alpha = alpha;
        self
    }

    pub fn with_lead_time(mut self, min: f64, max: f64) -> Self {
        self.replenish_lead_time = LeadTime { min, max };
        self
    }

    pub fn with_demand(mut self, demand: DemandProfile) -> Self {
        self.demand = demand;
        self
    }

    #[inline]
    pub fn horizon(&self) -> SimTime {
        SimTime(self.sim_time)
    }

    pub fn reorder_policy(&self) -> ReorderPolicy {
        ReorderPolicy {
            initial_inventory: self.initial_inventory,
            reorder_point:     self.reorder_point,
            reorder_quantity:  self.reorder_quantity,
        }
    }

    /// Check every parameter.  Returns the first problem found.
    pub fn validate(&self) -> WhResult<()> {
        positive("sim_time", self.sim_time)?;
        if self.num_servers == 0 {
            return Err(ConfigError::NoServers.into());
        }
        positive("lam", self.lam)?;
        positive("mean_proc", self.mean_proc)?;
        positive("dispatch_interval", self.dispatch_interval)?;
        // Below one ulp of the horizon, `now + interval` can round back to `now`.
        if self.dispatch_interval < self.sim_time * f64::EPSILON {
            return Err(ConfigError::BelowResolution {
                field:   "dispatch_interval",
                value:   self.dispatch_interval,
                horizon: self.sim_time,
            }
            .into());
        }
        non_negative("aging_alpha", self.aging_alpha)?;

        let lt = self.replenish_lead_time;
        non_negative("replenish_lead_time.min", lt.min)?;
        non_negative("replenish_lead_time.max", lt.max)?;
        if lt.min > lt.max {
            return Err(ConfigError::InvalidRange {
                field: "replenish_lead_time",
                low:   lt.min,
                high:  lt.max,
            }
            .into());
        }

        self.demand.validate()
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> WhResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value }.into())
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> WhResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value }.into())
    }
}
