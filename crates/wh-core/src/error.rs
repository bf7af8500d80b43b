//! Error taxonomy shared by every `wh-*` crate.
//!
//! Two families, matching how a caller can react:
//!
//! - [`ConfigError`] - bad run parameters.  Detected before any simulated
//!   time advances; the caller can fix the parameters and re-invoke.
//! - [`InvariantViolation`] - kernel or ledger state that a correct
//!   implementation never reaches.  Fatal for the run; nothing is corrected
//!   silently.
//!
//! [`WhError`] wraps both so sub-crates can use a single `WhResult<T>`.

use thiserror::Error;

use crate::{ItemId, OrderId, SimTime, TaskId};

/// Invalid run parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown dispatch policy {0:?} (expected one of FIFO, SPT, EDD, PRIORITY)")]
    UnknownPolicy(String),

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} range is invalid: [{low}, {high}]")]
    InvalidRange {
        field: &'static str,
        low:   f64,
        high:  f64,
    },

    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min:   f64,
        max:   f64,
    },

    #[error("{field} of {value} cannot advance a clock that runs to {horizon}")]
    BelowResolution {
        field:   &'static str,
        value:   f64,
        horizon: f64,
    },

    #[error("the server pool needs at least one server")]
    NoServers,

    #[error("cannot build {what} distribution: {reason}")]
    Distribution { what: &'static str, reason: String },
}

/// Internal state that must never occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("{item} stock would go negative: {on_hand} on hand, {requested} requested")]
    NegativeStock {
        item:      ItemId,
        on_hand:   u32,
        requested: u32,
    },

    #[error("{0} already has a replenishment in flight")]
    DuplicateReplenishment(ItemId),

    #[error("{0} has no replenishment in flight to complete")]
    ReplenishmentNotInFlight(ItemId),

    #[error("{0} is not in the catalog")]
    UnknownItem(ItemId),

    #[error("{0} released a server slot it does not hold")]
    ReleaseWithoutPermit(TaskId),

    #[error("wake scheduled for {0}, which is not parked")]
    UnknownTask(TaskId),

    #[error("{task} requested an invalid delay of {delay}")]
    InvalidDelay { task: TaskId, delay: f64 },

    #[error("{order} timeline out of order at {at}")]
    OrderTimeline { order: OrderId, at: SimTime },
}

/// The top-level error type for all `wh-*` crates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WhError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl WhError {
    pub fn is_config(&self) -> bool {
        matches!(self, WhError::Config(_))
    }

    pub fn is_invariant(&self) -> bool {
        matches!(self, WhError::Invariant(_))
    }
}

/// Shorthand result type for all `wh-*` crates.
pub type WhResult<T> = Result<T, WhError>;
