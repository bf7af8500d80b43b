//! Dispatch policies and their sort keys.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wh_core::{ConfigError, Order, SimTime, WhResult};

/// Default aging weight for PRIORITY: one priority level per 1000 s of waiting.
pub const DEFAULT_AGING_ALPHA: f64 = 0.001;

// ── DispatchPolicy ────────────────────────────────────────────────────────────

/// The closed set of service disciplines.
///
/// Serialized by its upper-case name.  Deserialization goes through
/// [`FromStr`], so it is case-insensitive and rejects unknown names with
/// [`ConfigError::UnknownPolicy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum DispatchPolicy {
    /// First in, first out by arrival time.
    Fifo,
    /// Shortest processing time first.
    Spt,
    /// Earliest due date first; undated orders go last.
    Edd,
    /// Highest priority first, with aging.
    Priority,
}

impl DispatchPolicy {
    pub const ALL: [DispatchPolicy; 4] = [
        DispatchPolicy::Fifo,
        DispatchPolicy::Spt,
        DispatchPolicy::Edd,
        DispatchPolicy::Priority,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DispatchPolicy::Fifo => "FIFO",
            DispatchPolicy::Spt => "SPT",
            DispatchPolicy::Edd => "EDD",
            DispatchPolicy::Priority => "PRIORITY",
        }
    }
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DispatchPolicy {
    type Err = ConfigError;

    /// Case-insensitive.  Anything outside the closed set is a configuration
    /// error; there is no fallback policy.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DispatchPolicy::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownPolicy(s.to_owned()))
    }
}

impl TryFrom<String> for DispatchPolicy {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ── DispatchKey ───────────────────────────────────────────────────────────────

/// A policy's sort key for one order at one instant.  Smaller keys are
/// served first; ties on `primary` fall back to arrival time.
#[derive(Copy, Clone, Debug)]
pub struct DispatchKey {
    pub primary: f64,
    pub arrival: SimTime,
}

impl PartialEq for DispatchKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DispatchKey {}

impl PartialOrd for DispatchKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DispatchKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.arrival.cmp(&other.arrival))
    }
}

// ── DispatchRule ──────────────────────────────────────────────────────────────

/// A policy bound to its parameters, fixed for the whole run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DispatchRule {
    policy:      DispatchPolicy,
    aging_alpha: f64,
}

impl DispatchRule {
    /// Bind `policy` with the aging weight used by PRIORITY.
    pub fn new(policy: DispatchPolicy, aging_alpha: f64) -> WhResult<Self> {
        if !(aging_alpha.is_finite() && aging_alpha >= 0.0) {
            return Err(ConfigError::Negative { field: "aging_alpha", value: aging_alpha }.into());
        }
        Ok(Self { policy, aging_alpha })
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    pub fn aging_alpha(&self) -> f64 {
        self.aging_alpha
    }

    /// The sort key of `order` at virtual time `now`.
    pub fn key(&self, order: &Order, now: SimTime) -> DispatchKey {
        let primary = match self.policy {
            DispatchPolicy::Fifo => order.arrival.secs(),
            DispatchPolicy::Spt => order.service,
            DispatchPolicy::Edd => order.due.unwrap_or(SimTime::INFINITY).secs(),
            DispatchPolicy::Priority => {
                -(order.priority as f64) - self.aging_alpha * order.current_wait(now)
            }
        };
        DispatchKey { primary, arrival: order.arrival }
    }
}

impl Default for DispatchRule {
    fn default() -> Self {
        Self {
            policy:      DispatchPolicy::Fifo,
            aging_alpha: DEFAULT_AGING_ALPHA,
        }
    }
}
