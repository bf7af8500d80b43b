//! Virtual time model.
//!
//! # Design
//!
//! Time is a continuous count of simulated seconds held in `SimTime(f64)`.
//! Service and lead times are drawn from continuous distributions, so an
//! integer tick would either lose resolution or force every process onto a
//! grid.  Ordering uses `f64::total_cmp`, which gives `SimTime` a total order
//! and lets it key heaps and sorts without a `partial_cmp` escape hatch.
//!
//! The clock itself lives in the kernel; this module only provides the value
//! type and its arithmetic.

use std::cmp::Ordering;
use std::fmt;

/// Seconds in one simulated hour.  Used for throughput normalisation.
pub const SECS_PER_HOUR: f64 = 3_600.0;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point in virtual time, in seconds since the start of the run.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Sentinel for "never" (e.g. an order without a due date).
    pub const INFINITY: SimTime = SimTime(f64::INFINITY);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`.  Negative if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// The time `delay` seconds after `self`.
    #[inline]
    pub fn after(self, delay: f64) -> SimTime {
        SimTime(self.0 + delay)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2}s", self.0)
    }
}
