//! `wh-core` - foundational types for the warehouse dispatch simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `OrderId`, `ItemId`, `TaskId`                         |
//! | [`time`]        | `SimTime` (virtual seconds)                           |
//! | [`rng`]         | `SimRng` (one seeded source per run)                  |
//! | [`order`]       | `Order` and its lifecycle timestamps                  |
//! | [`error`]       | `ConfigError`, `InvariantViolation`, `WhError`        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `SimTime`, `Order`. |

pub mod error;
pub mod ids;
pub mod order;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ConfigError, InvariantViolation, WhError, WhResult};
pub use ids::{ItemId, OrderId, TaskId};
pub use order::Order;
pub use rng::SimRng;
pub use time::{SECS_PER_HOUR, SimTime};
