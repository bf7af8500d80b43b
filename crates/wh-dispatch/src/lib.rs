//! `wh-dispatch` - which queued order gets the next free server.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`policy`] | `DispatchPolicy` (closed set), `DispatchRule`, `DispatchKey` |
//! | [`queue`]  | `OrderQueue` - admitted orders awaiting dispatch             |
//!
//! # Keys (ascending = served first)
//!
//! ```text
//! FIFO      (arrival)
//! SPT       (service,                          arrival)
//! EDD       (due or +inf,                      arrival)
//! PRIORITY  (-priority - alpha * (now - arrival), arrival)
//! ```
//!
//! The PRIORITY key is recomputed on every dispatch cycle, so a waiting
//! low-priority order's key keeps falling until it outranks fresh urgent
//! arrivals.

pub mod policy;
pub mod queue;


pub use policy::{DEFAULT_AGING_ALPHA, DispatchKey, DispatchPolicy, DispatchRule};
pub use queue::OrderQueue;
