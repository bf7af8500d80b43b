//! `wh-sim` - run orchestrator for the warehouse dispatch simulator.
//!
//! # Processes
//!
//! ```text
//! t = 0:  spawn Arrivals, then Dispatcher
//!
//! Arrivals    sleep Exp(lam); draw order; ledger.submit(order)
//!               admitted    → dispatch queue
//!               stockout    → item backlog
//!               replenish?  → spawn Replenish(item)
//! Dispatcher  every dispatch_interval: if a server is free and the queue
//!             is non-empty, pop the best order and spawn its handler
//! Order       acquire server; start; sleep(service); finish; release
//! Replenish   sleep U(lead time); restock; release backlog to the queue
//! ```
//!
//! The loop stops at the first wake at or beyond `sim_time`.  Anything still
//! in flight is dropped and contributes nothing to the completed-order
//! statistics.
//!
//! # Crate layout
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`config`]   | `RunParams`, `LeadTime`                              |
//! | [`demand`]   | `DemandProfile`, `DemandModel`                       |
//! | [`process`]  | `Process` state machines                             |
//! | [`sim`]      | `Sim` - `step`, `run`, `finish`                      |
//! | [`builder`]  | `SimBuilder`                                         |
//! | [`observer`] | `SimObserver`, `NoopObserver`                        |
//! | [`run`]      | `run`, `run_with_observer`, `run_report`             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_dispatch::DispatchPolicy;
//! use wh_sim::{RunParams, run};
//!
//! let record = run(&RunParams::default().with_policy(DispatchPolicy::Edd))?;
//! println!("{} completed, avg wait {}", record.completed, record.avg_wait);
//! ```

pub mod builder;
pub mod config;
pub mod demand;
pub mod observer;
pub mod process;
pub mod run;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::{DEFAULT_DISPATCH_INTERVAL, LeadTime, RunParams};
pub use demand::{DemandModel, DemandProfile, QuantityWeight};
pub use observer::{NoopObserver, SimObserver};
pub use process::Process;
pub use run::{run, run_report, run_with_observer};
pub use sim::Sim;
