//! `wh-output` - experiment sweeps and CSV output for the warehouse simulator.
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`experiments`] | trial plans, `run_trials`, `quick_comparison`            |
//! | [`csv`]         | `ExperimentCsvWriter`, `OrderCsvWriter`                  |
//! | [`observer`]    | `OrderLogObserver` - per-order log via `SimObserver`     |
//! | [`writer`]      | `OrderLogWriter` trait, `MemoryOrderLog`                 |
//! | [`row`]         | `ExperimentRow`, `OrderLogRow`                           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                         |
//! |------------|------------------------------------------------|
//! | `parallel` | Runs sweep trials on Rayon's thread pool.      |
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{OrderCsvWriter, OrderLogObserver};
//!
//! let writer = OrderCsvWriter::new(Path::new("./orders.csv"))?;
//! let mut obs = OrderLogObserver::new(writer);
//! wh_sim::run_with_observer(&params, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod experiments;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::{ExperimentCsvWriter, OrderCsvWriter};
pub use error::{OutputError, OutputResult};
pub use experiments::{
    Experiment, SweepReport, Trial, TrialFailure, ab_test_plan, best_by_throughput, best_by_wait,
    capacity_planning_plan, linspace, load_sensitivity_plan, quick_comparison, run_experiment,
    run_trials,
};
pub use observer::OrderLogObserver;
pub use row::{ExperimentRow, OrderLogRow};
pub use writer::{MemoryOrderLog, OrderLogWriter};
