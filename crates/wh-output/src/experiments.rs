//! Batch experiment drivers: policy comparison, load sweep, capacity sweep.
//!
//! | Experiment          | Varied factor | Default levels            | Runs | Horizon |
//! |---------------------|---------------|---------------------------|------|---------|
//! | `ab_test`           | `policy`      | FIFO, SPT, EDD, PRIORITY  | 30   | 3600 s  |
//! | `load_sensitivity`  | `lam`         | 10 points over 5..=25     | 10   | 1800 s  |
//! | `capacity_planning` | `num_servers` | 1..=10                    | 10   | 1800 s  |
//!
//! Replication `r` of every level runs with `seed_offset = r`, so levels are
//! compared on common random numbers.  A sweep is a flat list of [`Trial`]s;
//! each trial is an independent run with its own RNG, so the `parallel`
//! feature only changes wall-clock time, never results.

use std::ops::RangeInclusive;
use std::path::Path;

use log::{info, warn};
use wh_core::WhError;
use wh_dispatch::DispatchPolicy;
use wh_kpi::SummaryRecord;
use wh_sim::RunParams;

use crate::{ExperimentCsvWriter, ExperimentRow, OutputResult};

pub const AB_TEST_RUNS: u64 = 30;
pub const AB_TEST_SIM_TIME: f64 = 3_600.0;
pub const SWEEP_RUNS: u64 = 10;
pub const SWEEP_SIM_TIME: f64 = 1_800.0;
pub const LOAD_LAM_RANGE: (f64, f64) = (5.0, 25.0);
pub const LOAD_POINTS: usize = 10;
pub const CAPACITY_SERVERS: RangeInclusive<usize> = 1..=10;

// ── Experiment ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Experiment {
    AbTest,
    LoadSensitivity,
    CapacityPlanning,
}

impl Experiment {
    pub const ALL: [Experiment; 3] = [
        Experiment::AbTest,
        Experiment::LoadSensitivity,
        Experiment::CapacityPlanning,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Experiment::AbTest => "ab_test",
            Experiment::LoadSensitivity => "load_sensitivity",
            Experiment::CapacityPlanning => "capacity_planning",
        }
    }

    /// The parameter this experiment varies.
    pub fn factor(self) -> &'static str {
        match self {
            Experiment::AbTest => "policy",
            Experiment::LoadSensitivity => "lam",
            Experiment::CapacityPlanning => "num_servers",
        }
    }

    /// Conventional output file name, e.g. `ab_test_results.csv`.
    pub fn file_name(self) -> String {
        format!("{}_results.csv", self.name())
    }

    /// The standard plan for this experiment, built on `base`.
    pub fn default_plan(self, base: &RunParams) -> Vec<Trial> {
        match self {
            Experiment::AbTest => ab_test_plan(
                &base.clone().with_sim_time(AB_TEST_SIM_TIME),
                &DispatchPolicy::ALL,
                AB_TEST_RUNS,
            ),
            Experiment::LoadSensitivity => load_sensitivity_plan(
                &base.clone().with_sim_time(SWEEP_SIM_TIME),
                &linspace(LOAD_LAM_RANGE.0, LOAD_LAM_RANGE.1, LOAD_POINTS),
                SWEEP_RUNS,
            ),
            Experiment::CapacityPlanning => capacity_planning_plan(
                &base.clone().with_sim_time(SWEEP_SIM_TIME),
                CAPACITY_SERVERS,
                SWEEP_RUNS,
            ),
        }
    }
}

// ── Plans ─────────────────────────────────────────────────────────────────────

/// One run of a sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct Trial {
    pub experiment:  Experiment,
    pub run:         u64,
    pub level:       String,
    pub utilization: Option<f64>,
    pub params:      RunParams,
}

impl Trial {
    fn new(experiment: Experiment, run: u64, level: String, params: RunParams) -> Self {
        Self { experiment, run, level, utilization: None, params }
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i + 1 == n { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Every policy × `runs` replications.
pub fn ab_test_plan(base: &RunParams, policies: &[DispatchPolicy], runs: u64) -> Vec<Trial> {
    policies
        .iter()
        .flat_map(|&policy| {
            (0..runs).map(move |run| {
                let params = base.clone().with_policy(policy).with_seed(base.seed, run);
                Trial::new(Experiment::AbTest, run, policy.to_string(), params)
            })
        })
        .collect()
}

/// Every mean inter-arrival gap × `runs` replications.  Records
/// `utilization = mean_proc / lam`.
pub fn load_sensitivity_plan(base: &RunParams, lams: &[f64], runs: u64) -> Vec<Trial> {
    lams.iter()
        .flat_map(|&lam| {
            (0..runs).map(move |run| {
                let params = base
                    .clone()
                    .with_arrivals(lam, base.mean_proc)
                    .with_seed(base.seed, run);
                let mut trial = Trial::new(Experiment::LoadSensitivity, run, lam.to_string(), params);
                trial.utilization = Some(base.mean_proc / lam);
                trial
            })
        })
        .collect()
}

/// Every server count × `runs` replications.
pub fn capacity_planning_plan(base: &RunParams, servers: RangeInclusive<usize>, runs: u64) -> Vec<Trial> {
    servers
        .flat_map(|n| {
            (0..runs).map(move |run| {
                let params = base.clone().with_servers(n).with_seed(base.seed, run);
                Trial::new(Experiment::CapacityPlanning, run, n.to_string(), params)
            })
        })
        .collect()
}

// ── Execution ─────────────────────────────────────────────────────────────────

/// A trial that did not produce a record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialFailure {
    pub experiment: Experiment,
    pub run:        u64,
    pub level:      String,
    pub error:      WhError,
}

/// Outcome of a sweep, in plan order.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub rows:     Vec<ExperimentRow>,
    pub failures: Vec<TrialFailure>,
}

impl SweepReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

fn run_trial(trial: &Trial) -> Result<ExperimentRow, TrialFailure> {
    match wh_sim::run(&trial.params) {
        Ok(summary) => Ok(ExperimentRow {
            experiment:  trial.experiment.name(),
            run:         trial.run,
            factor:      trial.experiment.factor(),
            level:       trial.level.clone(),
            utilization: trial.utilization,
            summary,
        }),
        Err(error) => Err(TrialFailure {
            experiment: trial.experiment,
            run:        trial.run,
            level:      trial.level.clone(),
            error,
        }),
    }
}

/// Execute every trial.  A failing trial is recorded and the sweep goes on.
///
/// With the `parallel` feature, trials run on Rayon's thread pool; results
/// are still collected in plan order.
pub fn run_trials(trials: &[Trial]) -> SweepReport {
    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<ExperimentRow, TrialFailure>> = {
        use rayon::prelude::*;
        trials.par_iter().map(run_trial).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<ExperimentRow, TrialFailure>> = trials.iter().map(run_trial).collect();

    let mut report = SweepReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(row) => report.rows.push(row),
            Err(failure) => {
                warn!(
                    "{} trial {}={} run {} failed: {}",
                    failure.experiment.name(),
                    failure.experiment.factor(),
                    failure.level,
                    failure.run,
                    failure.error,
                );
                report.failures.push(failure);
            }
        }
    }
    report
}

/// Run `experiment`'s standard plan on `base` and write
/// `<dir>/<experiment>_results.csv`.
pub fn run_experiment(experiment: Experiment, base: &RunParams, dir: &Path) -> OutputResult<SweepReport> {
    let plan = experiment.default_plan(base);
    info!("{}: {} trials", experiment.name(), plan.len());
    let report = run_trials(&plan);

    let path = dir.join(experiment.file_name());
    let mut writer = ExperimentCsvWriter::new(&path)?;
    writer.write_rows(&report.rows)?;
    writer.finish()?;
    info!(
        "{}: wrote {} rows to {} ({} failed)",
        experiment.name(),
        writer.rows_written(),
        path.display(),
        report.failures.len(),
    );
    Ok(report)
}

// ── Quick comparison ──────────────────────────────────────────────────────────

/// One run per policy on `base`, with `seed_offset` equal to the policy's
/// position in `policies`.
pub fn quick_comparison(base: &RunParams, policies: &[DispatchPolicy]) -> Result<Vec<SummaryRecord>, WhError> {
    policies
        .iter()
        .enumerate()
        .map(|(i, &policy)| {
            let params = base.clone().with_policy(policy).with_seed(base.seed, i as u64);
            wh_sim::run(&params)
        })
        .collect()
}

/// The policy with the lowest average wait.  The first one listed wins ties.
pub fn best_by_wait(records: &[SummaryRecord]) -> Option<DispatchPolicy> {
    records
        .iter()
        .reduce(|best, r| if r.avg_wait < best.avg_wait { r } else { best })
        .map(|r| r.policy)
}

/// The policy with the highest throughput.  The first one listed wins ties.
pub fn best_by_throughput(records: &[SummaryRecord]) -> Option<DispatchPolicy> {
    records
        .iter()
        .reduce(|best, r| if r.throughput_per_hr > best.throughput_per_hr { r } else { best })
        .map(|r| r.policy)
}
