//! Calibration runs over one or more hardware scenarios.

use std::sync::mpsc;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;
use threadpool::ThreadPool;

use crate::calibration::LinearCalibrator;
use crate::error::CalibrationError;
use crate::fit::evaluate_fit;
use crate::power::shadow::ShadowPowerModel;
use crate::profile::{HardwareProfile, Scenario};
use crate::sample::UtilizationSample;
use crate::trace::PowerTrace;

/// Calibration result of one hardware profile on one workload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationResult {
    /// Derived Sustain-Kube power in W per used core.
    pub cpu_coefficient: f64,
    /// Coefficient of determination of the reconstructed trace.
    pub r2: f64,
    /// Mean absolute error of the reconstructed trace in W.
    pub mae: f64,
}

/// Calibration result together with both power traces.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationOutcome {
    /// Calibration result.
    pub result: CalibrationResult,
    /// Shadow model power trace.
    pub reference: PowerTrace,
    /// Sustain-Kube power trace.
    pub reconstructed: PowerTrace,
}

/// Calibrates the Sustain-Kube model of one hardware profile:
/// computes the shadow trace, derives the CPU coefficient, reconstructs the trace and scores it.
pub fn calibrate_profile(
    profile: &HardwareProfile,
    samples: &[UtilizationSample],
) -> Result<CalibrationOutcome, CalibrationError> {
    let reference = ShadowPowerModel::compute(profile, samples)?;
    let calibration = LinearCalibrator::new(*profile).calibrate(samples, &reference)?;
    let fit = evaluate_fit(&reference, &calibration.reconstructed)?;
    debug!(
        "Calibrated {} samples: K = {:.4}, R2 = {:.4}, MAE = {:.2} W",
        samples.len(),
        calibration.cpu_coefficient,
        fit.r2,
        fit.mae
    );
    Ok(CalibrationOutcome {
        result: CalibrationResult {
            cpu_coefficient: calibration.cpu_coefficient,
            r2: fit.r2,
            mae: fit.mae,
        },
        reference,
        reconstructed: calibration.reconstructed,
    })
}

/// Outcome of a single scenario within a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Calibrated hardware profile.
    pub profile: HardwareProfile,
    /// Calibration outcome or the error that stopped it.
    pub outcome: Result<CalibrationOutcome, CalibrationError>,
}

struct Job {
    scenario: Scenario,
    samples: Arc<[UtilizationSample]>,
}

impl Job {
    fn execute(&self) -> ScenarioReport {
        let outcome = calibrate_profile(&self.scenario.profile, &self.samples);
        if let Err(e) = &outcome {
            warn!("Scenario '{}' failed: {}", self.scenario.name, e);
        }
        ScenarioReport {
            name: self.scenario.name.clone(),
            profile: self.scenario.profile,
            outcome,
        }
    }
}

/// Set of independent calibrations, one per scenario.
///
/// A failure of one scenario is reported in its [`ScenarioReport`] and does not affect the others.
#[derive(Default)]
pub struct CalibrationRun {
    jobs: Vec<Arc<Job>>,
}

impl CalibrationRun {
    /// Creates an empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a run calibrating every scenario on the same workload.
    pub fn with_shared_workload(scenarios: &[Scenario], samples: Vec<UtilizationSample>) -> Self {
        let samples: Arc<[UtilizationSample]> = samples.into();
        let mut run = Self::new();
        for scenario in scenarios {
            run.add_scenario(scenario.clone(), samples.clone());
        }
        run
    }

    /// Adds a scenario with its own workload.
    pub fn add_scenario(&mut self, scenario: Scenario, samples: Arc<[UtilizationSample]>) {
        self.jobs.push(Arc::new(Job { scenario, samples }));
    }

    /// Returns the number of scenarios.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns true if the run has no scenarios.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Calibrates all scenarios one by one, reports follow the order of scenarios.
    pub fn run(&self) -> Vec<ScenarioReport> {
        info!("Calibrating {} scenarios", self.jobs.len());
        let reports = self.jobs.iter().map(|job| job.execute()).collect::<Vec<_>>();
        log_summary(&reports);
        reports
    }

    /// Calibrates all scenarios using the specified number of threads,
    /// reports follow the order of scenarios.
    pub fn run_parallel(&self, num_threads: usize) -> Vec<ScenarioReport> {
        let num_threads = num_threads.clamp(1, self.jobs.len().max(1));
        info!("Calibrating {} scenarios using {} threads", self.jobs.len(), num_threads);
        let pool = ThreadPool::new(num_threads);
        let (sender, receiver) = mpsc::channel();

        for (id, job) in self.jobs.iter().enumerate() {
            let job = job.clone();
            let sender = sender.clone();
            pool.execute(move || {
                // receiver outlives the pool, so the send can't fail
                let _ = sender.send((id, job.execute()));
            });
        }
        drop(sender);
        pool.join();

        let mut reports = receiver.into_iter().collect::<Vec<_>>();
        reports.sort_by_key(|(id, _)| *id);
        let reports = reports.into_iter().map(|(_, report)| report).collect::<Vec<_>>();
        log_summary(&reports);
        reports
    }
}

fn log_summary(reports: &[ScenarioReport]) {
    let failed = reports.iter().filter(|r| r.outcome.is_err()).count();
    info!("Calibration finished: {} succeeded, {} failed", reports.len() - failed, failed);
}
