//! Calibration of the Sustain-Kube CPU coefficient against a reference power trace.

use crate::error::CalibrationError;
use crate::power::host::HostPowerModel;
use crate::power::sustain::SustainKubePowerModel;
use crate::profile::HardwareProfile;
use crate::sample::{validate_samples, UtilizationSample};
use crate::trace::PowerTrace;

/// Result of calibration: the CPU coefficient and the power trace it reproduces.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    /// Derived power in W per used core.
    pub cpu_coefficient: f64,
    /// Sustain-Kube power trace of the calibration workload.
    pub reconstructed: PowerTrace,
}

/// Derives the CPU coefficient of [`SustainKubePowerModel`] with a sum-balance estimator.
///
/// The memory coefficient is taken from the profile as is. The CPU coefficient is chosen
/// so that the summed power of the simplified model over the workload equals the summed
/// reference power:
///
/// `K = (sum(reference) - sum(used_mem_gb * mem_power_coeff)) / sum(used_cores)`
///
/// This zeroes the total error of the batch, it does not minimize the per-sample squared error.
#[derive(Debug, Clone, Copy)]
pub struct LinearCalibrator {
    profile: HardwareProfile,
}

impl LinearCalibrator {
    /// Creates calibrator for the given hardware.
    pub fn new(profile: HardwareProfile) -> Self {
        Self { profile }
    }

    /// Returns the CPU coefficient balancing the total energy of the workload.
    pub fn estimate_coefficient(
        &self,
        samples: &[UtilizationSample],
        reference: &PowerTrace,
    ) -> Result<f64, CalibrationError> {
        if samples.len() != reference.len() {
            return Err(CalibrationError::ShapeMismatch {
                expected: reference.len(),
                actual: samples.len(),
            });
        }
        validate_samples(samples)?;

        let mut cores_sum = 0.;
        let mut memory_power_sum = 0.;
        for sample in samples {
            cores_sum += self.profile.used_cores(sample);
            memory_power_sum += self.profile.memory_power(sample);
        }
        if cores_sum == 0. {
            return Err(CalibrationError::DegenerateWorkload);
        }
        Ok((reference.sum() - memory_power_sum) / cores_sum)
    }

    /// Derives the CPU coefficient and reconstructs the Sustain-Kube power trace of the workload.
    pub fn calibrate(
        &self,
        samples: &[UtilizationSample],
        reference: &PowerTrace,
    ) -> Result<Calibration, CalibrationError> {
        let cpu_coefficient = self.estimate_coefficient(samples, reference)?;
        let model = SustainKubePowerModel::new(self.profile, cpu_coefficient);
        let reconstructed = samples.iter().map(|sample| model.get_power(sample)).collect();
        Ok(Calibration {
            cpu_coefficient,
            reconstructed,
        })
    }
}
