//! Shadow power model used as the ground truth for calibration.

use crate::error::CalibrationError;
use crate::power::host::HostPowerModel;
use crate::profile::HardwareProfile;
use crate::sample::UtilizationSample;
use crate::trace::PowerTrace;

/// A power model based on linear interpolation between idle and maximum host power
/// driven by CPU utilization, plus memory power proportional to the used memory.
///
/// `P = P_idle + u_cpu * (P_max - P_idle) + u_mem * mem_gb * mem_power_coeff`
#[derive(Debug, Clone, Copy)]
pub struct ShadowPowerModel {
    profile: HardwareProfile,
}

impl ShadowPowerModel {
    /// Creates the shadow model of the given hardware.
    pub fn new(profile: HardwareProfile) -> Self {
        Self { profile }
    }

    /// Computes the reference power trace of a workload.
    pub fn compute(profile: &HardwareProfile, samples: &[UtilizationSample]) -> Result<PowerTrace, CalibrationError> {
        Self::new(*profile).power_trace(samples)
    }

    /// Power consumed by compute in W.
    pub fn compute_power(&self, cpu_util: f64) -> f64 {
        self.profile.p_idle() + cpu_util * self.profile.dynamic_range()
    }
}

impl HostPowerModel for ShadowPowerModel {
    fn get_power(&self, sample: &UtilizationSample) -> f64 {
        self.compute_power(sample.cpu_util) + self.profile.memory_power(sample)
    }
}
