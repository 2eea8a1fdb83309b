//! Simplified Sustain-Kube power model.

use crate::power::host::HostPowerModel;
use crate::profile::HardwareProfile;
use crate::sample::UtilizationSample;

/// A linear power model with a single CPU coefficient.
///
/// `P = used_cores * cpu_coefficient + used_mem_gb * mem_power_coeff`
///
/// Unlike the shadow model it has no idle term, so the CPU coefficient absorbs the idle power.
#[derive(Debug, Clone, Copy)]
pub struct SustainKubePowerModel {
    profile: HardwareProfile,
    cpu_coefficient: f64,
}

impl SustainKubePowerModel {
    /// Creates the model.
    ///
    /// * `profile` - host hardware, provides capacities and memory coefficient.
    /// * `cpu_coefficient` - power in W per used core.
    pub fn new(profile: HardwareProfile, cpu_coefficient: f64) -> Self {
        Self {
            profile,
            cpu_coefficient,
        }
    }

    /// Power in W per used core.
    pub fn cpu_coefficient(&self) -> f64 {
        self.cpu_coefficient
    }
}

impl HostPowerModel for SustainKubePowerModel {
    fn get_power(&self, sample: &UtilizationSample) -> f64 {
        self.profile.used_cores(sample) * self.cpu_coefficient + self.profile.memory_power(sample)
    }
}
